use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Parsed source file with the map needed to resolve spans back to positions.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse a JS/TS/JSX/TSX source string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing; each file is
/// expected to bring its own map.
pub fn parse_js_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse source: {:?}", e))?;

        Ok(ParsedSource { module, source_map })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Result<ParsedSource> {
        let source_map = Arc::new(SourceMap::default());
        parse_js_source(code.to_string(), "test.ts", source_map)
    }

    #[test]
    fn test_parse_plain_javascript() {
        let parsed = parse("const q = 'select 1'; knex.raw(q);").unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }

    #[test]
    fn test_parse_typescript_and_jsx() {
        let parsed = parse(
            r#"
            const run = (id: number) => knex.raw(`id = ${id}`);
            export function App() { return <div>{run(1)}</div>; }
            "#,
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse("const = ;");
        assert!(result.is_err());
    }
}
