/// Pure position information in source code files (TS/JS/TSX/JSX).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with context information in source code files.
///
/// Carries the offending source line so the reporter can show it with a caret
/// under the reported column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{SourceContext, SourceLocation};

    #[test]
    fn test_source_location_new() {
        let loc = SourceLocation::new("./src/db.ts", 10, 5);
        assert_eq!(loc.file_path, "./src/db.ts");
        assert_eq!(loc.line, 10);
        assert_eq!(loc.col, 5);
    }

    #[test]
    fn test_source_context_accessors() {
        let loc = SourceLocation::new("./src/db.ts", 10, 5);
        let ctx = SourceContext::new(loc, "knex.raw(query);");
        assert_eq!(ctx.file_path(), "./src/db.ts");
        assert_eq!(ctx.line(), 10);
        assert_eq!(ctx.col(), 5);
        assert_eq!(ctx.source_line, "knex.raw(query);");
    }
}
