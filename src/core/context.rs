use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        analyze::RuleSettings,
        file_scanner::scan_files,
        parsers::js::{ParsedSource, parse_js_source},
    },
    issues::ParseErrorIssue,
};

/// Core analysis context.
///
/// `CheckContext` owns the merged configuration, the compiled rule settings,
/// and the scanned file set. Parsing is lazy: some commands never need an AST,
/// so files are read and parsed on first access, in parallel.
///
/// Configuration is resolved once with the following priority (highest to
/// lowest): CLI arguments, `.rawlintrc.json`, built-in defaults. The resulting
/// settings are immutable for the lifetime of the run.
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// All source files to analyze (TS/JS/TSX/JSX).
    pub files: HashSet<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// Compiled rule settings, shared by every file analysis.
    settings: RuleSettings,

    /// Parsed AST for each source file.
    /// Initialized on first call to `parsed_files()`.
    parsed_files: OnceLock<HashMap<String, ParsedSource>>,

    /// Parse errors encountered while parsing source files.
    /// Populated alongside `parsed_files` initialization.
    parse_errors: OnceLock<Vec<ParseErrorIssue>>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// Loads configuration, compiles the rule settings, and scans the source
    /// tree for files to analyze.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // CLI --source-root wins over the config file's sourceRoot; the CLI
        // value also decides where the config file search starts.
        let cli_root = common_args.source_root.clone();
        let search_root = cli_root.clone().unwrap_or_else(|| PathBuf::from("."));
        let search_path = search_root
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", search_root))?;

        let config_result = load_config(Path::new(search_path))?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .rawlintrc.json found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(root) = &cli_root {
            config.source_root = root.to_string_lossy().to_string();
        }
        if let Some(raw_statements) = &common_args.raw_statements {
            config.raw_statements = raw_statements.clone();
        }
        if let Some(builder_name) = &common_args.builder_name {
            config.builder_name = Some(builder_name.clone());
        }

        let settings = RuleSettings::from_config(&config)?;

        let root_dir = PathBuf::from(&config.source_root);
        let scan_result = scan_files(
            &config.source_root,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            settings,
            parsed_files: OnceLock::new(),
            parse_errors: OnceLock::new(),
        })
    }

    /// Compiled rule settings for this run.
    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    /// Get parsed ASTs for all source files (lazy initialization).
    ///
    /// Both file reading (I/O-bound) and parsing (CPU-bound) run in parallel;
    /// each file gets its own `Arc<SourceMap>` so results are thread-safe.
    /// Parse errors are collected separately, retrievable via
    /// `parse_errors()`.
    pub fn parsed_files(&self) -> &HashMap<String, ParsedSource> {
        self.parsed_files.get_or_init(|| {
            use std::sync::Arc;

            let parse_results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let parse_result = std::fs::read_to_string(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|code| {
                            let source_map = Arc::new(swc_common::SourceMap::default());
                            parse_js_source(code, file_path, source_map)
                        });

                    (file_path.clone(), parse_result)
                })
                .collect();

            // Sequential error collection and HashMap construction
            let mut parsed = HashMap::new();
            let mut errors = Vec::new();

            for (file_path, result) in parse_results {
                match result {
                    Ok(p) => {
                        parsed.insert(file_path, p);
                    }
                    Err(e) => {
                        if self.verbose {
                            eprintln!("Warning: {} - {}", file_path, e);
                        }
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: e.to_string(),
                        });
                    }
                }
            }

            let _ = self.parse_errors.set(errors);
            parsed
        })
    }

    /// Get parse errors from source files.
    ///
    /// Populated when `parsed_files()` is first called.
    pub fn parse_errors(&self) -> &Vec<ParseErrorIssue> {
        self.parse_errors.get_or_init(Vec::new)
    }
}
