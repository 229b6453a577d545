//! Raw SQL injection rule.
//!
//! Flags calls to raw statement methods whose first argument is not provably
//! a constant string. The per-file work is a pure function of parsed AST and
//! settings, so files are analyzed in parallel.

use rayon::prelude::*;

use crate::{
    core::{CheckContext, analyze::FileAnalyzer},
    issues::InjectionIssue,
};

pub fn check_injection_issues(ctx: &CheckContext) -> Vec<InjectionIssue> {
    let parsed_files = ctx.parsed_files();

    parsed_files
        .par_iter()
        .flat_map(|(file_path, parsed)| {
            FileAnalyzer::new(file_path, &parsed.source_map, ctx.settings())
                .analyze(&parsed.module)
        })
        .collect()
}
