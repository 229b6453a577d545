use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};

use crate::{core::CheckContext, issues::Issue, rules::injection::check_injection_issues};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.args.common)?;

    let mut issues: Vec<Issue> = check_injection_issues(&ctx)
        .into_iter()
        .map(Issue::Injection)
        .collect();

    issues.extend(ctx.parse_errors().iter().cloned().map(Issue::ParseError));

    Ok(finish(CommandSummary::Check, issues, ctx.files.len(), true))
}
