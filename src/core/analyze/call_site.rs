//! Call-site matching for raw query methods.
//!
//! Decides whether a call expression is in scope for safety analysis: the
//! callee must be a property access whose method name matches the configured
//! raw statements, and - when a builder filter is configured - the call target
//! must resolve to a matching name. Anything whose shape doesn't line up is
//! simply not a candidate; there is no error path here.

use swc_ecma_ast::{Callee, CallExpr, Expr, ExprOrSpread, IdentName, Lit, MemberProp};

use super::settings::RuleSettings;

/// A call expression that passed the matcher.
pub struct RawCallSite<'a> {
    /// The method-name token (`raw` in `knex.raw(...)`); findings are
    /// reported against its span.
    pub method: &'a IdentName,
    /// The first argument, if any.
    pub first_arg: Option<&'a ExprOrSpread>,
}

/// Match `<target>.<method>(...)` call sites against the settings.
///
/// Returns `None` for bare function calls, non-matching method names, calls
/// excluded by the builder filter, and - as a fast path - calls whose first
/// argument is a plain string literal.
pub fn match_raw_call<'a>(call: &'a CallExpr, settings: &RuleSettings) -> Option<RawCallSite<'a>> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Member(member) = &**callee else {
        return None;
    };
    let MemberProp::Ident(method) = &member.prop else {
        return None;
    };

    if !settings.matches_method(method.sym.as_str()) {
        return None;
    }

    let first_arg = call.args.first();

    // Literal first arguments are trivially safe; skip them before analysis.
    if let Some(arg) = first_arg
        && arg.spread.is_none()
        && matches!(&*arg.expr, Expr::Lit(Lit::Str(_)))
    {
        return None;
    }

    if settings.has_builder_filter() && !settings.matches_builder(target_name(&member.obj)) {
        return None;
    }

    Some(RawCallSite { method, first_arg })
}

/// Resolve the name of the object a raw method is invoked on.
///
/// A plain identifier names itself; when the target is itself a call (chained
/// builder styles such as `knex('users').whereRaw(...)` or
/// `factory().raw(...)`), the name of that call's callee is used instead.
fn target_name(obj: &Expr) -> Option<&str> {
    match obj {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => match &**callee {
                Expr::Ident(ident) => Some(ident.sym.as_str()),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}
