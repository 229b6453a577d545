//! Argument classification for raw query calls.
//!
//! Every first-argument expression is mapped onto a closed set of shapes, and
//! safety is a total function over that set. Adding support for a new
//! syntactic form means adding a variant here and giving it an explicit
//! outcome, not ad-hoc shape checks at call sites.

use swc_ecma_ast::{BinaryOp, Expr, Lit};

/// Shape of a raw-call argument, as far as injection analysis cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgShape {
    /// `'select 1'` - plain string literal.
    StringLit,
    /// `` `select 1` `` - template with no interpolations.
    TemplateText,
    /// `` `select ${x}` `` - template with one or more interpolations.
    TemplateInterp,
    /// `'select ' + x` - string concatenation.
    Concat,
    /// Bare identifier; its origin decides safety via the scope chain.
    Ident(String),
    /// Everything else (calls, member access, tagged templates, numbers, ...).
    Other,
}

impl ArgShape {
    /// Whether this shape is a constant string on its own, without consulting
    /// the scope chain.
    pub fn is_constant_string(&self) -> bool {
        matches!(self, ArgShape::StringLit | ArgShape::TemplateText)
    }
}

/// Classify an expression into its argument shape.
pub fn classify(expr: &Expr) -> ArgShape {
    match expr {
        Expr::Lit(Lit::Str(_)) => ArgShape::StringLit,
        Expr::Tpl(tpl) => {
            if tpl.exprs.is_empty() {
                ArgShape::TemplateText
            } else {
                ArgShape::TemplateInterp
            }
        }
        Expr::Bin(bin) if bin.op == BinaryOp::Add => ArgShape::Concat,
        Expr::Ident(ident) => ArgShape::Ident(ident.sym.to_string()),
        Expr::Paren(paren) => classify(&paren.expr),
        _ => ArgShape::Other,
    }
}
