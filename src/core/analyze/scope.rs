//! Lexical scope chain for identifier resolution.
//!
//! The analyzer maintains a stack of scopes while walking a file's AST. Each
//! scope maps variable names to what the analyzer knows about their first
//! declaration; resolving a name walks from the innermost scope outward and
//! stops at the first hit. Later reassignments are ignored - only the original
//! declaration's initializer is consulted.

use std::collections::HashMap;

/// What the first declaration of a name tells the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Initializer is a string literal or an expression-free template.
    ConstString,
    /// Initializer is anything else.
    Dynamic,
    /// No initializer visible: parameters, destructured names, imports,
    /// `function`/`class` declarations, bare `let x;`.
    Uninitialized,
}

/// Outcome of resolving a name through the scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nearest declaration's initializer is a constant string.
    Constant,
    /// Nearest declaration's initializer is not provably constant.
    Dynamic,
    /// Nearest declaration has no initializer.
    Uninitialized,
    /// No declaration in any enclosing scope.
    NotFound,
}

/// Stack of lexical scopes, innermost last.
///
/// # Example
/// ```ignore
/// const q = 'select 1';      // root scope: q -> ConstString
/// function run() {           // push scope
///     knex.raw(q);           // resolve walks out to root, finds Constant
/// }                          // pop scope
/// ```
pub struct ScopeChain {
    scopes: Vec<HashMap<String, Binding>>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    /// Create a chain holding only the root (module) scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Enter a nested scope (function body, block, catch clause).
    pub fn enter(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Leave the current scope. The root scope is never popped.
    pub fn exit(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Record a declaration in the current scope.
    ///
    /// The first declaration of a name within one scope wins; redeclarations
    /// are ignored.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.entry(name.into()).or_insert(binding);
        }
    }

    /// Resolve a name by walking innermost -> outermost.
    pub fn resolve(&self, name: &str) -> Resolution {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.get(name) {
                return match binding {
                    Binding::ConstString => Resolution::Constant,
                    Binding::Dynamic => Resolution::Dynamic,
                    Binding::Uninitialized => Resolution::Uninitialized,
                };
            }
        }
        Resolution::NotFound
    }
}
