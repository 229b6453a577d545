//! Per-file analyzer for raw query call sites.
//!
//! Walks a parsed module once, maintaining the lexical scope chain, and emits
//! one issue per raw call whose first argument is not provably a constant
//! string. A scope registers its directly-contained declarations on entry, so
//! a name used before its declaration still resolves within that scope.
//! `var` hoisting out of nested blocks is not modeled; names that escape the
//! model resolve to not-found, which is treated as safe.

use swc_common::SourceMap;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, CallExpr, CatchClause, Constructor, Decl, Function, IdentName,
    ImportSpecifier, Module, ModuleDecl, ModuleItem, ObjectPatProp, ParamOrTsParamProp, Pat, Stmt,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{SourceContext, SourceLocation};
use crate::issues::InjectionIssue;

use super::call_site::{RawCallSite, match_raw_call};
use super::classify::{ArgShape, classify};
use super::scope::{Binding, Resolution, ScopeChain};
use super::settings::RuleSettings;

pub struct FileAnalyzer<'a> {
    /// Path to the file being analyzed (relative to source root).
    file_path: &'a str,

    /// SWC source map for looking up line/column positions.
    source_map: &'a SourceMap,

    /// Compiled rule settings (raw statement + builder patterns).
    settings: &'a RuleSettings,

    /// Lexical scope chain maintained during traversal.
    scopes: ScopeChain,

    /// Issues collected during traversal.
    issues: Vec<InjectionIssue>,
}

impl<'a> FileAnalyzer<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, settings: &'a RuleSettings) -> Self {
        Self {
            file_path,
            source_map,
            settings,
            scopes: ScopeChain::new(),
            issues: Vec::new(),
        }
    }

    /// Main entry point: analyze a module and return the issues found.
    pub fn analyze(mut self, module: &Module) -> Vec<InjectionIssue> {
        self.visit_module(module);
        self.issues
    }

    // ============================================================
    // Declaration registration
    // ============================================================

    /// Register the declarations directly contained in a statement list.
    fn hoist_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if let Stmt::Decl(decl) = stmt {
                self.hoist_decl(decl);
            }
        }
    }

    /// Register module-level declarations, including exported declarations
    /// and import bindings.
    fn hoist_module_items(&mut self, items: &[ModuleItem]) {
        for item in items {
            match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => self.hoist_decl(decl),
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    self.hoist_decl(&export.decl)
                }
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    // Imported values have no initializer the analyzer can see.
                    for specifier in &import.specifiers {
                        let local = match specifier {
                            ImportSpecifier::Named(named) => &named.local,
                            ImportSpecifier::Default(default_import) => &default_import.local,
                            ImportSpecifier::Namespace(namespace) => &namespace.local,
                        };
                        self.scopes
                            .declare(local.sym.to_string(), Binding::Uninitialized);
                    }
                }
                _ => {}
            }
        }
    }

    fn hoist_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(var) => {
                for declarator in &var.decls {
                    self.declare_var_declarator(declarator);
                }
            }
            // Function and class declarations carry no initializer expression.
            Decl::Fn(fn_decl) => self
                .scopes
                .declare(fn_decl.ident.sym.to_string(), Binding::Uninitialized),
            Decl::Class(class_decl) => self
                .scopes
                .declare(class_decl.ident.sym.to_string(), Binding::Uninitialized),
            _ => {}
        }
    }

    fn declare_var_declarator(&mut self, declarator: &VarDeclarator) {
        match &declarator.name {
            Pat::Ident(binding) => {
                let kind = match &declarator.init {
                    Some(init) if classify(init).is_constant_string() => Binding::ConstString,
                    Some(_) => Binding::Dynamic,
                    None => Binding::Uninitialized,
                };
                self.scopes.declare(binding.id.sym.to_string(), kind);
            }
            // Values flowing through destructuring are invisible to the
            // analyzer; every bound name counts as uninitialized.
            other => self.declare_pat_names(other),
        }
    }

    /// Register every name bound by a pattern as uninitialized.
    /// Used for parameters, destructuring, and catch clause bindings.
    fn declare_pat_names(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(binding) => self
                .scopes
                .declare(binding.id.sym.to_string(), Binding::Uninitialized),
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.declare_pat_names(elem);
                }
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.declare_pat_names(&kv.value),
                        ObjectPatProp::Assign(assign) => self
                            .scopes
                            .declare(assign.key.sym.to_string(), Binding::Uninitialized),
                        ObjectPatProp::Rest(rest) => self.declare_pat_names(&rest.arg),
                    }
                }
            }
            Pat::Assign(assign) => self.declare_pat_names(&assign.left),
            Pat::Rest(rest) => self.declare_pat_names(&rest.arg),
            Pat::Expr(_) | Pat::Invalid(_) => {}
        }
    }

    // ============================================================
    // Safety analysis
    // ============================================================

    /// Decide whether a matched call's first argument is provably a constant
    /// string.
    ///
    /// Identifiers resolve through the scope chain; an identifier whose
    /// declaration cannot be found, or whose declaration has no initializer,
    /// is treated as safe - the analyzer stays silent about bindings whose
    /// origin it cannot see.
    fn first_arg_is_safe(&self, site: &RawCallSite) -> bool {
        let Some(arg) = site.first_arg else {
            return true;
        };
        if arg.spread.is_some() {
            return false;
        }

        match classify(&arg.expr) {
            shape if shape.is_constant_string() => true,
            ArgShape::Ident(name) => matches!(
                self.scopes.resolve(&name),
                Resolution::Constant | Resolution::Uninitialized | Resolution::NotFound
            ),
            _ => false,
        }
    }

    /// Record an issue against the method-name token.
    fn report(&mut self, method: &IdentName) {
        let loc = self.source_map.lookup_char_pos(method.span.lo);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();

        self.issues.push(InjectionIssue {
            context: SourceContext::new(
                SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
                source_line,
            ),
            query: method.sym.to_string(),
        });
    }
}

impl Visit for FileAnalyzer<'_> {
    fn visit_module(&mut self, node: &Module) {
        self.hoist_module_items(&node.body);
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, node: &Function) {
        self.scopes.enter();
        for param in &node.params {
            self.declare_pat_names(&param.pat);
        }
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.scopes.enter();
        for param in &node.params {
            self.declare_pat_names(param);
        }
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        self.scopes.enter();
        for param in &node.params {
            if let ParamOrTsParamProp::Param(param) = param {
                self.declare_pat_names(&param.pat);
            }
        }
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.scopes.enter();
        self.hoist_stmts(&node.stmts);
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.scopes.enter();
        if let Some(param) = &node.param {
            self.declare_pat_names(param);
        }
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(site) = match_raw_call(node, self.settings)
            && !self.first_arg_is_safe(&site)
        {
            self.report(site.method);
        }
        node.visit_children_with(self);
    }
}
