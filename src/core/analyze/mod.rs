//! Call-site matching and safety analysis for raw query calls.

mod call_site;
mod classify;
mod scope;
mod settings;
mod visitor;

pub use call_site::{RawCallSite, match_raw_call};
pub use classify::{ArgShape, classify};
pub use scope::{Binding, Resolution, ScopeChain};
pub use settings::RuleSettings;
pub use visitor::FileAnalyzer;
