//! Immutable rule settings, compiled once per run.
//!
//! The two recognized options mirror the config file: `rawStatements` decides
//! which method names are raw call sites, `builderName` optionally restricts
//! matching to calls on a named query builder. Settings are resolved before
//! analysis starts and passed by reference into the matcher; nothing reads
//! configuration ambiently during a traversal.

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::{Config, DEFAULT_RAW_STATEMENTS};

#[derive(Debug, Clone)]
pub struct RuleSettings {
    /// Anchored method-name pattern. A method is a raw call site only when its
    /// whole name matches.
    raw_statements: Regex,
    /// Optional builder-name pattern, matched anywhere in the target name.
    builder_name: Option<Regex>,
}

impl RuleSettings {
    pub fn new(raw_statements: &str, builder_name: Option<&str>) -> Result<Self> {
        let raw_statements = Regex::new(&format!("^(?:{})$", raw_statements))
            .with_context(|| format!("Invalid rawStatements regex: \"{}\"", raw_statements))?;

        let builder_name = builder_name
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid builderName regex: \"{}\"", pattern))
            })
            .transpose()?;

        Ok(Self {
            raw_statements,
            builder_name,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.raw_statements, config.builder_name.as_deref())
    }

    /// Whether a method name is one of the configured raw statements.
    pub fn matches_method(&self, method_name: &str) -> bool {
        self.raw_statements.is_match(method_name)
    }

    /// Whether a builder filter is configured at all.
    pub fn has_builder_filter(&self) -> bool {
        self.builder_name.is_some()
    }

    /// Apply the builder filter to a resolved target name.
    ///
    /// Without a configured filter every target passes. With one, a call is
    /// kept only when a target name was resolved and matches the pattern.
    pub fn matches_builder(&self, builder_name: Option<&str>) -> bool {
        match (&self.builder_name, builder_name) {
            (None, _) => true,
            (Some(pattern), Some(name)) => pattern.is_match(name),
            (Some(_), None) => false,
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        // The built-in pattern is a valid regex; compiling it cannot fail.
        Self::new(DEFAULT_RAW_STATEMENTS, None).expect("default rawStatements pattern is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_knex_raw_statements() {
        let settings = RuleSettings::default();
        assert!(settings.matches_method("raw"));
        assert!(settings.matches_method("whereRaw"));
        assert!(settings.matches_method("joinRaw"));
        assert!(!settings.matches_method("select"));
        assert!(!settings.matches_method("rawr"));
    }

    #[test]
    fn test_method_match_is_anchored() {
        // An unanchored user pattern must still match the whole method name.
        let settings = RuleSettings::new("raw", None).unwrap();
        assert!(settings.matches_method("raw"));
        assert!(!settings.matches_method("whereRaw"));
        assert!(!settings.matches_method("rawQuery"));
    }

    #[test]
    fn test_custom_raw_statements() {
        let settings = RuleSettings::new("^(raw|whereRaw|joinRaw|wrapQuery)$", None).unwrap();
        assert!(settings.matches_method("wrapQuery"));
        assert!(settings.matches_method("raw"));
        assert!(!settings.matches_method("query"));
    }

    #[test]
    fn test_builder_filter_absent_accepts_everything() {
        let settings = RuleSettings::default();
        assert!(!settings.has_builder_filter());
        assert!(settings.matches_builder(Some("knex")));
        assert!(settings.matches_builder(None));
    }

    #[test]
    fn test_builder_filter_is_partial_match() {
        let settings = RuleSettings::new(DEFAULT_RAW_STATEMENTS, Some("(?i)lorem")).unwrap();
        assert!(settings.has_builder_filter());
        assert!(settings.matches_builder(Some("lorem")));
        assert!(settings.matches_builder(Some("LoremBuilder")));
        assert!(!settings.matches_builder(Some("knex")));
    }

    #[test]
    fn test_builder_filter_rejects_unresolved_target() {
        let settings = RuleSettings::new(DEFAULT_RAW_STATEMENTS, Some("knex")).unwrap();
        assert!(!settings.matches_builder(None));
    }

    #[test]
    fn test_invalid_patterns_are_rejected() {
        assert!(RuleSettings::new("^(raw", None).is_err());
        assert!(RuleSettings::new(DEFAULT_RAW_STATEMENTS, Some("[knex")).is_err());
    }
}
