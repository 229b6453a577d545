//! Rawlint - raw SQL query linter for JavaScript/TypeScript
//!
//! Rawlint is a CLI tool and library for catching SQL-injection-prone code in
//! JavaScript/TypeScript projects. It flags calls to "raw query" style methods
//! (`knex.raw(...)`, `whereRaw`, `joinRaw`, configurable) whose first argument
//! is built from runtime values instead of a constant string.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (scanning, parsing, call-site analysis)
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Detection rules

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
