//! Tooling
//!
//! Command-line surface over the resolver.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
