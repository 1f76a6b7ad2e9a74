//! CLI module for modelconf.
//!
//! Provides command-line interface parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{CardinalityArg, Cli, Commands, PatchModeArg};
