//! extaudit CLI library.
//!
//! This crate provides the command-line layer for extaudit: argument and
//! environment parsing, host precondition checks, the output protocol and
//! the `collect` and `doctor` commands.

pub mod cli_args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod preconditions;
