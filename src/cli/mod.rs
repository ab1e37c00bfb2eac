//! Command-line interface for trackdown.
//!
//! This module provides the CLI commands for exporting a playlist into a
//! track list and for running the acquisition pipeline over it.

mod commands;

pub use commands::{Cli, Commands, run_command};
