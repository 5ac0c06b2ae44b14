//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Add grade command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student name
    pub name: String,

    /// Course name or its number in `gradebook courses`
    pub course: String,

    /// Score between 0 and 100
    #[arg(allow_hyphen_values = true)]
    pub score: String,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Exact name of the student to delete
    pub name: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// Tab-separated rows
    Plain,
    /// JSON output
    Json,
}
