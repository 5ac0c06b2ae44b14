//! Command-line interface for gradebook.
//!
//! This module provides the CLI structure, the terminal surface and the
//! interactive form for the `gradebook` binary.

mod commands;
mod console;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, DeleteCommand, OutputFormat, ShowCommand};
pub use console::ConsoleSurface;
pub use shell::run_shell;

/// gradebook - Record student grades
///
/// Keeps student names and their course grades (0-100) in a local JSON file
/// and shows them as a grid with one column per course.
#[derive(Debug, Parser)]
#[command(name = "gradebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the student data file (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive grade form
    Shell,

    /// Record a grade for a student
    Add(AddCommand),

    /// Show the grade grid
    Show(ShowCommand),

    /// Delete a student and all their grades
    Delete(DeleteCommand),

    /// List the courses grades can be recorded for
    Courses,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
