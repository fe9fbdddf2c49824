//! CLI arguments and subcommands for safe-eject.
//!
//! This module defines the command-line interface structure using the clap
//! library, including the target-volume argument, the log level flag, and
//! the `list` subcommand.

use clap::{Parser, Subcommand, ValueEnum};

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "safe-eject",
    about = "Eject busy removable volumes on macOS",
    long_about = "Eject busy removable volumes on macOS.\n\n\
                  Finds the processes holding files open on a volume, shows who they \
                  are and how they hold it, closes the user-owned ones on request, \
                  and unmounts the volume with diskutil.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Volume to eject (a name under /Volumes); interactive menu if omitted
    pub volume: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List ejectable volumes and exit
    List,
}
