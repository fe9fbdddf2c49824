//! safe-eject - eject busy removable volumes on macOS.
//!
//! Entry point: parses the CLI, initializes logging, and dispatches to the
//! volume listing or the eject flow.

use clap::Parser;
use safe_eject::cli::{Args, Commands, LogLevel};
use safe_eject::commands::command_list;
use safe_eject::controller;
use tracing::Level;

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match &args.command {
        Some(Commands::List) => command_list(),
        None => {
            if let Err(e) = controller::run(args.volume.as_deref()) {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }
}
