//! Ashiba CLI library
//!
//! This library contains all the CLI logic for ashiba, making it reusable
//! for testing and integration with other tools.

pub mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ashiba - a project scaffolding tool
#[derive(Parser)]
#[command(name = "ashiba")]
#[command(about = "Scaffold a web-application backend with ashiba (足場)")]
#[command(version)]
#[command(long_about = "Scaffold a web-application backend with ashiba (足場)

A recipe-driven project generator written in Rust.

Each recipe declares dependencies and writes configuration files; deferred
work runs after the dependency install and generator steps, in a fixed,
documented order.")]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "ASHIBA_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the ashiba CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a new project
    New(cmd::new::NewCommand),

    /// List the built-in recipe catalog
    Recipes(cmd::recipes::RecipesCommand),
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    ashiba_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::New(cmd) => cmd.run(),
        Commands::Recipes(cmd) => cmd.run(),
    }
}
