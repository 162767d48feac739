//! Seeker inspector
//!
//! A command-line element inspector for UI trees: render a tree snapshot as
//! a compact indexed listing, query it by property, or watch the built-in
//! demo desktop update over time.
//!
//! Usage:
//!   seeker-inspector tree --demo
//!   seeker-inspector tree --json snapshot.json --format json
//!   seeker-inspector find --demo --name save --match contains-ignore-case
//!   seeker-inspector watch --interval-ms 500 --ticks 10

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

mod cli;
mod commands;
mod demo;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Tree(args) => commands::handle_tree(args),
        Commands::Find(args) => commands::handle_find(args),
        Commands::Watch(args) => commands::handle_watch(args),
    }
}
