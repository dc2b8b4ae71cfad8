//! qub CLI - publish packed projects into a local repository

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.global.verbose {
        EnvFilter::new("qub=debug")
    } else {
        EnvFilter::new("qub=info")
    };

    // stdout belongs to the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Publish(args) => commands::publish::execute(args, &cli.global),
        Commands::Tree(args) => commands::tree::execute(args, &cli.global).map(|()| 0),
        Commands::Dependents(args) => {
            commands::dependents::execute(args, &cli.global).map(|()| 0)
        }
        Commands::Completions(args) => commands::completions::execute(args).map(|()| 0),
    }
}
