// Declare modules
pub mod cli;
pub mod config;
pub mod models;
pub mod organizer;
pub mod prompt;

use anyhow::Result;
use clap::Parser;

use self::cli::Cli;
use self::config::resolve_options;
use self::models::{Policy, RunOutcome};
use self::organizer::Organizer;
use self::prompt::ConsoleResolver;

/// Initializes components and orchestrates one organizing run.
pub fn run() -> Result<RunOutcome> {
    // 1. Parse args
    let args = Cli::parse();

    // 2. Fill in anything missing from the console
    let options = resolve_options(args)?;

    log::info!(
        "organizing {} source(s) into {}",
        options.sources.len(),
        options.destination.display()
    );

    // 3. Walk every source and place its files
    let policy = if options.auto {
        Policy::AlwaysContinue
    } else {
        Policy::AskEachTime
    };
    let resolver = ConsoleResolver::new(policy);
    let mut organizer = Organizer::new(&options, resolver)?;

    organizer.apply(&options.sources)
}
