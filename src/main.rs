mod calculator;
mod cli;
mod error;
mod export;
mod fmt;
mod html;
mod loader;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod ranker;
mod settings;

use clap::Parser;
use tracing::{debug, error};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();
    debug!("bidline started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Commands::Rank {
            input,
            output,
            format,
            title,
        } => cli::rank::run(&input, &output, format, &title),
        Commands::Show { input, top } => cli::show::run(&input, top),
        Commands::Rates { rates, write } => cli::rates::run(rates.as_deref(), write.as_deref()),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
