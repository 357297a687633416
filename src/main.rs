use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod beads;
mod catalog;
mod cli;
mod config;
mod error;
mod launch;
mod output;
mod plan;
mod probe;
mod scheduler;
mod state;
mod tmux;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("lattice=debug")
    } else {
        EnvFilter::new("lattice=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Launch(args) => cli::launch::execute(args, &cli.config),
        Commands::Tick => cli::tick::execute(&cli.config),
        Commands::Watch(args) => cli::watch::execute(args, &cli.config).await,
        Commands::Status(args) => cli::status::execute(args),
        Commands::Types => cli::types::execute(),
        Commands::Attach => cli::attach::execute(&cli.config),
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
