//! Combat simulator binary.
//!
//! Composition root that loads content, builds the [`runtime::Runtime`] and
//! drives matches from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Scripted story match with bundled content
//! cargo run -p combat-client -- play --stage 1
//!
//! # Persist matches and inspect one afterwards
//! cargo run -p combat-client -- play --persist --enemy 1 --enemy 3
//! cargo run -p combat-client -- inspect 1 --format json
//! ```

mod autoplay;
mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Play, Validate};

/// Elemental combat simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Run and inspect elemental combat matches", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a scripted match against NPCs
    Play(Play),

    /// Print a persisted match
    Inspect(Inspect),

    /// Load and cross-check a content directory
    Validate(Validate),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
    }
}
