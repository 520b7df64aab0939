//! Print a match stored by the file repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use combat_core::MatchId;
use runtime::{FileMatchRepository, MatchRepository, RuntimeConfig};

use super::print_roster;

/// Print a persisted match
#[derive(Parser)]
pub struct Inspect {
    /// Match id (omit to list stored matches)
    #[arg(value_name = "MATCH")]
    id: Option<u64>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Status line and combatant table
    Summary,
    /// Full JSON output
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let data_dir = self
            .data_dir
            .or_else(|| RuntimeConfig::from_env().data_dir)
            .unwrap_or_else(RuntimeConfig::default_data_dir);
        let repository = FileMatchRepository::new(&data_dir)
            .with_context(|| format!("Failed to open {}", data_dir.display()))?;

        let Some(id) = self.id else {
            let ids = repository.list_ids()?;
            if ids.is_empty() {
                println!("No matches stored in {}", data_dir.display());
            }
            for id in ids {
                println!("{id}");
            }
            return Ok(());
        };

        let combat = repository
            .load(MatchId(id))?
            .with_context(|| format!("Match {id} not found in {}", data_dir.display()))?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&combat)?),
            OutputFormat::Summary => {
                println!(
                    "Match {} ({}, {}) turn {}",
                    combat.id, combat.match_type, combat.status, combat.turn_number
                );
                println!("  owner:   {}", combat.owner);
                println!("  created: {}", combat.created_at.to_rfc3339());
                if let Some(finished) = combat.finished_at {
                    println!("  ended:   {}", finished.to_rfc3339());
                }
                if let Some(winner) = combat.winner {
                    println!("  winner:  {winner}");
                }
                print_roster(&combat);
            }
        }
        Ok(())
    }
}
