//! Load a content directory and report what it holds.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_catalog;

/// Load and cross-check a content directory
#[derive(Parser)]
pub struct Validate {
    /// Directory holding config.toml and the RON catalogs
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let catalog = load_catalog(Some(&self.dir))?;

        println!("Content in {} is valid:", self.dir.display());
        println!("  spells:     {}", catalog.spells.len());
        println!("  effects:    {}", catalog.effects.len());
        println!("  recipes:    {}", catalog.recipes.len());
        println!("  matchups:   {}", catalog.matchups.len());
        println!("  characters: {}", catalog.characters.len());
        println!("  enemies:    {}", catalog.enemies.len());
        println!("  stages:     {}", catalog.stages.len());
        println!("  abilities:  {}", catalog.abilities.len());
        println!("  rule sets:  {}", catalog.rules.len());
        Ok(())
    }
}
