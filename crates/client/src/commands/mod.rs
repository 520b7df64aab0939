//! Subcommands of the `combat-sim` binary.

mod inspect;
mod play;
mod validate;

pub use inspect::Inspect;
pub use play::Play;
pub use validate::Validate;

use std::path::Path;

use anyhow::{Context, Result};
use combat_content::{ContentFactory, bundled_catalog};
use combat_core::{CatalogSnapshot, CombatMatch};

/// Loads content from `dir`, or the bundled data set when no directory is given.
fn load_catalog(dir: Option<&Path>) -> Result<CatalogSnapshot> {
    match dir {
        Some(dir) => ContentFactory::new(dir)
            .build_catalog()
            .with_context(|| format!("Failed to load content from {}", dir.display())),
        None => bundled_catalog().context("Failed to load bundled content"),
    }
}

fn print_roster(combat: &CombatMatch) {
    for c in &combat.combatants {
        let shield = c.shield_amount();
        println!(
            "  [{}] {:<14} {:>6}  HP {:>3}/{:<3} MP {:>2}/{:<2} AP {:>2}{}{}",
            c.id.0,
            c.name,
            c.team(),
            c.hp,
            c.max_hp,
            c.mp,
            c.max_mp,
            c.ap,
            if shield > 0 { format!("  shield {shield}") } else { String::new() },
            if c.is_alive() { "" } else { "  (defeated)" },
        );
    }
}
