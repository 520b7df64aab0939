//! Traits describing read-only combat master data.
//!
//! Oracles expose spells, effects, recipes, elemental matchups, templates and
//! numeric rules. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod config;
mod effects;
mod error;
mod matchups;
mod recipes;
mod roster;
mod snapshot;
mod spells;

pub use config::{ConfigKey, ConfigOracle};
pub use effects::{CleanseFilter, Effect, EffectFlags, EffectKind, EffectOracle};
pub use error::OracleError;
pub use matchups::{ElementalMatchup, MatchupOracle};
pub use recipes::{Recipe, RecipeIngredient, RecipeOracle};
pub use roster::{CharacterTemplate, Deck, EnemyTemplate, NpcAbility, RosterOracle, Stage};
pub use snapshot::CatalogSnapshot;
pub use spells::{ConditionKind, EffectCondition, Spell, SpellEffect, SpellOracle, TargetType};

/// Aggregates read-only oracles required by the combat engine.
pub struct Env<'a, S, E, R, M, O, C>
where
    S: SpellOracle + ?Sized,
    E: EffectOracle + ?Sized,
    R: RecipeOracle + ?Sized,
    M: MatchupOracle + ?Sized,
    O: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    spells: Option<&'a S>,
    effects: Option<&'a E>,
    recipes: Option<&'a R>,
    matchups: Option<&'a M>,
    roster: Option<&'a O>,
    config: Option<&'a C>,
}

// Derived Clone/Copy would require the oracle types themselves to be Copy.
impl<S, E, R, M, O, C> Clone for Env<'_, S, E, R, M, O, C>
where
    S: SpellOracle + ?Sized,
    E: EffectOracle + ?Sized,
    R: RecipeOracle + ?Sized,
    M: MatchupOracle + ?Sized,
    O: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E, R, M, O, C> Copy for Env<'_, S, E, R, M, O, C>
where
    S: SpellOracle + ?Sized,
    E: EffectOracle + ?Sized,
    R: RecipeOracle + ?Sized,
    M: MatchupOracle + ?Sized,
    O: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<
    'a,
    dyn SpellOracle + 'a,
    dyn EffectOracle + 'a,
    dyn RecipeOracle + 'a,
    dyn MatchupOracle + 'a,
    dyn RosterOracle + 'a,
    dyn ConfigOracle + 'a,
>;

impl<'a, S, E, R, M, O, C> Env<'a, S, E, R, M, O, C>
where
    S: SpellOracle + ?Sized,
    E: EffectOracle + ?Sized,
    R: RecipeOracle + ?Sized,
    M: MatchupOracle + ?Sized,
    O: RosterOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(
        spells: Option<&'a S>,
        effects: Option<&'a E>,
        recipes: Option<&'a R>,
        matchups: Option<&'a M>,
        roster: Option<&'a O>,
        config: Option<&'a C>,
    ) -> Self {
        Self {
            spells,
            effects,
            recipes,
            matchups,
            roster,
            config,
        }
    }

    pub fn with_all(
        spells: &'a S,
        effects: &'a E,
        recipes: &'a R,
        matchups: &'a M,
        roster: &'a O,
        config: &'a C,
    ) -> Self {
        Self::new(
            Some(spells),
            Some(effects),
            Some(recipes),
            Some(matchups),
            Some(roster),
            Some(config),
        )
    }

    pub fn empty() -> Self {
        Self {
            spells: None,
            effects: None,
            recipes: None,
            matchups: None,
            roster: None,
            config: None,
        }
    }

    /// Returns the SpellOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpellsNotAvailable` if no spell oracle was provided.
    pub fn spells(&self) -> Result<&'a S, OracleError> {
        self.spells.ok_or(OracleError::SpellsNotAvailable)
    }

    pub fn effects(&self) -> Result<&'a E, OracleError> {
        self.effects.ok_or(OracleError::EffectsNotAvailable)
    }

    pub fn recipes(&self) -> Result<&'a R, OracleError> {
        self.recipes.ok_or(OracleError::RecipesNotAvailable)
    }

    /// Returns the MatchupOracle, or an error if not available.
    ///
    /// Callers that only need a multiplier should go through
    /// [`crate::combat::elemental_modifier`], which fails open.
    pub fn matchups(&self) -> Result<&'a M, OracleError> {
        self.matchups.ok_or(OracleError::MatchupsNotAvailable)
    }

    pub fn roster(&self) -> Result<&'a O, OracleError> {
        self.roster.ok_or(OracleError::RosterNotAvailable)
    }

    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, S, E, R, M, O, C> Env<'a, S, E, R, M, O, C>
where
    S: SpellOracle + 'a,
    E: EffectOracle + 'a,
    R: RecipeOracle + 'a,
    M: MatchupOracle + 'a,
    O: RosterOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let spells: Option<&'a dyn SpellOracle> = self.spells.map(|o| o as _);
        let effects: Option<&'a dyn EffectOracle> = self.effects.map(|o| o as _);
        let recipes: Option<&'a dyn RecipeOracle> = self.recipes.map(|o| o as _);
        let matchups: Option<&'a dyn MatchupOracle> = self.matchups.map(|o| o as _);
        let roster: Option<&'a dyn RosterOracle> = self.roster.map(|o| o as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|o| o as _);
        Env::new(spells, effects, recipes, matchups, roster, config)
    }
}
