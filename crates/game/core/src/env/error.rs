//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity, GameError};

/// A required oracle was not supplied to the [`super::Env`].
///
/// Missing catalog *rows* are not oracle errors; the engine reports those as
/// [`CombatError::NotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SpellOracle not available")]
    SpellsNotAvailable,

    #[error("EffectOracle not available")]
    EffectsNotAvailable,

    #[error("RecipeOracle not available")]
    RecipesNotAvailable,

    #[error("MatchupOracle not available")]
    MatchupsNotAvailable,

    #[error("RosterOracle not available")]
    RosterNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // The engine cannot proceed without its catalogs.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SpellsNotAvailable => "ORACLE_SPELLS_NOT_AVAILABLE",
            EffectsNotAvailable => "ORACLE_EFFECTS_NOT_AVAILABLE",
            RecipesNotAvailable => "ORACLE_RECIPES_NOT_AVAILABLE",
            MatchupsNotAvailable => "ORACLE_MATCHUPS_NOT_AVAILABLE",
            RosterNotAvailable => "ORACLE_ROSTER_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
        }
    }
}

impl From<OracleError> for CombatError {
    fn from(err: OracleError) -> Self {
        CombatError::System(err.to_string())
    }
}
