//! Common error infrastructure for combat-core.
//!
//! Every fallible operation in the crate returns [`CombatError`]. The taxonomy
//! is deliberately small: callers branch on the variant, not on the message.
//!
//! # Propagation
//!
//! - **Preparation** failures are fatal to a cast and are raised before any
//!   state mutation.
//! - **Application** failures never surface as `CombatError`; they are recorded
//!   as [`crate::combat::CastWarning`]s while sibling effects keep applying.

use crate::state::{
    AbilityId, CharacterId, CombatantId, EffectId, ElementId, EnemyId, Mastery, MatchId, SpellId,
    StageId,
};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. after AP regen)
/// - **Validation**: malformed or disallowed request, do not retry unchanged
/// - **Internal**: unexpected state inconsistency, needs investigation
/// - **Fatal**: data corruption, the match cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for error classification.
///
/// Implemented by [`CombatError`] and by the runtime's error types so logging
/// and metrics can treat them uniformly.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Which resource a cast could not afford.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceShortfall {
    Ap,
    Mp,
    /// No unconsumed charge of the given composite element.
    Charge(ElementId),
}

impl core::fmt::Display for ResourceShortfall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ap => write!(f, "AP"),
            Self::Mp => write!(f, "MP"),
            Self::Charge(element) => write!(f, "charge of element {}", element),
        }
    }
}

/// Entity that a lookup failed to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Missing {
    Spell(SpellId),
    Ability(AbilityId),
    Effect(EffectId),
    Recipe(ElementId),
    Combatant(CombatantId),
    Character(CharacterId),
    Enemy(EnemyId),
    Stage(StageId),
    Match(MatchId),
}

impl core::fmt::Display for Missing {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spell(id) => write!(f, "spell {}", id),
            Self::Ability(id) => write!(f, "ability {}", id),
            Self::Effect(id) => write!(f, "effect {}", id),
            Self::Recipe(id) => write!(f, "recipe for element {}", id),
            Self::Combatant(id) => write!(f, "combatant {}", id),
            Self::Character(id) => write!(f, "character {}", id),
            Self::Enemy(id) => write!(f, "enemy {}", id),
            Self::Stage(id) => write!(f, "stage {}", id),
            Self::Match(id) => write!(f, "match {}", id),
        }
    }
}

/// Errors raised by the combat engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Malformed or disallowed request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Spell, target, recipe or template absent.
    #[error("{0} not found")]
    NotFound(Missing),

    /// Actor does not own the character, match or combatant.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Caster cannot pay for the cast.
    #[error("insufficient {resource}: required {required}, available {available}")]
    ResourceInsufficient {
        resource: ResourceShortfall,
        required: i32,
        available: i32,
    },

    /// Resolver fallback chain exhausted.
    #[error("no castable spell for element {element} at mastery {mastery}")]
    SpellNotFound { element: ElementId, mastery: Mastery },

    /// Match is Finished or Aborted.
    #[error("match {0} has already ended")]
    MatchAlreadyEnded(MatchId),

    /// Unexpected internal or persistence fault.
    #[error("system error: {0}")]
    System(String),
}

impl CombatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::System(message.into())
    }

    pub const fn insufficient(resource: ResourceShortfall, required: i32, available: i32) -> Self {
        Self::ResourceInsufficient {
            resource,
            required,
            available,
        }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            Validation(_) | NotFound(_) | PermissionDenied(_) => ErrorSeverity::Validation,
            ResourceInsufficient { .. } => ErrorSeverity::Recoverable,
            SpellNotFound { .. } => ErrorSeverity::Validation,
            MatchAlreadyEnded(_) => ErrorSeverity::Validation,
            System(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            Validation(_) => "COMBAT_VALIDATION",
            NotFound(_) => "COMBAT_NOT_FOUND",
            PermissionDenied(_) => "COMBAT_PERMISSION_DENIED",
            ResourceInsufficient { .. } => "COMBAT_RESOURCE_INSUFFICIENT",
            SpellNotFound { .. } => "COMBAT_SPELL_NOT_FOUND",
            MatchAlreadyEnded(_) => "COMBAT_MATCH_ALREADY_ENDED",
            System(_) => "COMBAT_SYSTEM",
        }
    }
}

pub type Result<T> = core::result::Result<T, CombatError>;
