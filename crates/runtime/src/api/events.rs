//! Events emitted by match workers for front-ends to observe.
//!
//! Consumers subscribe to [`MatchEvent`] to react to match changes without
//! blocking the workers.
use combat_core::{ActionOutcome, CombatError, CombatantId, MatchId, MatchType, PlayerId, Team};

#[derive(Debug, Clone)]
pub enum MatchEvent {
    MatchCreated {
        match_id: MatchId,
        owner: PlayerId,
        match_type: MatchType,
    },
    /// An action was applied and persisted.
    ActionPerformed {
        match_id: MatchId,
        caster: CombatantId,
        outcome: Box<ActionOutcome>,
    },
    /// An action was rejected; the match is unchanged.
    ActionRejected {
        match_id: MatchId,
        caster: CombatantId,
        error: CombatError,
    },
    MatchFinished {
        match_id: MatchId,
        winner: Team,
    },
    MatchAborted {
        match_id: MatchId,
    },
}

impl MatchEvent {
    pub fn match_id(&self) -> MatchId {
        match self {
            Self::MatchCreated { match_id, .. }
            | Self::ActionPerformed { match_id, .. }
            | Self::ActionRejected { match_id, .. }
            | Self::MatchFinished { match_id, .. }
            | Self::MatchAborted { match_id } => *match_id,
        }
    }
}
