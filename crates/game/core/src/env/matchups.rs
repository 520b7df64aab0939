use crate::state::ElementId;

/// Elemental advantage table.
pub trait MatchupOracle: Send + Sync {
    /// Stored multiplier for `attacker` hitting `defender`, if any row exists.
    fn modifier(&self, attacker: ElementId, defender: ElementId) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementalMatchup {
    pub attacker: ElementId,
    pub defender: ElementId,
    pub multiplier: f64,
}
