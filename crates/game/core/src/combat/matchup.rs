use crate::env::MatchupOracle;
use crate::state::ElementId;

/// Multiplier for `attacker` hitting `defender`.
///
/// Non-elemental defenders and unknown pairs are neutral (1.0). A missing row
/// is logged and never fails the cast.
pub fn elemental_modifier(
    matchups: &(impl MatchupOracle + ?Sized),
    attacker: ElementId,
    defender: ElementId,
) -> f64 {
    if defender.is_none() {
        return 1.0;
    }
    match matchups.modifier(attacker, defender) {
        Some(multiplier) => multiplier,
        None => {
            tracing::debug!(
                target: "combat::matchup",
                attacker = attacker.0,
                defender = defender.0,
                "no matchup row, using neutral modifier"
            );
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CatalogSnapshot;

    #[test]
    fn missing_rows_and_none_defender_are_neutral() {
        let catalog = CatalogSnapshot::default().with_matchup(ElementId(1), ElementId(2), 2.0);

        assert_eq!(elemental_modifier(&catalog, ElementId(1), ElementId(2)), 2.0);
        assert_eq!(elemental_modifier(&catalog, ElementId(2), ElementId(1)), 1.0);
        assert_eq!(elemental_modifier(&catalog, ElementId(1), ElementId::NONE), 1.0);
    }
}
