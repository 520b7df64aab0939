//! Priority-rule AI for NPC combatants.
//!
//! Each enemy owns an [`AiRuleSet`]. On its turn the rules are scanned in
//! ascending priority and the first rule whose target resolves and whose
//! condition holds decides the move. Rule sets always end in an `Always`
//! rule, so a decision is always reached.
mod decision;
mod rules;

pub use decision::{AiDecision, decide, resolve_target};
pub use rules::{AiAction, AiCondition, AiRule, AiRuleError, AiRuleSet, TargetSelector};
