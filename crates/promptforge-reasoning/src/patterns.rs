//! Canned chains for the classic reasoning archetypes.

use once_cell::sync::Lazy;
use promptforge_core::{ReasoningChain, ReasoningStep, StepType};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use std::collections::HashMap;

use crate::text::take_chars;

const PATTERN_EFFECTIVENESS: f64 = 0.75;
const STEP_TEXT_CHARS: usize = 100;
const GOAL_TEXT_CHARS: usize = 50;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReasoningPattern {
    Deductive,
    Inductive,
    Abductive,
    Analogical,
}

static PATTERN_ROLES: Lazy<HashMap<ReasoningPattern, [StepType; 4]>> = Lazy::new(|| {
    HashMap::from([
        (
            ReasoningPattern::Deductive,
            [StepType::Premise, StepType::Premise, StepType::Inference, StepType::Conclusion],
        ),
        (
            ReasoningPattern::Inductive,
            [StepType::Example, StepType::Example, StepType::Inference, StepType::Conclusion],
        ),
        (
            ReasoningPattern::Abductive,
            [
                StepType::Observation,
                StepType::Hypothesis,
                StepType::Validation,
                StepType::Conclusion,
            ],
        ),
        (
            ReasoningPattern::Analogical,
            [StepType::Source, StepType::Mapping, StepType::Inference, StepType::Conclusion],
        ),
    ])
});

impl ReasoningPattern {
    /// Ordered step roles for this pattern.
    pub fn roles(&self) -> &'static [StepType] {
        PATTERN_ROLES
            .get(self)
            .map(|roles| roles.as_slice())
            .unwrap_or(&[])
    }
}

/// Build a linear chain following `pattern`, seeded with `text`.
pub fn generate_from_pattern(pattern: ReasoningPattern, text: &str) -> ReasoningChain {
    let excerpt = take_chars(text, STEP_TEXT_CHARS);
    let steps = pattern
        .roles()
        .iter()
        .enumerate()
        .map(|(i, role)| {
            let step = ReasoningStep::new(
                format!("{}_{}", pattern, i),
                format!("{}: {}", role.label(), excerpt),
                *role,
            )
            .with_confidence(0.8 + 0.02 * i as f64)
            .with_source(pattern.to_string());
            if i == 0 {
                step
            } else {
                step.with_dependencies([format!("{}_{}", pattern, i - 1)])
            }
        })
        .collect();

    let goal = format!(
        "Apply {} reasoning to: {}...",
        pattern,
        take_chars(text, GOAL_TEXT_CHARS)
    );
    let mut chain = ReasoningChain::new(steps, goal, text);
    chain.effectiveness = PATTERN_EFFECTIVENESS;
    chain.validated = false;
    chain
}

/// Pattern lookup by name. Unknown names yield `None`.
pub fn generate_from_pattern_name(name: &str, text: &str) -> Option<ReasoningChain> {
    name.parse::<ReasoningPattern>()
        .ok()
        .map(|pattern| generate_from_pattern(pattern, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_pattern_has_four_roles_ending_in_conclusion() {
        for pattern in ReasoningPattern::iter() {
            let roles = pattern.roles();
            assert_eq!(roles.len(), 4);
            assert_eq!(roles[3], StepType::Conclusion);
        }
    }

    #[test]
    fn test_abductive_chain_shape() {
        let chain = generate_from_pattern(ReasoningPattern::Abductive, "Sales dropped on Tuesday");
        let types: Vec<_> = chain.steps.iter().map(|s| s.step_type).collect();
        assert_eq!(
            types,
            vec![
                StepType::Observation,
                StepType::Hypothesis,
                StepType::Validation,
                StepType::Conclusion
            ]
        );
        assert_eq!(chain.steps[0].content, "Observation: Sales dropped on Tuesday");
        assert!(chain.steps[0].dependencies.is_empty());
        assert_eq!(chain.steps[2].dependencies, vec!["abductive_1"]);
        assert!((chain.steps[3].confidence - 0.86).abs() < 1e-9);
        assert_eq!(
            chain.steps[1].metadata.as_ref().and_then(|m| m.source.as_deref()),
            Some("abductive")
        );
        assert_eq!(chain.goal, "Apply abductive reasoning to: Sales dropped on Tuesday...");
        assert_eq!(chain.effectiveness, 0.75);
        assert!(!chain.validated);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "w".repeat(300);
        let chain = generate_from_pattern(ReasoningPattern::Deductive, &text);
        assert_eq!(chain.steps[0].content.len(), "Premise: ".len() + 100);
        assert_eq!(chain.goal.len(), "Apply deductive reasoning to: ".len() + 50 + 3);
    }

    #[test]
    fn test_pattern_name_lookup() {
        assert!(generate_from_pattern_name("Inductive", "x").is_some());
        assert!(generate_from_pattern_name("lateral", "x").is_none());
    }
}
