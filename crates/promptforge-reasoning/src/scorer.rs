//! Effectiveness rating: how well a chain serves its stated goal.

use promptforge_core::{ReasoningStep, StepType};

use std::collections::HashSet;

const BASE_SCORE: f64 = 0.5;
const GOAL_COVERAGE_BONUS: f64 = 0.3;
const LOGICAL_FLOW_BONUS: f64 = 0.1;
const CONFIDENCE_WEIGHT: f64 = 0.1;

/// Goal words longer than three characters, lowercased.
fn significant_words(goal: &str) -> Vec<String> {
    goal.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .map(str::to_string)
        .collect()
}

/// True when the first conclusion mentions more than half of the goal's
/// significant words.
pub fn conclusion_covers_goal(steps: &[ReasoningStep], goal: &str) -> bool {
    let Some(conclusion) = steps.iter().find(|step| step.step_type == StepType::Conclusion) else {
        return false;
    };
    let words = significant_words(goal);
    if words.is_empty() {
        return false;
    }
    let content = conclusion.content.to_lowercase();
    let covered = words.iter().filter(|word| content.contains(word.as_str())).count();
    covered as f64 > words.len() as f64 / 2.0
}

/// True when every non-premise step depends on at least one step placed
/// before it.
pub fn has_logical_flow(steps: &[ReasoningStep]) -> bool {
    let mut seen: HashSet<&str> = HashSet::with_capacity(steps.len());
    for step in steps {
        if step.step_type != StepType::Premise
            && !step.dependencies.iter().any(|dep| seen.contains(dep.as_str()))
        {
            return false;
        }
        seen.insert(step.id.as_str());
    }
    true
}

pub fn average_confidence(steps: &[ReasoningStep]) -> f64 {
    if steps.is_empty() {
        return 0.0;
    }
    steps.iter().map(|step| step.confidence).sum::<f64>() / steps.len() as f64
}

/// Effectiveness in `[0, 1]`.
pub fn calculate_effectiveness(steps: &[ReasoningStep], goal: &str) -> f64 {
    let mut score = BASE_SCORE;
    if conclusion_covers_goal(steps, goal) {
        score += GOAL_COVERAGE_BONUS;
    }
    if has_logical_flow(steps) {
        score += LOGICAL_FLOW_BONUS;
    }
    score += average_confidence(steps) * CONFIDENCE_WEIGHT;
    score.clamp(0.0, 1.0)
}
