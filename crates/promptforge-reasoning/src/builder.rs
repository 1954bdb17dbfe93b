//! Draft chain synthesis.

use promptforge_core::{ChainOptimizationConfig, ReasoningStep, StepType};

use crate::text::{first_words, word_count};

const DEFAULT_INTERMEDIATE_STEPS: usize = 5;
/// Premise for the context, premise for the goal, one conclusion.
const FIXED_STEPS: usize = 3;
const MAX_LENGTH_STEPS: usize = 10;
const KEY_POINT_CONFIDENCE: f64 = 0.7;

pub fn step_id(index: usize) -> String {
    format!("step_{}", index)
}

/// How many intermediate steps a prompt of this size warrants.
pub fn estimate_steps(prompt: &str, goal: &str) -> usize {
    let by_length = (prompt.chars().count() / 100).min(MAX_LENGTH_STEPS);
    let by_goal = if word_count(goal) > 10 { 2 } else { 1 };
    by_length + by_goal
}

fn intermediate_content(progress: f64) -> &'static str {
    if progress < 0.3 {
        "Analyzing the initial conditions and constraints"
    } else if progress < 0.6 {
        "Applying logical reasoning to derive intermediate results"
    } else {
        "Synthesizing findings to approach the conclusion"
    }
}

/// Opening words of the first three confident steps.
fn key_points(steps: &[ReasoningStep]) -> String {
    steps
        .iter()
        .filter(|step| step.confidence > KEY_POINT_CONFIDENCE)
        .take(3)
        .map(|step| first_words(&step.content, 5))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the draft chain: two premises, a run of inferences, one conclusion.
/// Each step depends on the one before it.
pub fn build_initial_steps(
    prompt: &str,
    goal: &str,
    context: &str,
    config: &ChainOptimizationConfig,
) -> Vec<ReasoningStep> {
    let mut steps = vec![
        ReasoningStep::new(step_id(0), format!("Given: {}", context), StepType::Premise)
            .with_confidence(1.0),
        ReasoningStep::new(step_id(1), format!("Goal: {}", goal), StepType::Premise)
            .with_dependencies([step_id(0)])
            .with_confidence(1.0),
    ];

    let budget = config
        .max_steps
        .map(|max| max.saturating_sub(FIXED_STEPS))
        .unwrap_or(DEFAULT_INTERMEDIATE_STEPS);
    let intermediate = budget.min(estimate_steps(prompt, goal));

    for i in 0..intermediate {
        let progress = (i + 1) as f64 / intermediate as f64;
        let previous = steps.len() - 1;
        let confidence = (0.8 - 0.05 * i as f64).max(0.0);
        steps.push(
            ReasoningStep::new(
                step_id(steps.len()),
                intermediate_content(progress),
                StepType::Inference,
            )
            .with_dependencies([step_id(previous)])
            .with_confidence(confidence),
        );
    }

    let conclusion = format!(
        "Therefore: {} is achieved through {}",
        goal,
        key_points(&steps)
    );
    let previous = steps.len() - 1;
    steps.push(
        ReasoningStep::new(step_id(steps.len()), conclusion, StepType::Conclusion)
            .with_dependencies([step_id(previous)])
            .with_confidence(0.85),
    );

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_steps() {
        assert_eq!(estimate_steps("short", "a goal"), 1);
        assert_eq!(estimate_steps(&"x".repeat(350), "a goal"), 4);
        assert_eq!(estimate_steps(&"x".repeat(5000), "a goal"), 11);
        let long_goal = "one two three four five six seven eight nine ten eleven";
        assert_eq!(estimate_steps("short", long_goal), 2);
    }

    #[test]
    fn test_build_links_each_step_to_previous() {
        let prompt = "x".repeat(450);
        let steps = build_initial_steps(&prompt, "Grow sales", "Shop data", &Default::default());

        // 4 by length + 1 by goal = 5 inferences
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].content, "Given: Shop data");
        assert!(steps[0].dependencies.is_empty());
        for window in steps.windows(2) {
            assert_eq!(window[1].dependencies, vec![window[0].id.clone()]);
        }
        assert_eq!(steps[2].content, "Analyzing the initial conditions and constraints");
        assert_eq!(steps[3].content, "Applying logical reasoning to derive intermediate results");
        assert_eq!(steps[6].content, "Synthesizing findings to approach the conclusion");
        assert!((steps[6].confidence - 0.6).abs() < 1e-9);
        assert_eq!(steps[7].step_type, StepType::Conclusion);
        assert_eq!(steps[7].confidence, 0.85);
    }

    #[test]
    fn test_max_steps_caps_intermediates() {
        let prompt = "x".repeat(900);
        let config = ChainOptimizationConfig::default().with_max_steps(5);
        let steps = build_initial_steps(&prompt, "goal", "ctx", &config);
        assert_eq!(steps.len(), 5);

        let config = ChainOptimizationConfig::default().with_max_steps(2);
        let steps = build_initial_steps(&prompt, "goal", "ctx", &config);
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_conclusion_quotes_key_points() {
        let steps =
            build_initial_steps("short", "Rank sellers", "Seller list", &Default::default());
        let conclusion = &steps[steps.len() - 1];
        assert_eq!(
            conclusion.content,
            "Therefore: Rank sellers is achieved through Given: Seller list, Goal: Rank sellers, \
             Analyzing the initial conditions and"
        );
    }
}
