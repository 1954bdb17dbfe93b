//! Chain validation
//!
//! Four independent checks run over the whole chain and every finding is
//! reported; nothing short-circuits. The chain is valid when no check raised
//! a high-severity issue.

use promptforge_core::{
    ChainValidationResult, IssueType, ReasoningChain, Severity, StepType, ValidationIssue,
};

use std::collections::HashSet;

use crate::text::{count_ambiguous_pronouns, set_similarity, word_set, SIMILARITY_THRESHOLD};

const AMBIGUOUS_PRONOUN_LIMIT: usize = 2;
const LONG_CHAIN_STEPS: usize = 10;
const OVERSIZED_CHAIN_STEPS: usize = 15;

const SIMPLIFY_SUGGESTION: &str = "Consider simplifying the reasoning chain for clarity";

fn issue(
    step_id: &str,
    issue_type: IssueType,
    severity: Severity,
    description: String,
) -> ValidationIssue {
    ValidationIssue {
        step_id: step_id.to_string(),
        issue_type,
        severity,
        description,
    }
}

/// Dangling dependency ids, and non-premise steps that depend on nothing.
pub fn check_logical_consistency(chain: &ReasoningChain) -> Vec<ValidationIssue> {
    let ids: HashSet<&str> = chain.steps.iter().map(|step| step.id.as_str()).collect();
    let mut issues = Vec::new();

    for (index, step) in chain.steps.iter().enumerate() {
        for dep in &step.dependencies {
            if !ids.contains(dep.as_str()) {
                issues.push(issue(
                    &step.id,
                    IssueType::MissingConnection,
                    Severity::High,
                    format!("Step {} depends on missing step {}", step.id, dep),
                ));
            }
        }

        if index > 0 && step.dependencies.is_empty() && step.step_type != StepType::Premise {
            issues.push(issue(
                &step.id,
                IssueType::MissingConnection,
                Severity::Medium,
                format!(
                    "Step {} ({}) has no dependencies but is not a premise",
                    step.id, step.step_type
                ),
            ));
        }
    }

    issues
}

/// Steps nothing builds on, other than conclusions and the final step.
pub fn check_connectivity(chain: &ReasoningChain) -> Vec<ValidationIssue> {
    let referenced: HashSet<&str> = chain
        .steps
        .iter()
        .flat_map(|step| step.dependencies.iter().map(String::as_str))
        .collect();
    let last = chain.steps.len().saturating_sub(1);

    chain
        .steps
        .iter()
        .enumerate()
        .filter(|(index, step)| {
            *index != last
                && step.step_type != StepType::Conclusion
                && !referenced.contains(step.id.as_str())
        })
        .map(|(_, step)| {
            issue(
                &step.id,
                IssueType::MissingConnection,
                Severity::Low,
                format!("Step {} is orphaned: no later step depends on it", step.id),
            )
        })
        .collect()
}

/// One issue on the later step of every near-duplicate pair.
pub fn check_redundancy(chain: &ReasoningChain) -> Vec<ValidationIssue> {
    let word_sets: Vec<_> = chain.steps.iter().map(|step| word_set(&step.content)).collect();
    let mut issues = Vec::new();

    for i in 0..chain.steps.len() {
        for j in (i + 1)..chain.steps.len() {
            let similarity = set_similarity(&word_sets[i], &word_sets[j]);
            if similarity > SIMILARITY_THRESHOLD {
                issues.push(issue(
                    &chain.steps[j].id,
                    IssueType::Redundancy,
                    Severity::Low,
                    format!(
                        "Step {} repeats step {} ({:.0}% word overlap)",
                        chain.steps[j].id,
                        chain.steps[i].id,
                        similarity * 100.0
                    ),
                ));
            }
        }
    }

    issues
}

/// Steps leaning on too many unresolved pronouns.
pub fn check_ambiguity(chain: &ReasoningChain) -> Vec<ValidationIssue> {
    chain
        .steps
        .iter()
        .filter_map(|step| {
            let count = count_ambiguous_pronouns(&step.content);
            (count > AMBIGUOUS_PRONOUN_LIMIT).then(|| {
                issue(
                    &step.id,
                    IssueType::Ambiguity,
                    Severity::Low,
                    format!("Step {} uses {} ambiguous pronouns", step.id, count),
                )
            })
        })
        .collect()
}

fn suggestion_for(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::LogicalError => "Review the logical flow between steps for consistency",
        IssueType::MissingConnection => "Add explicit connections between related reasoning steps",
        IssueType::Redundancy => "Remove or consolidate redundant reasoning steps",
        IssueType::Ambiguity => "Replace ambiguous pronouns with explicit references",
    }
}

fn suggestions(chain: &ReasoningChain, issues: &[ValidationIssue]) -> Vec<String> {
    let present: HashSet<IssueType> = issues.iter().map(|issue| issue.issue_type).collect();
    let mut suggestions: Vec<String> = [
        IssueType::LogicalError,
        IssueType::MissingConnection,
        IssueType::Redundancy,
        IssueType::Ambiguity,
    ]
    .into_iter()
    .filter(|issue_type| present.contains(issue_type))
    .map(|issue_type| suggestion_for(issue_type).to_string())
    .collect();

    if chain.steps.len() > LONG_CHAIN_STEPS {
        suggestions.push(SIMPLIFY_SUGGESTION.to_string());
    }
    suggestions
}

/// Quality score in `[0, 1]`: penalties per issue, a bonus for a
/// well-sized chain, a penalty for an oversized one.
pub fn score_chain(step_count: usize, issues: &[ValidationIssue]) -> f64 {
    let mut score = 1.0;
    for issue in issues {
        score -= issue.severity.penalty();
    }
    if (3..=LONG_CHAIN_STEPS).contains(&step_count) {
        score += 0.1;
    }
    if step_count > OVERSIZED_CHAIN_STEPS {
        score -= 0.2;
    }
    score.clamp(0.0, 1.0)
}

/// Audit a chain.
pub fn validate_chain(chain: &ReasoningChain) -> ChainValidationResult {
    let mut issues = check_logical_consistency(chain);
    issues.extend(check_connectivity(chain));
    issues.extend(check_redundancy(chain));
    issues.extend(check_ambiguity(chain));

    let valid = !issues.iter().any(|issue| issue.severity == Severity::High);
    let suggestions = suggestions(chain, &issues);
    let overall_score = score_chain(chain.steps.len(), &issues);

    ChainValidationResult {
        valid,
        issues,
        suggestions,
        overall_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptforge_core::ReasoningStep;

    fn chain(steps: Vec<ReasoningStep>) -> ReasoningChain {
        ReasoningChain::new(steps, "goal", "context")
    }

    fn linear_chain() -> ReasoningChain {
        chain(vec![
            ReasoningStep::new("p", "Given: sales figures by month", StepType::Premise),
            ReasoningStep::new("i", "Compute the quarterly growth rate", StepType::Inference)
                .with_dependencies(["p"]),
            ReasoningStep::new("c", "Therefore: growth is steady", StepType::Conclusion)
                .with_dependencies(["i"]),
        ])
    }

    #[test]
    fn test_clean_chain_scores_full_marks() {
        let result = validate_chain(&linear_chain());
        assert!(result.valid);
        assert!(result.issues.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.overall_score, 1.0);
    }

    #[test]
    fn test_missing_dependency_is_high_severity() {
        let mut chain = linear_chain();
        chain.steps[2].dependencies.push("ghost".to_string());
        let result = validate_chain(&chain);
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(
            result.suggestions,
            vec!["Add explicit connections between related reasoning steps"]
        );
        assert!((result.overall_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unanchored_inference_is_medium() {
        let mut chain = linear_chain();
        chain.steps[1].dependencies.clear();
        let issues = check_logical_consistency(&chain);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].step_id, "i");
    }

    #[test]
    fn test_orphan_detection_skips_conclusions_and_last_step() {
        let chain = chain(vec![
            ReasoningStep::new("p", "Given: x", StepType::Premise),
            ReasoningStep::new("q", "Given: y", StepType::Premise),
            ReasoningStep::new("c", "Therefore: z", StepType::Conclusion).with_dependencies(["p"]),
            ReasoningStep::new("tail", "Note: w", StepType::Inference).with_dependencies(["c"]),
        ]);
        let issues = check_connectivity(&chain);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].step_id, "q");
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_redundancy_flags_later_step() {
        let chain = chain(vec![
            ReasoningStep::new("a", "rank the top sellers by revenue", StepType::Premise),
            ReasoningStep::new("b", "Rank the top sellers by revenue!", StepType::Premise),
        ]);
        let issues = check_redundancy(&chain);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].step_id, "b");
    }

    #[test]
    fn test_ambiguity_needs_more_than_two_pronouns() {
        let chain = chain(vec![
            ReasoningStep::new("a", "This means that it works", StepType::Premise),
            ReasoningStep::new("b", "This means it works", StepType::Premise),
        ]);
        let issues = check_ambiguity(&chain);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].step_id, "a");
    }

    #[test]
    fn test_score_bounds_and_size_adjustments() {
        assert_eq!(score_chain(2, &[]), 1.0);
        assert!((score_chain(16, &[]) - 0.8).abs() < 1e-9);

        let many: Vec<_> = (0..10)
            .map(|i| issue(&i.to_string(), IssueType::LogicalError, Severity::High, String::new()))
            .collect();
        assert_eq!(score_chain(5, &many), 0.0);

        let unknown = vec![issue("x", IssueType::Ambiguity, Severity::Unknown, String::new())];
        assert!((score_chain(2, &unknown) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_long_chain_gets_simplify_suggestion() {
        let steps = (0..11)
            .map(|i| {
                let step = ReasoningStep::new(
                    format!("s{}", i),
                    format!("distinct step number {}", i),
                    StepType::Inference,
                );
                if i == 0 {
                    step
                } else {
                    step.with_dependencies([format!("s{}", i - 1)])
                }
            })
            .collect();
        let result = validate_chain(&chain(steps));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == SIMPLIFY_SUGGESTION));
    }
}
