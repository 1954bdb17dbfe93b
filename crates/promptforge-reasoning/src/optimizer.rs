//! Step optimization pipeline
//!
//! A draft chain is simplified by a fixed sequence of pure transforms:
//! exact-duplicate removal, consolidation of near-duplicates, dependency
//! ordering, model-specific adaptation, confidence filtering, verbosity
//! shaping and finally the step budget. Each stage takes the steps by value
//! and returns the new sequence, so stages compose and can be used alone.

use log::{debug, warn};
use promptforge_core::{ChainOptimizationConfig, ReasoningStep, StepType, Verbosity};
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::profiles::{model_profile, PreferredStyle};
use crate::text::{normalize, set_similarity, word_set, SIMILARITY_THRESHOLD};

const MINIMAL_WORD_LIMIT: usize = 20;
const DETAIL_SUFFIX: &str = "This step follows from the reasoning established before it.";

/// A dependency edge that closed a cycle and was skipped while ordering.
///
/// `from` depends on `to`, and `to` was still being placed when the edge was
/// reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCycle {
    pub from: String,
    pub to: String,
}

/// Result of dependency ordering
#[derive(Debug, Clone, PartialEq)]
pub struct Linearization {
    pub steps: Vec<ReasoningStep>,
    pub cycles: Vec<DependencyCycle>,
}

impl Linearization {
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Output of the full pipeline, with any cycles met along the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedSteps {
    pub steps: Vec<ReasoningStep>,
    pub cycles: Vec<DependencyCycle>,
}

/// Point references to removed steps at the step that absorbed them.
fn redirect_dependencies(steps: &mut [ReasoningStep], redirects: &HashMap<String, String>) {
    if redirects.is_empty() {
        return;
    }
    for step in steps.iter_mut() {
        let mut seen = HashSet::new();
        let mut dependencies = Vec::with_capacity(step.dependencies.len());
        for dep in &step.dependencies {
            let target = redirects.get(dep).unwrap_or(dep);
            if *target != step.id && seen.insert(target.clone()) {
                dependencies.push(target.clone());
            }
        }
        step.dependencies = dependencies;
    }
}

/// Drop steps whose normalized content repeats an earlier step.
pub fn remove_redundant_steps(steps: Vec<ReasoningStep>) -> Vec<ReasoningStep> {
    let mut first_by_content: HashMap<String, String> = HashMap::new();
    let mut redirects = HashMap::new();
    let mut kept = Vec::with_capacity(steps.len());

    for step in steps {
        let key = normalize(&step.content);
        match first_by_content.get(&key) {
            Some(kept_id) => {
                debug!("Dropping duplicate step {} (same as {})", step.id, kept_id);
                redirects.insert(step.id, kept_id.clone());
            }
            None => {
                first_by_content.insert(key, step.id.clone());
                kept.push(step);
            }
        }
    }

    redirect_dependencies(&mut kept, &redirects);
    kept
}

/// Merge each step with every later step that says nearly the same thing.
///
/// The earliest step of a group survives with its id, content and type; it
/// takes the union of the group's dependencies, the mean confidence, and the
/// other members' content as alternatives.
pub fn consolidate_similar_steps(steps: Vec<ReasoningStep>) -> Vec<ReasoningStep> {
    let word_sets: Vec<_> = steps.iter().map(|step| word_set(&step.content)).collect();
    let mut absorbed = vec![false; steps.len()];
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();

    for i in 0..steps.len() {
        if absorbed[i] {
            continue;
        }
        let mut members = Vec::new();
        for j in (i + 1)..steps.len() {
            if !absorbed[j] && set_similarity(&word_sets[i], &word_sets[j]) > SIMILARITY_THRESHOLD {
                absorbed[j] = true;
                members.push(j);
            }
        }
        groups.push((i, members));
    }

    let mut slots: Vec<Option<ReasoningStep>> = steps.into_iter().map(Some).collect();
    let mut redirects = HashMap::new();
    let mut consolidated = Vec::with_capacity(groups.len());

    for (leader, members) in groups {
        let Some(mut step) = slots[leader].take() else {
            continue;
        };
        if members.is_empty() {
            consolidated.push(step);
            continue;
        }

        let mut confidence_total = step.confidence;
        let mut alternatives = Vec::with_capacity(members.len());
        for member in members.iter().filter_map(|&j| slots[j].take()) {
            for dep in member.dependencies {
                if !step.depends_on(&dep) {
                    step.dependencies.push(dep);
                }
            }
            confidence_total += member.confidence;
            alternatives.push(member.content);
            redirects.insert(member.id, step.id.clone());
        }
        step.confidence = confidence_total / (members.len() + 1) as f64;
        debug!(
            "Consolidated {} similar step(s) into {}",
            alternatives.len(),
            step.id
        );
        step.metadata_mut().alternatives.extend(alternatives);
        consolidated.push(step);
    }

    redirect_dependencies(&mut consolidated, &redirects);
    consolidated
}

/// Depth-first ordering state
struct DependencyOrder<'a> {
    steps: &'a [ReasoningStep],
    index_by_id: HashMap<&'a str, usize>,
    visited: HashSet<usize>,
    rec_stack: HashSet<usize>,
    order: Vec<usize>,
    cycles: Vec<DependencyCycle>,
}

impl<'a> DependencyOrder<'a> {
    fn new(steps: &'a [ReasoningStep]) -> Self {
        let mut index_by_id = HashMap::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            index_by_id.entry(step.id.as_str()).or_insert(index);
        }
        Self {
            steps,
            index_by_id,
            visited: HashSet::new(),
            rec_stack: HashSet::new(),
            order: Vec::with_capacity(steps.len()),
            cycles: Vec::new(),
        }
    }

    fn visit(&mut self, index: usize) {
        if self.visited.contains(&index) {
            return;
        }
        self.rec_stack.insert(index);

        let steps = self.steps;
        let step = &steps[index];
        for dep in &step.dependencies {
            // Unknown ids are left for the validator to report
            let Some(&dep_index) = self.index_by_id.get(dep.as_str()) else {
                continue;
            };
            if self.rec_stack.contains(&dep_index) {
                self.cycles.push(DependencyCycle {
                    from: step.id.clone(),
                    to: dep.clone(),
                });
            } else if !self.visited.contains(&dep_index) {
                self.visit(dep_index);
            }
        }

        self.rec_stack.remove(&index);
        self.visited.insert(index);
        self.order.push(index);
    }
}

/// Order steps so dependencies come before their dependents.
///
/// Steps are visited in their current order, so independent steps keep their
/// relative positions. A dependency on a step that is still being placed
/// closes a cycle: that edge is skipped and recorded, and ordering carries on.
/// The output always contains every input step exactly once, but for steps on
/// a cycle it is not a true topological order.
pub fn reorder_by_dependencies(steps: Vec<ReasoningStep>) -> Linearization {
    let (order, cycles) = {
        let mut sorter = DependencyOrder::new(&steps);
        for index in 0..steps.len() {
            sorter.visit(index);
        }
        (sorter.order, sorter.cycles)
    };

    let mut slots: Vec<Option<ReasoningStep>> = steps.into_iter().map(Some).collect();
    let steps = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    Linearization { steps, cycles }
}

fn hierarchy_rank(step_type: StepType) -> u8 {
    match step_type {
        StepType::Premise => 0,
        StepType::Inference => 1,
        StepType::Validation => 2,
        StepType::Conclusion => 4,
        _ => 3,
    }
}

/// Fit a chain to a model's profile. Unknown models leave the chain as is.
pub fn adapt_to_model(steps: Vec<ReasoningStep>, target_model: &str) -> Vec<ReasoningStep> {
    let Some(profile) = model_profile(target_model) else {
        debug!("No profile for model '{}', skipping adaptation", target_model);
        return steps;
    };

    let mut steps = if steps.len() > profile.max_steps {
        limit_steps(steps, profile.max_steps)
    } else {
        steps
    };

    if profile.requires_explicit {
        for (position, step) in steps.iter_mut().enumerate() {
            step.content = format!("Step {}: {}", position + 1, step.content);
        }
    }

    if profile.preferred_style == PreferredStyle::Hierarchical {
        steps.sort_by_key(|step| hierarchy_rank(step.step_type));
    }

    steps
}

/// Keep steps at or above the confidence threshold.
pub fn filter_by_confidence(steps: Vec<ReasoningStep>, min_confidence: f64) -> Vec<ReasoningStep> {
    steps
        .into_iter()
        .filter(|step| step.confidence >= min_confidence)
        .collect()
}

pub fn apply_verbosity(steps: Vec<ReasoningStep>, verbosity: Verbosity) -> Vec<ReasoningStep> {
    match verbosity {
        Verbosity::Moderate => steps,
        Verbosity::Minimal => steps
            .into_iter()
            .map(|mut step| {
                let words: Vec<&str> = step.content.split_whitespace().collect();
                if words.len() > MINIMAL_WORD_LIMIT {
                    step.content = format!("{}...", words[..MINIMAL_WORD_LIMIT].join(" "));
                }
                step
            })
            .collect(),
        Verbosity::Detailed => steps
            .into_iter()
            .map(|mut step| {
                let original = std::mem::take(&mut step.content);
                step.content = format!("{} {}", original, DETAIL_SUFFIX);
                step.metadata_mut()
                    .evidence
                    .push(format!("Original reasoning: {}", original));
                step
            })
            .collect(),
    }
}

/// Cut a chain down to `max_steps`.
///
/// Premises and conclusions are kept first; the remaining budget goes to the
/// most confident of the other steps. Selected steps keep their incoming
/// relative order so an already ordered chain stays ordered. When the budget
/// cannot even hold every premise and conclusion, premises win.
///
/// The output is not regrouped as premises, then intermediates by confidence,
/// then conclusions; do not rely on that grouping.
pub fn limit_steps(steps: Vec<ReasoningStep>, max_steps: usize) -> Vec<ReasoningStep> {
    if steps.len() <= max_steps {
        return steps;
    }

    let mut premises = Vec::new();
    let mut conclusions = Vec::new();
    let mut intermediate = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        match step.step_type {
            StepType::Premise => premises.push(index),
            StepType::Conclusion => conclusions.push(index),
            _ => intermediate.push(index),
        }
    }

    let mut selected: HashSet<usize> = premises
        .iter()
        .chain(conclusions.iter())
        .take(max_steps)
        .copied()
        .collect();

    let remaining = max_steps.saturating_sub(premises.len() + conclusions.len());
    intermediate.sort_by(|&a, &b| {
        steps[b]
            .confidence
            .partial_cmp(&steps[a].confidence)
            .unwrap_or(Ordering::Equal)
    });
    selected.extend(intermediate.into_iter().take(remaining));

    debug!("Limiting chain from {} to {} steps", steps.len(), selected.len());
    steps
        .into_iter()
        .enumerate()
        .filter(|(index, _)| selected.contains(index))
        .map(|(_, step)| step)
        .collect()
}

/// Run the whole pipeline and report any dependency cycles encountered.
pub fn optimize_steps_with_report(
    steps: Vec<ReasoningStep>,
    config: &ChainOptimizationConfig,
) -> OptimizedSteps {
    let initial = steps.len();

    let steps = remove_redundant_steps(steps);
    let steps = consolidate_similar_steps(steps);

    let Linearization { steps, cycles } = reorder_by_dependencies(steps);
    for cycle in &cycles {
        warn!(
            "Circular dependency: {} -> {} skipped while ordering steps",
            cycle.from, cycle.to
        );
    }

    let steps = match config.target_model.as_deref() {
        Some(model) => adapt_to_model(steps, model),
        None => steps,
    };
    let steps = match config.min_confidence {
        Some(threshold) => filter_by_confidence(steps, threshold),
        None => steps,
    };
    let steps = apply_verbosity(steps, config.verbosity.unwrap_or_default());
    let steps = match config.max_steps {
        Some(max_steps) => limit_steps(steps, max_steps),
        None => steps,
    };

    debug!("Optimized chain from {} to {} steps", initial, steps.len());
    OptimizedSteps { steps, cycles }
}

/// Run the whole pipeline.
pub fn optimize_steps(
    steps: Vec<ReasoningStep>,
    config: &ChainOptimizationConfig,
) -> Vec<ReasoningStep> {
    optimize_steps_with_report(steps, config).steps
}
