use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role a reasoning step plays within a chain.
///
/// The last four variants are only produced by pattern-based generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StepType {
    Premise,
    Inference,
    Conclusion,
    Example,
    Validation,
    Observation,
    Hypothesis,
    Source,
    Mapping,
}

impl StepType {
    /// Capitalized label used when a step's content is prefixed by its role.
    pub fn label(&self) -> &'static str {
        match self {
            StepType::Premise => "Premise",
            StepType::Inference => "Inference",
            StepType::Conclusion => "Conclusion",
            StepType::Example => "Example",
            StepType::Validation => "Validation",
            StepType::Observation => "Observation",
            StepType::Hypothesis => "Hypothesis",
            StepType::Source => "Source",
            StepType::Mapping => "Mapping",
        }
    }
}

/// Optional provenance attached to a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Content of steps merged into this one during consolidation
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// A single unit of reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StepMetadata>,
}

impl ReasoningStep {
    pub fn new(id: impl Into<String>, content: impl Into<String>, step_type: StepType) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            step_type,
            dependencies: Vec::new(),
            confidence: 1.0,
            metadata: None,
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata_mut().source = Some(source.into());
        self
    }

    /// Metadata block, created on first access.
    pub fn metadata_mut(&mut self) -> &mut StepMetadata {
        self.metadata.get_or_insert_with(StepMetadata::default)
    }

    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == id)
    }
}

/// Ordered, dependency-linked sequence of reasoning steps.
///
/// `steps` order is presentation order; dependencies are expected to appear
/// before their dependents, except where a dependency cycle was linearized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningChain {
    pub steps: Vec<ReasoningStep>,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub effectiveness: f64,
    #[serde(default)]
    pub validated: bool,
}

impl ReasoningChain {
    pub fn new(
        steps: Vec<ReasoningStep>,
        goal: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            steps,
            goal: goal.into(),
            context: context.into(),
            effectiveness: 0.0,
            validated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: &str) -> Option<&ReasoningStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Step contents in presentation order.
    pub fn reasoning_lines(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.content.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IssueType {
    LogicalError,
    MissingConnection,
    Redundancy,
    Ambiguity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    /// Any severity this version does not recognize; scored like `Low`.
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Amount subtracted from a chain's validation score per issue.
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::High => 0.3,
            Severity::Medium => 0.15,
            Severity::Low | Severity::Unknown => 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub step_id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub suggestions: Vec<String>,
    pub overall_score: f64,
}

impl ChainValidationResult {
    pub fn issues_of(&self, issue_type: IssueType) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.issue_type == issue_type)
    }
}

/// The slice of a prompt template the reasoning engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            content: content.into(),
        }
    }
}
