//! Per-model structural constraints applied during optimization.

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::Display;

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PreferredStyle {
    Sequential,
    Hierarchical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    /// Longest chain the model handles well
    pub max_steps: usize,
    /// Whether steps should be numbered explicitly in their content
    pub requires_explicit: bool,
    pub preferred_style: PreferredStyle,
}

static MODEL_PROFILES: Lazy<BTreeMap<&'static str, ModelProfile>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "gpt-4",
            ModelProfile {
                max_steps: 10,
                requires_explicit: false,
                preferred_style: PreferredStyle::Sequential,
            },
        ),
        (
            "gpt-3.5-turbo",
            ModelProfile {
                max_steps: 7,
                requires_explicit: true,
                preferred_style: PreferredStyle::Sequential,
            },
        ),
        (
            "claude-3-opus",
            ModelProfile {
                max_steps: 12,
                requires_explicit: false,
                preferred_style: PreferredStyle::Hierarchical,
            },
        ),
        (
            "claude-3-sonnet",
            ModelProfile {
                max_steps: 10,
                requires_explicit: false,
                preferred_style: PreferredStyle::Hierarchical,
            },
        ),
        (
            "gemini-pro",
            ModelProfile {
                max_steps: 8,
                requires_explicit: true,
                preferred_style: PreferredStyle::Sequential,
            },
        ),
    ])
});

/// Profile for a model name, matched case-insensitively. Unknown models
/// have no profile.
pub fn model_profile(model: &str) -> Option<&'static ModelProfile> {
    MODEL_PROFILES.get(model.trim().to_ascii_lowercase().as_str())
}

/// All known profiles, ordered by model name.
pub fn model_profiles() -> impl Iterator<Item = (&'static str, &'static ModelProfile)> {
    MODEL_PROFILES.iter().map(|(name, profile)| (*name, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let profile = model_profile(" GPT-3.5-Turbo ").unwrap();
        assert_eq!(profile.max_steps, 7);
        assert!(profile.requires_explicit);
    }

    #[test]
    fn test_unknown_model_has_no_profile() {
        assert!(model_profile("llama-70b").is_none());
    }

    #[test]
    fn test_profiles_listed_in_name_order() {
        let names: Vec<_> = model_profiles().map(|(name, _)| name).collect();
        assert_eq!(names.first(), Some(&"claude-3-opus"));
        assert_eq!(names.len(), 5);
    }
}
