//! Policy-related domain types.
//!
//! A policy is a named rule with category and severity used to judge
//! content. The active policy set is provided by a [`crate::catalog::PolicyCatalog`]
//! and treated as an immutable snapshot for the duration of one decision.

use serde::{Deserialize, Serialize};

/// Content categories a policy can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyCategory {
    HateSpeech,
    Harassment,
    Spam,
    Nsfw,
    Violence,
    Misinformation,
    SelfHarm,
    Illegal,
}

impl std::fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyCategory::HateSpeech => write!(f, "hate_speech"),
            PolicyCategory::Harassment => write!(f, "harassment"),
            PolicyCategory::Spam => write!(f, "spam"),
            PolicyCategory::Nsfw => write!(f, "nsfw"),
            PolicyCategory::Violence => write!(f, "violence"),
            PolicyCategory::Misinformation => write!(f, "misinformation"),
            PolicyCategory::SelfHarm => write!(f, "self_harm"),
            PolicyCategory::Illegal => write!(f, "illegal"),
        }
    }
}

impl std::str::FromStr for PolicyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hate_speech" | "hate speech" => Ok(PolicyCategory::HateSpeech),
            "harassment" => Ok(PolicyCategory::Harassment),
            "spam" => Ok(PolicyCategory::Spam),
            "nsfw" => Ok(PolicyCategory::Nsfw),
            "violence" => Ok(PolicyCategory::Violence),
            "misinformation" => Ok(PolicyCategory::Misinformation),
            "self_harm" | "self harm" => Ok(PolicyCategory::SelfHarm),
            "illegal" => Ok(PolicyCategory::Illegal),
            other => Err(format!("Unknown policy category: {}", other)),
        }
    }
}

/// Severity of a policy violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

/// Default action a policy prescribes when violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    /// Flag for human review.
    Flag,
    /// Reject outright.
    Reject,
}

impl std::fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyAction::Flag => write!(f, "flag"),
            PolicyAction::Reject => write!(f, "reject"),
        }
    }
}

/// A moderation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Stable identifier cited by the AI in verdicts (e.g. "no-hate-01").
    pub id: String,

    /// Short human-readable title.
    pub title: String,

    /// Content category this policy covers.
    pub category: PolicyCategory,

    /// How severe a violation of this policy is.
    pub severity: Severity,

    /// Full description of what the policy forbids.
    pub description: String,

    /// Example violating strings, shown to the model.
    #[serde(default)]
    pub examples: Vec<String>,

    /// What to do by default when this policy is violated.
    pub default_action: PolicyAction,
}

impl Policy {
    /// Create a new policy with required fields and no examples.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: PolicyCategory,
        severity: Severity,
        description: impl Into<String>,
        default_action: PolicyAction,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            severity,
            description: description.into(),
            examples: Vec::new(),
            default_action,
        }
    }

    /// Attach example violations.
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }
}
