//! Verdict-related domain types.
//!
//! A verdict is the classification the engine assigns to content. The
//! parsed form ([`ParsedAiVerdict`]) is what the response parser guarantees
//! to produce from any model output whatsoever.

use serde::{Deserialize, Serialize};

use crate::domain::{HighlightIssue, PolicyCategory};

/// Final classification for a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Content is acceptable.
    Safe,
    /// Content needs human review.
    Flagged,
    /// Content violates policy and should be removed.
    Rejected,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Safe => write!(f, "safe"),
            Verdict::Flagged => write!(f, "flagged"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Ok(Verdict::Safe),
            "flagged" => Ok(Verdict::Flagged),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(format!("Unknown verdict: {}", other)),
        }
    }
}

/// Human-moderator workflow state layered on top of the AI verdict.
///
/// Mutated only by human review actions, never by the pipeline after the
/// initial seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting human review.
    Pending,
    /// Approved by a human (or auto-approved for safe content).
    Approved,
    /// Rejected by a human.
    Rejected,
    /// Dismissed without action.
    Ignored,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
            ReviewStatus::Ignored => write!(f, "ignored"),
        }
    }
}

/// The verdict record extracted from a raw model response.
///
/// Structurally valid by construction: the parser clamps confidence into
/// [0, 1], reduces multi-value categories to one, and substitutes defaults
/// for anything missing or malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedAiVerdict {
    /// Classification as reported by the model (pre-reconciliation).
    pub verdict: Verdict,

    /// Single violated category, if the model named a recognized one.
    pub category: Option<PolicyCategory>,

    /// Model-reported certainty, always within [0, 1].
    pub confidence: f64,

    /// ID of the policy the model claims was violated.
    pub policy_violated: Option<String>,

    /// Model's explanation of the verdict.
    pub reasoning: String,

    /// Quoted evidence spans the model claims exist in the content.
    #[serde(default)]
    pub highlighted_issues: Vec<HighlightIssue>,

    /// Unrecognized fields from the model response, preserved for
    /// forward compatibility.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl ParsedAiVerdict {
    /// Conservative fallback used whenever the model response cannot be
    /// understood: flag for human review at neutral confidence.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Flagged,
            category: None,
            confidence: 0.5,
            policy_violated: None,
            reasoning: reason.into(),
            highlighted_issues: Vec::new(),
            extensions: serde_json::Map::new(),
        }
    }
}
