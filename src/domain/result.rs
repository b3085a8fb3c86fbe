//! Result-related domain types.
//!
//! Represents the engine's final decision for a piece of content, plus the
//! record handed to persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Content, ContentType, ParsedAiVerdict, Policy, PolicyCategory, ReviewStatus, Severity, Verdict,
};

/// A quoted evidence span the model claims exists in a content field.
///
/// The quote is verbatim model output and may not byte-match the source;
/// locating it is the evidence highlighter's job, and failure to locate it
/// is non-fatal (the issue is simply not rendered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightIssue {
    /// Name of the content field the quote allegedly appears in.
    pub field: String,

    /// The quoted snippet, exactly as the model emitted it.
    pub quote: String,

    /// Label of the policy this evidence supports.
    pub policy: String,

    /// Severity of the violation this evidence shows.
    pub severity: Severity,

    /// Why this span is problematic.
    pub reason: String,
}

/// Snapshot of a cited policy, captured at decision time.
///
/// Not a live reference: later edits to the catalog do not alter what a
/// stored result says it was judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCitation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl PolicyCitation {
    /// Capture a citation snapshot from a policy.
    pub fn from_policy(policy: &Policy) -> Self {
        Self {
            id: policy.id.clone(),
            title: policy.title.clone(),
            description: policy.description.clone(),
            severity: policy.severity,
        }
    }
}

/// The engine's final decision for one moderation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    /// Unique identifier for this result.
    pub id: Uuid,

    /// Reconciled verdict.
    pub verdict: Verdict,

    /// Violated category, if any.
    pub category: Option<PolicyCategory>,

    /// Model confidence in [0, 1].
    pub confidence: f64,

    /// Cited policy snapshot, if the model named one that exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_violated: Option<PolicyCitation>,

    /// Model's explanation.
    pub reasoning: String,

    /// Name of the model that produced the verdict.
    pub ai_model: String,

    /// Wall time of the AI invocation in milliseconds.
    pub response_time_ms: u64,

    /// Quoted evidence, in the order the model emitted it.
    #[serde(default)]
    pub highlighted_issues: Vec<HighlightIssue>,

    /// Human review workflow state. Seeded by the pipeline, mutated only
    /// by human action afterwards.
    pub review_status: ReviewStatus,

    /// Unrecognized model-output fields, preserved for forward
    /// compatibility.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,

    /// When this result was created.
    pub created_at: DateTime<Utc>,
}

impl ModerationResult {
    /// Assemble a result from a reconciled verdict.
    ///
    /// The review status is seeded here: safe content is auto-approved,
    /// everything else waits for a human.
    pub fn assemble(
        parsed: ParsedAiVerdict,
        verdict: Verdict,
        citation: Option<PolicyCitation>,
        ai_model: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        let review_status = if verdict == Verdict::Safe {
            ReviewStatus::Approved
        } else {
            ReviewStatus::Pending
        };

        Self {
            id: Uuid::new_v4(),
            verdict,
            category: parsed.category,
            confidence: parsed.confidence,
            policy_violated: citation,
            reasoning: parsed.reasoning,
            ai_model: ai_model.into(),
            response_time_ms,
            highlighted_issues: parsed.highlighted_issues,
            review_status,
            extensions: parsed.extensions,
            created_at: Utc::now(),
        }
    }

    /// Apply a human review action. The AI-derived fields are never
    /// touched.
    pub fn set_review_status(&mut self, status: ReviewStatus) {
        self.review_status = status;
    }
}

/// What gets handed to persistence: the result plus request metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRecord {
    /// Identifier of the content in the caller's system.
    pub content_id: String,

    /// The raw content that was judged.
    pub content: Content,

    /// Kind of content.
    pub content_type: ContentType,

    /// Author of the content.
    pub user_id: String,

    /// The decision.
    pub result: ModerationResult,

    /// When the request entered the pipeline.
    pub requested_at: DateTime<Utc>,

    /// When the record was assembled.
    pub recorded_at: DateTime<Utc>,
}
