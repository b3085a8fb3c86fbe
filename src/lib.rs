//! Arbiter Core - policy-driven content moderation decision engine.
//!
//! Given a piece of user-generated content and a catalog of textual
//! policies, produces a verdict (safe / flagged / rejected), a confidence
//! score, a cited policy snapshot, and quoted evidence spans located in
//! the original text.
//!
//! The moderation pipeline never fails on account of the AI model: any
//! transport or parsing fault collapses to a "flagged" verdict awaiting
//! human review. The only propagated errors are a missing policy set and
//! a persistence fault.
//!
//! ```no_run
//! use std::sync::Arc;
//! use arbiter_core::catalog::StaticCatalog;
//! use arbiter_core::domain::{ContentType, ModerationRequest, Policy, PolicyAction,
//!     PolicyCategory, Severity};
//! use arbiter_core::engine::{ModerationOrchestrator, OpenRouterClient, OpenRouterConfig};
//! use arbiter_core::highlight::highlight;
//! use arbiter_core::storage::InMemoryStore;
//!
//! # async fn run() -> arbiter_core::error::ArbiterResult<()> {
//! let catalog = Arc::new(StaticCatalog::new(vec![Policy::new(
//!     "no-spam-01",
//!     "No spam",
//!     PolicyCategory::Spam,
//!     Severity::Low,
//!     "Unsolicited promotional content",
//!     PolicyAction::Flag,
//! )]));
//! let client = Arc::new(OpenRouterClient::new(OpenRouterConfig::default()));
//! let store = Arc::new(InMemoryStore::new());
//! let orchestrator = ModerationOrchestrator::new(catalog, client, store, 0.7);
//!
//! let request = ModerationRequest::text("c1", "u1", "BUY NOW!!!", ContentType::Comment);
//! let text = "BUY NOW!!!";
//! let result = orchestrator.moderate(request).await?;
//! let segments = highlight(text, &result.highlighted_issues, "body");
//! # let _ = segments;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod storage;

pub use catalog::{PolicyCatalog, StaticCatalog};
pub use domain::{
    Content, ContentType, HighlightIssue, ModerationRecord, ModerationRequest, ModerationResult,
    ParsedAiVerdict, Policy, PolicyAction, PolicyCategory, PolicyCitation, ReviewStatus, Severity,
    Verdict,
};
pub use engine::{
    build_prompt, parse_verdict, reconcile, AiClient, AiClientError, ModerationOrchestrator,
    ModerationPrompt, OpenRouterClient, OpenRouterConfig,
};
pub use error::{ArbiterError, ArbiterResult};
pub use highlight::{highlight, Segment};
pub use storage::{InMemoryStore, ResultStore};
