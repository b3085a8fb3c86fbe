//! Moderation engine for Arbiter Core.
//!
//! This module contains the decision pipeline:
//! - Prompt Builder: deterministic prompt from policy snapshot + content
//! - AI Client: single model invocation per request
//! - Response Parser: total conversion of raw output into a valid verdict
//! - Reconciler: confidence-threshold downgrade of rejections
//! - Moderation Orchestrator: composes all of the above

mod client;
mod orchestrator;
mod parser;
mod prompt;
mod reconcile;

pub use client::*;
pub use orchestrator::*;
pub use parser::*;
pub use prompt::*;
pub use reconcile::*;
