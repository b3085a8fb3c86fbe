//! Confidence-threshold reconciliation.
//!
//! The only place outcome severity is ever softened. Pure function of its
//! inputs; no hidden state.

use crate::domain::Verdict;

/// Downgrade a low-confidence rejection to a flag for human review.
///
/// `safe` and `flagged` pass through untouched regardless of confidence.
pub fn reconcile(verdict: Verdict, confidence: f64, threshold: f64) -> Verdict {
    if verdict == Verdict::Rejected && confidence < threshold {
        Verdict::Flagged
    } else {
        verdict
    }
}
