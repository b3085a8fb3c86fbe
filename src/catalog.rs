//! Policy catalog seam.
//!
//! The orchestrator reads the active policy set through this trait at the
//! start of every decision. The read is the pipeline's one fatal
//! dependency: no policies, no verdict.

use async_trait::async_trait;

use crate::domain::Policy;
use crate::error::{ArbiterError, ArbiterResult};

/// Read-only provider of the active policy set.
#[async_trait]
pub trait PolicyCatalog: Send + Sync {
    /// List the currently active policies, in catalog order.
    ///
    /// Order matters: it is preserved verbatim in the prompt so that
    /// identical catalog snapshots produce identical prompts.
    async fn list_active_policies(&self) -> ArbiterResult<Vec<Policy>>;
}

/// In-memory catalog with a fixed policy set.
///
/// Suitable for embedders that load policies at startup, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    policies: Vec<Policy>,
}

impl StaticCatalog {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }
}

#[async_trait]
impl PolicyCatalog for StaticCatalog {
    async fn list_active_policies(&self) -> ArbiterResult<Vec<Policy>> {
        if self.policies.is_empty() {
            return Err(ArbiterError::PolicyFetch(
                "catalog contains no active policies".to_string(),
            ));
        }
        Ok(self.policies.clone())
    }
}
