//! Persistence seam for Arbiter Core.
//!
//! The concrete document store lives outside this crate; the orchestrator
//! only needs a place to hand the assembled record. Persistence failure is
//! propagated, unlike AI faults, because durability loss must be visible
//! to the surrounding system.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ModerationRecord;
use crate::error::ArbiterResult;

/// Write sink for completed moderation decisions.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist one record.
    async fn save(&self, record: &ModerationRecord) -> ArbiterResult<()>;
}

/// In-memory store backed by a mutex-guarded vector.
///
/// Used in tests and by embedders that handle durability elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<Vec<ModerationRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything saved so far.
    pub fn records(&self) -> Vec<ModerationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn save(&self, record: &ModerationRecord) -> ArbiterResult<()> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}
