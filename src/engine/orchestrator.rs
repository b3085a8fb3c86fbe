//! Moderation Orchestrator - runs the end-to-end decision pipeline.
//!
//! This is the central component: it fetches the policy snapshot, builds
//! the prompt, invokes the model once, parses and reconciles the verdict,
//! resolves the cited policy, and persists the record.
//!
//! Safety property: every AI or parsing failure collapses toward "flagged
//! for human review". Content is never silently waved through, and the
//! caller never sees an error for a model fault. The only propagated
//! failures are a missing policy set and a persistence fault.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::catalog::PolicyCatalog;
use crate::domain::{
    ModerationRecord, ModerationRequest, ModerationResult, ParsedAiVerdict, Policy, PolicyCitation,
};
use crate::engine::client::AiClient;
use crate::engine::parser::parse_verdict;
use crate::engine::prompt::build_prompt;
use crate::engine::reconcile::reconcile;
use crate::error::ArbiterResult;
use crate::storage::ResultStore;

/// Orchestrates one moderation decision per call.
///
/// Stateless between calls; safe to share behind an `Arc` and invoke
/// concurrently. Performs exactly one AI invocation per request, with no
/// retry, caching, or coalescing.
pub struct ModerationOrchestrator {
    catalog: Arc<dyn PolicyCatalog>,
    client: Arc<dyn AiClient>,
    store: Arc<dyn ResultStore>,
    confidence_threshold: f64,
}

impl ModerationOrchestrator {
    /// Create a new orchestrator with the given collaborators.
    pub fn new(
        catalog: Arc<dyn PolicyCatalog>,
        client: Arc<dyn AiClient>,
        store: Arc<dyn ResultStore>,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            catalog,
            client,
            store,
            confidence_threshold,
        }
    }

    /// Run the full pipeline for one piece of content.
    ///
    /// Errors only on policy-catalog or persistence failure; everything
    /// else produces a usable (worst case: over-conservative) verdict.
    pub async fn moderate(&self, request: ModerationRequest) -> ArbiterResult<ModerationResult> {
        // The one fatal dependency: no policy set, no decision.
        let policies = self.catalog.list_active_policies().await?;

        let prompt = build_prompt(&policies, &request.content, request.context.as_deref());

        let started = Instant::now();
        let parsed = match self.client.invoke(&prompt).await {
            Ok(raw) => parse_verdict(&raw),
            Err(e) => {
                tracing::warn!(
                    content_id = %request.content_id,
                    error = %e,
                    "AI invocation failed, falling back to flagged verdict"
                );
                ParsedAiVerdict::fallback(format!("AI invocation failed: {}", e))
            }
        };
        let response_time_ms = started.elapsed().as_millis() as u64;

        let verdict = reconcile(parsed.verdict, parsed.confidence, self.confidence_threshold);

        // Resolve the citation against the snapshot fetched above, not a
        // fresh catalog read. An unknown id degrades to no citation.
        let citation = parsed
            .policy_violated
            .as_deref()
            .and_then(|id| resolve_citation(&policies, id, &request.content_id));

        let result = ModerationResult::assemble(
            parsed,
            verdict,
            citation,
            self.client.model_name(),
            response_time_ms,
        );

        tracing::info!(
            content_id = %request.content_id,
            user_id = %request.user_id,
            content_type = %request.content_type,
            verdict = %result.verdict,
            confidence = result.confidence,
            review_status = %result.review_status,
            response_time_ms,
            "Moderation complete"
        );

        let record = ModerationRecord {
            content_id: request.content_id,
            content: request.content,
            content_type: request.content_type,
            user_id: request.user_id,
            result: result.clone(),
            requested_at: request.created_at,
            recorded_at: Utc::now(),
        };
        self.store.save(&record).await?;

        Ok(result)
    }
}

fn resolve_citation(policies: &[Policy], id: &str, content_id: &str) -> Option<PolicyCitation> {
    let found = policies.iter().find(|p| p.id == id);
    if found.is_none() {
        tracing::debug!(
            content_id = %content_id,
            cited_policy = %id,
            "Model cited a policy not in the snapshot, dropping citation"
        );
    }
    found.map(PolicyCitation::from_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::catalog::StaticCatalog;
    use crate::domain::{
        ContentType, PolicyAction, PolicyCategory, ReviewStatus, Severity, Verdict,
    };
    use crate::engine::client::AiClientError;
    use crate::engine::prompt::ModerationPrompt;
    use crate::error::ArbiterError;
    use crate::storage::InMemoryStore;

    /// Deterministic fake returning a canned response (or failing).
    struct FakeClient {
        response: Result<String, String>,
        calls: Mutex<u32>,
    }

    impl FakeClient {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                calls: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err("connection timed out".to_string()),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl AiClient for FakeClient {
        fn model_name(&self) -> &str {
            "fake/model"
        }

        async fn invoke(&self, _prompt: &ModerationPrompt) -> Result<String, AiClientError> {
            *self.calls.lock().unwrap() += 1;
            match &self.response {
                Ok(raw) => Ok(raw.clone()),
                Err(msg) => Err(AiClientError::Api {
                    status: 504,
                    body: msg.clone(),
                }),
            }
        }
    }

    /// Store whose saves always fail.
    struct BrokenStore;

    #[async_trait]
    impl ResultStore for BrokenStore {
        async fn save(&self, _record: &ModerationRecord) -> ArbiterResult<()> {
            Err(ArbiterError::Persistence("disk full".to_string()))
        }
    }

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::new(vec![
            Policy::new(
                "no-hate-01",
                "No hate speech",
                PolicyCategory::HateSpeech,
                Severity::Critical,
                "Attacks on protected groups",
                PolicyAction::Reject,
            ),
            Policy::new(
                "no-spam-01",
                "No spam",
                PolicyCategory::Spam,
                Severity::Low,
                "Unsolicited promotion",
                PolicyAction::Flag,
            ),
        ]))
    }

    fn request() -> ModerationRequest {
        ModerationRequest::text("content-1", "user-1", "some comment", ContentType::Comment)
    }

    fn orchestrator(
        client: Arc<FakeClient>,
        store: Arc<InMemoryStore>,
    ) -> ModerationOrchestrator {
        ModerationOrchestrator::new(catalog(), client, store, 0.7)
    }

    #[tokio::test]
    async fn test_clean_verdict_flows_through() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"safe","category":null,"confidence":0.95,"policyViolated":null,"reasoning":"ok"}"#,
        ));
        let store = Arc::new(InMemoryStore::new());
        let result = orchestrator(client.clone(), store.clone())
            .moderate(request())
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Safe);
        assert_eq!(result.review_status, ReviewStatus::Approved);
        assert_eq!(result.ai_model, "fake/model");
        assert_eq!(*client.calls.lock().unwrap(), 1);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_flagged_verdict() {
        let client = Arc::new(FakeClient::failing());
        let store = Arc::new(InMemoryStore::new());
        let result = orchestrator(client, store.clone())
            .moderate(request())
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Flagged);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.review_status, ReviewStatus::Pending);
        assert!(result.reasoning.contains("AI invocation failed"));
        // The failed decision is still persisted for review
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_low_confidence_rejection_downgraded() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"rejected","confidence":0.4,"policyViolated":"no-spam-01","reasoning":"looks promotional"}"#,
        ));
        let store = Arc::new(InMemoryStore::new());
        let result = orchestrator(client, store)
            .moderate(request())
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Flagged);
        assert_eq!(result.confidence, 0.4);
    }

    #[tokio::test]
    async fn test_citation_resolved_from_snapshot() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"rejected","confidence":0.9,"policyViolated":"no-hate-01","reasoning":"slur"}"#,
        ));
        let store = Arc::new(InMemoryStore::new());
        let result = orchestrator(client, store)
            .moderate(request())
            .await
            .unwrap();

        let citation = result.policy_violated.expect("citation");
        assert_eq!(citation.id, "no-hate-01");
        assert_eq!(citation.title, "No hate speech");
        assert_eq!(citation.severity, Severity::Critical);
    }

    #[tokio::test]
    async fn test_unknown_citation_degrades_to_none() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"rejected","confidence":0.9,"policyViolated":"no-such-policy","reasoning":"?"}"#,
        ));
        let store = Arc::new(InMemoryStore::new());
        let result = orchestrator(client, store)
            .moderate(request())
            .await
            .unwrap();

        assert!(result.policy_violated.is_none());
        assert_eq!(result.verdict, Verdict::Rejected);
    }

    #[tokio::test]
    async fn test_empty_catalog_is_fatal() {
        let client = Arc::new(FakeClient::ok("{}"));
        let store = Arc::new(InMemoryStore::new());
        let orchestrator = ModerationOrchestrator::new(
            Arc::new(StaticCatalog::default()),
            client.clone(),
            store,
            0.7,
        );

        let err = orchestrator.moderate(request()).await.unwrap_err();
        assert!(matches!(err, ArbiterError::PolicyFetch(_)));
        // The model is never consulted without a policy set
        assert_eq!(*client.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"safe","confidence":1.0,"reasoning":"ok"}"#,
        ));
        let orchestrator =
            ModerationOrchestrator::new(catalog(), client, Arc::new(BrokenStore), 0.7);

        let err = orchestrator.moderate(request()).await.unwrap_err();
        assert!(matches!(err, ArbiterError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_record_carries_request_metadata() {
        let client = Arc::new(FakeClient::ok(
            r#"{"verdict":"safe","confidence":1.0,"reasoning":"ok"}"#,
        ));
        let store = Arc::new(InMemoryStore::new());
        orchestrator(client, store.clone())
            .moderate(request())
            .await
            .unwrap();

        let records = store.records();
        assert_eq!(records[0].content_id, "content-1");
        assert_eq!(records[0].user_id, "user-1");
        assert_eq!(records[0].content_type, ContentType::Comment);
    }
}
