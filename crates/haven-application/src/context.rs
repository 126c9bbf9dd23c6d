//! Startup wiring for the application services.

use crate::classification_service::ClassificationService;
use crate::connection::ConnectionStore;
use crate::dossier::DossierAssembler;
use crate::evidence::EvidenceStore;
use crate::identity::IdentityStore;
use crate::summarization_service::SummarizationService;
use haven_core::capability::AiCapability;
use haven_core::config::RootConfig;
use std::sync::Arc;
use std::time::Duration;

/// Every store and service, constructed once and shared through `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub identity: Arc<IdentityStore>,
    pub evidence: Arc<EvidenceStore>,
    pub dossiers: Arc<DossierAssembler>,
    pub connections: Arc<ConnectionStore>,
    pub classifier: Arc<ClassificationService>,
    pub summarizer: Arc<SummarizationService>,
}

impl AppContext {
    pub fn new(config: &RootConfig, capability: Arc<dyn AiCapability>) -> Self {
        let latency = Duration::from_millis(config.identity.simulated_latency_ms);
        let identity = Arc::new(IdentityStore::new(latency));
        let classifier = Arc::new(ClassificationService::new(Arc::clone(&capability)));
        let summarizer = Arc::new(SummarizationService::new(capability));

        tracing::debug!(
            simulated_latency_ms = config.identity.simulated_latency_ms,
            "[AppContext] Initialised"
        );

        Self {
            evidence: Arc::new(EvidenceStore::new(Arc::clone(&classifier))),
            dossiers: Arc::new(DossierAssembler::new(Arc::clone(&summarizer))),
            connections: Arc::new(ConnectionStore::new(Arc::clone(&identity))),
            identity,
            classifier,
            summarizer,
        }
    }

    /// Waits for all background enrichment to settle.
    pub async fn settled(&self) {
        self.evidence.settled().await;
        self.dossiers.settled().await;
    }

    /// Returns every store to its startup state.
    pub async fn reset(&self) {
        self.evidence.reset().await;
        self.dossiers.reset().await;
        self.connections.reset().await;
        self.identity.reset().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::capability::UnconfiguredCapability;
    use haven_core::evidence::Platform;

    fn context() -> AppContext {
        let mut config = RootConfig::default();
        config.identity.simulated_latency_ms = 0;
        AppContext::new(&config, Arc::new(UnconfiguredCapability))
    }

    #[tokio::test]
    async fn test_reset_returns_to_startup_state() {
        let ctx = context();
        ctx.identity.login("survivor@demo.com", "password").await.unwrap();
        ctx.evidence
            .add_evidence("a", Platform::Twitter, chrono::Utc::now())
            .await;
        ctx.connections.request_connection("s_lawyer_chen", "help").await.unwrap();
        ctx.dossiers.create_dossier(ctx.evidence.items().await).await;

        ctx.reset().await;

        assert!(ctx.evidence.is_empty().await);
        assert!(ctx.dossiers.dossiers().await.is_empty());
        assert!(ctx.connections.connections().await.is_empty());
        assert!(!ctx.identity.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_connections_share_identity_session() {
        let ctx = context();
        assert!(ctx.connections.request_connection("s1", "help").await.is_err());
        ctx.identity.login("survivor@demo.com", "password").await.unwrap();
        assert!(ctx.connections.request_connection("s1", "help").await.is_ok());
    }
}
