use crate::summarization_service::SummarizationService;
use haven_core::dossier::{
    Dossier, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE, aggregate_severity,
};
use haven_core::evidence::EvidenceItem;
use haven_core::{new_id, now_iso8601};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::task::TaskTracker;

/// Bundles evidence into dossiers, most recent first.
///
/// A dossier is stored as soon as it is created; its narrative summary (and,
/// when requested, its generated title/description) arrive later from a
/// background task and are written to the stored dossier by id.
pub struct DossierAssembler {
    dossiers: Arc<RwLock<Vec<Dossier>>>,
    summarizer: Arc<SummarizationService>,
    tracker: TaskTracker,
    settle_lock: Mutex<()>,
}

impl DossierAssembler {
    pub fn new(summarizer: Arc<SummarizationService>) -> Self {
        Self {
            dossiers: Arc::new(RwLock::new(Vec::new())),
            summarizer,
            tracker: TaskTracker::new(),
            settle_lock: Mutex::new(()),
        }
    }

    /// Creates a dossier and requests its narrative summary.
    pub async fn create_dossier(&self, items: Vec<EvidenceItem>) -> Dossier {
        self.assemble(items, false).await
    }

    /// Like [`create_dossier`](Self::create_dossier), and also replaces the
    /// placeholder title/description with generated metadata.
    pub async fn create_dossier_with_metadata(&self, items: Vec<EvidenceItem>) -> Dossier {
        self.assemble(items, true).await
    }

    async fn assemble(&self, items: Vec<EvidenceItem>, with_metadata: bool) -> Dossier {
        let dossier = Dossier {
            id: new_id("dos"),
            title: PLACEHOLDER_TITLE.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            severity: aggregate_severity(&items),
            generated_at: now_iso8601(),
            items,
            ai_summary: None,
        };

        self.dossiers.write().await.insert(0, dossier.clone());
        tracing::info!(
            dossier_id = %dossier.id,
            items = dossier.items.len(),
            severity = %dossier.severity,
            "[Dossier] Created"
        );

        let dossiers = Arc::clone(&self.dossiers);
        let summarizer = Arc::clone(&self.summarizer);
        let id = dossier.id.clone();
        let texts = dossier.item_contents();

        self.tracker.spawn(async move {
            let metadata = if with_metadata {
                Some(summarizer.generate_metadata(&texts).await)
            } else {
                None
            };
            let summary = summarizer.summarize(&texts).await;

            let mut dossiers = dossiers.write().await;
            let Some(stored) = dossiers.iter_mut().find(|d| d.id == id) else {
                tracing::debug!(dossier_id = %id, "[Dossier] Dossier gone before summary settled");
                return;
            };
            if let Some(metadata) = metadata {
                stored.title = metadata.title;
                stored.description = metadata.description;
            }
            stored.ai_summary = Some(summary);
            tracing::info!(dossier_id = %id, "[Dossier] Summary attached");
        });

        dossier
    }

    /// Snapshot of all dossiers, most recent first.
    pub async fn dossiers(&self) -> Vec<Dossier> {
        self.dossiers.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Dossier> {
        self.dossiers.read().await.iter().find(|d| d.id == id).cloned()
    }

    /// Waits until every pending summary has been attached.
    pub async fn settled(&self) {
        // Concurrent callers must not reopen the tracker under each other.
        let _guard = self.settle_lock.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    pub async fn reset(&self) {
        self.settled().await;
        self.dossiers.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted_capability::ScriptedCapability;
    use crate::summarization_service::SUMMARY_UNCONFIGURED;
    use haven_core::capability::{AiCapability, UnconfiguredCapability};
    use haven_core::evidence::{Category, Classification, Platform, Severity};
    use std::time::Duration;

    fn assembler(capability: impl AiCapability + 'static) -> DossierAssembler {
        DossierAssembler::new(Arc::new(SummarizationService::new(Arc::new(capability))))
    }

    fn item(content: &str, severity: Option<Severity>) -> EvidenceItem {
        let mut item = EvidenceItem::new(new_id("ev"), content, Platform::Twitter, now_iso8601());
        item.classification = severity.map(|severity| Classification {
            category: Category::Threat,
            severity,
            confidence: 0.9,
            summary: "s".into(),
        });
        item
    }

    #[tokio::test]
    async fn test_aggregate_severity_is_max() {
        let assembler = assembler(UnconfiguredCapability);
        let dossier = assembler
            .create_dossier(vec![
                item("one", Some(Severity::High)),
                item("two", Some(Severity::Critical)),
            ])
            .await;
        assert_eq!(dossier.severity, Severity::Critical);
        assert_eq!(dossier.items.len(), 2);
    }

    #[tokio::test]
    async fn test_stored_immediately_with_placeholder() {
        let assembler = assembler(
            ScriptedCapability::always(Ok("later".into()))
                .then_after(Duration::from_millis(50), Ok("A narrative.".into())),
        );
        let dossier = assembler.create_dossier(vec![item("one", None)]).await;

        let stored = assembler.get(&dossier.id).await.unwrap();
        assert_eq!(stored.ai_summary, None);
        assert_eq!(stored.title, PLACEHOLDER_TITLE);
        assert_eq!(stored.severity, Severity::Low);

        assembler.settled().await;
        let stored = assembler.get(&dossier.id).await.unwrap();
        assert_eq!(stored.ai_summary.as_deref(), Some("A narrative."));
        assert_eq!(stored.title, PLACEHOLDER_TITLE);
        assert_eq!(stored.generated_at, dossier.generated_at);
    }

    #[tokio::test]
    async fn test_metadata_overwrites_title_and_description() {
        let capability = Arc::new(
            ScriptedCapability::always(Ok("Narrative.".into())).then(Ok(
                r#"{"title":"Threat Campaign","description":"Escalating threats."}"#.into(),
            )),
        );
        let assembler =
            DossierAssembler::new(Arc::new(SummarizationService::new(capability.clone())));

        let dossier = assembler
            .create_dossier_with_metadata(vec![item("one", Some(Severity::Medium))])
            .await;
        assembler.settled().await;

        let stored = assembler.get(&dossier.id).await.unwrap();
        assert_eq!(stored.title, "Threat Campaign");
        assert_eq!(stored.description, "Escalating threats.");
        assert_eq!(stored.ai_summary.as_deref(), Some("Narrative."));
        assert_eq!(capability.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_summary_placeholder() {
        let assembler = assembler(UnconfiguredCapability);
        let dossier = assembler.create_dossier(vec![item("one", None)]).await;
        assembler.settled().await;

        let stored = assembler.get(&dossier.id).await.unwrap();
        assert_eq!(stored.ai_summary.as_deref(), Some(SUMMARY_UNCONFIGURED));
    }

    #[tokio::test]
    async fn test_most_recent_first_and_reset() {
        let assembler = assembler(UnconfiguredCapability);
        let first = assembler.create_dossier(vec![item("a", None)]).await;
        let second = assembler.create_dossier(vec![item("b", None)]).await;

        let ids: Vec<_> = assembler.dossiers().await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, [second.id, first.id]);

        assembler.reset().await;
        assert!(assembler.dossiers().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_settled_callers_return() {
        let assembler = Arc::new(assembler(UnconfiguredCapability));
        assembler.create_dossier(vec![item("one", None)]).await;
        for _ in 0..500 {
            let a = tokio::spawn({
                let assembler = Arc::clone(&assembler);
                async move { assembler.settled().await }
            });
            let b = tokio::spawn({
                let assembler = Arc::clone(&assembler);
                async move { assembler.settled().await }
            });
            tokio::time::timeout(Duration::from_secs(2), async {
                a.await.unwrap();
                b.await.unwrap();
            })
            .await
            .expect("settled() hung under concurrent callers");
        }
    }
}
