use crate::classification_service::ClassificationService;
use chrono::{DateTime, Utc};
use haven_core::evidence::{EvidenceItem, Platform};
use haven_core::new_id;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tokio_util::task::TaskTracker;

/// Logged evidence, most recent first.
///
/// Adding an item makes it visible immediately; classification runs on a
/// background task and is attached to the same item by id when it settles.
pub struct EvidenceStore {
    items: Arc<RwLock<Vec<EvidenceItem>>>,
    classifier: Arc<ClassificationService>,
    analyzing: Arc<AtomicBool>,
    tracker: TaskTracker,
    settle_lock: Mutex<()>,
}

impl EvidenceStore {
    pub fn new(classifier: Arc<ClassificationService>) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            classifier,
            analyzing: Arc::new(AtomicBool::new(false)),
            tracker: TaskTracker::new(),
            settle_lock: Mutex::new(()),
        }
    }

    /// Logs a new piece of evidence and starts classifying it.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn add_evidence(
        &self,
        content: &str,
        platform: Platform,
        incident_at: DateTime<Utc>,
    ) -> EvidenceItem {
        let item = EvidenceItem::new(new_id("ev"), content, platform, incident_at.to_rfc3339());

        {
            let mut items = self.items.write().await;
            self.analyzing.store(true, Ordering::SeqCst);
            items.insert(0, item.clone());
        }
        tracing::info!(
            evidence_id = %item.id,
            platform = %platform,
            fingerprint = %item.fingerprint(),
            "[Evidence] Logged"
        );

        let items = Arc::clone(&self.items);
        let classifier = Arc::clone(&self.classifier);
        let analyzing = Arc::clone(&self.analyzing);
        let id = item.id.clone();
        let text = item.content.clone();

        self.tracker.spawn(async move {
            let classification = classifier.classify(&text).await;

            let mut items = items.write().await;
            match items.iter_mut().find(|existing| existing.id == id) {
                Some(existing) if existing.classification.is_none() => {
                    tracing::info!(
                        evidence_id = %id,
                        severity = %classification.severity,
                        "[Evidence] Classified"
                    );
                    existing.classification = Some(classification);
                }
                Some(_) => {}
                None => tracing::debug!(evidence_id = %id, "[Evidence] Item gone before classification settled"),
            }
            // Whichever analysis settles last decides the flag.
            analyzing.store(false, Ordering::SeqCst);
        });

        item
    }

    /// Shared flag: set by every add, cleared by whichever analysis settles.
    ///
    /// With overlapping additions it can read `false` while earlier analyses
    /// are still running; use [`is_pending`](Self::is_pending) or
    /// [`pending_analyses`](Self::pending_analyses) for exact state.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// Number of classification tasks still running.
    pub fn pending_analyses(&self) -> usize {
        self.tracker.len()
    }

    /// Whether the item is still waiting for its classification.
    /// `None` when no item has that id.
    pub async fn is_pending(&self, id: &str) -> Option<bool> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .map(|item| !item.is_classified())
    }

    /// Waits until every in-flight classification has settled.
    pub async fn settled(&self) {
        // Concurrent callers must not reopen the tracker under each other.
        let _guard = self.settle_lock.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Snapshot of all items, most recent first.
    pub async fn items(&self) -> Vec<EvidenceItem> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<EvidenceItem> {
        self.items.read().await.iter().find(|item| item.id == id).cloned()
    }

    /// Items whose ids are listed, in store order.
    pub async fn select(&self, ids: &[String]) -> Vec<EvidenceItem> {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect()
    }

    /// Count of items classified `high` or `critical`.
    pub async fn high_severity_count(&self) -> usize {
        self.items
            .read()
            .await
            .iter()
            .filter_map(|item| item.classification.as_ref())
            .filter(|classification| classification.severity.is_elevated())
            .count()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Waits for in-flight analyses, then drops every item.
    pub async fn reset(&self) {
        self.settled().await;
        self.items.write().await.clear();
        self.analyzing.store(false, Ordering::SeqCst);
    }
}
