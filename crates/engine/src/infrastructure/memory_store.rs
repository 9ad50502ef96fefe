//! In-memory document store.
//!
//! Each document lives in a `DashMap` entry together with its subscribers.
//! Writes mutate the document and fan it out while holding the entry lock, so
//! every subscriber sees commits in commit order and increments are atomic.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::infrastructure::ports::{
    Document, DocumentPath, DocumentStorePort, DocumentSubscription, StoreError,
};

#[derive(Default)]
struct Entry {
    document: Option<Document>,
    subscribers: Vec<mpsc::UnboundedSender<Option<Document>>>,
}

impl Entry {
    /// Push the current document to every live subscriber, pruning closed ones.
    fn publish(&mut self) {
        let snapshot = self.document.clone();
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }
}

pub struct InMemoryDocumentStore {
    entries: DashMap<DocumentPath, Entry>,
    offline: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate losing the connection: every call fails until set back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Live subscriber count for a document.
    pub fn subscriber_count(&self, path: &DocumentPath) -> usize {
        self.entries
            .get(path)
            .map(|entry| entry.subscribers.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }

    fn check_online(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::backend(operation, "store unavailable"));
        }
        Ok(())
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        self.check_online("get")?;
        Ok(self
            .entries
            .get(path)
            .and_then(|entry| entry.document.clone()))
    }

    async fn set(&self, path: &DocumentPath, document: Document) -> Result<(), StoreError> {
        self.check_online("set")?;
        let mut entry = self.entries.entry(path.clone()).or_default();
        entry.document = Some(document);
        entry.publish();
        tracing::trace!(path = %path, subscribers = entry.subscribers.len(), "Document set");
        Ok(())
    }

    async fn increment(
        &self,
        path: &DocumentPath,
        field: &str,
        delta: i64,
    ) -> Result<Document, StoreError> {
        self.check_online("increment")?;
        let mut entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| StoreError::not_found(path))?;
        let document = entry
            .document
            .as_mut()
            .ok_or_else(|| StoreError::not_found(path))?;

        let current = match document.get(field) {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_i64().ok_or_else(|| {
                StoreError::serialization(format!("{}.{} is not an integer: {}", path, field, value))
            })?,
        };
        let next = current.saturating_add(delta);
        document.insert(field.to_string(), Value::from(next));
        let committed = document.clone();

        entry.publish();
        tracing::trace!(path = %path, field, delta, value = next, "Field incremented");
        Ok(committed)
    }

    async fn subscribe(&self, path: &DocumentPath) -> Result<DocumentSubscription, StoreError> {
        self.check_online("subscribe")?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut entry = self.entries.entry(path.clone()).or_default();
        // Initial snapshot goes out under the same lock as later commits.
        if sender.send(entry.document.clone()).is_ok() {
            entry.subscribers.push(sender);
        }
        Ok(DocumentSubscription::new(receiver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn path() -> DocumentPath {
        DocumentPath::new("boss", "player-1")
    }

    fn health(value: i64) -> Document {
        let Value::Object(document) = json!({ "BossHealth": value, "UserID": "player-1" }) else {
            panic!("expected object");
        };
        document
    }

    #[tokio::test]
    async fn get_missing_document_is_none() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get(&path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_requires_existing_document() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .increment(&path(), "BossHealth", -20)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn increment_returns_committed_document() {
        let store = InMemoryDocumentStore::new();
        store.set(&path(), health(100)).await.unwrap();
        let committed = store.increment(&path(), "BossHealth", -25).await.unwrap();
        assert_eq!(committed["BossHealth"], json!(75));
        assert_eq!(committed["UserID"], json!("player-1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.set(&path(), health(1000)).await.unwrap();

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment(&path(), "BossHealth", -5).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let document = store.get(&path()).await.unwrap().unwrap();
        assert_eq!(document["BossHealth"], json!(800));
    }

    #[tokio::test]
    async fn subscriber_sees_current_value_then_commits_in_order() {
        let store = InMemoryDocumentStore::new();
        store.set(&path(), health(100)).await.unwrap();
        let mut subscription = store.subscribe(&path()).await.unwrap();

        store.increment(&path(), "BossHealth", -25).await.unwrap();
        store.increment(&path(), "BossHealth", -20).await.unwrap();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let snapshot = subscription.next().await.unwrap().unwrap();
            seen.push(snapshot["BossHealth"].as_i64().unwrap());
        }
        assert_eq!(seen, vec![100, 75, 55]);
    }

    #[tokio::test]
    async fn subscribing_to_missing_document_yields_none_first() {
        let store = InMemoryDocumentStore::new();
        let mut subscription = store.subscribe(&path()).await.unwrap();
        assert_eq!(subscription.next().await, Some(None));

        store.set(&path(), health(100)).await.unwrap();
        let created = subscription.next().await.unwrap().unwrap();
        assert_eq!(created["BossHealth"], json!(100));
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned() {
        let store = InMemoryDocumentStore::new();
        store.set(&path(), health(100)).await.unwrap();
        let subscription = store.subscribe(&path()).await.unwrap();
        assert_eq!(store.subscriber_count(&path()), 1);

        drop(subscription);
        store.increment(&path(), "BossHealth", -5).await.unwrap();
        assert_eq!(store.subscriber_count(&path()), 0);
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = InMemoryDocumentStore::new();
        store.set(&path(), health(100)).await.unwrap();
        store.set_offline(true);
        assert!(matches!(
            store.increment(&path(), "BossHealth", -5).await,
            Err(StoreError::Backend { operation: "increment", .. })
        ));
        store.set_offline(false);
        let document = store.get(&path()).await.unwrap().unwrap();
        assert_eq!(document["BossHealth"], json!(100));
    }
}
