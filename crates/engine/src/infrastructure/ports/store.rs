//! Remote document store port.
//!
//! Documents are flat JSON objects addressed by `collection/id`. The store owns
//! the only shared mutable value in the game (boss health); clients change it
//! through `increment`, never by writing back a value they read earlier.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use super::error::StoreError;

/// A stored document's fields.
pub type Document = Map<String, Value>;

/// Address of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Live view of one document.
///
/// Yields the document's state at subscription time, then one item per
/// committed change, in commit order. `None` inside an item means the document
/// does not exist. Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct DocumentSubscription {
    receiver: mpsc::UnboundedReceiver<Option<Document>>,
}

impl DocumentSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<Option<Document>>) -> Self {
        Self { receiver }
    }

    /// Next snapshot, or `None` once the store has closed the subscription.
    pub async fn next(&mut self) -> Option<Option<Document>> {
        self.receiver.recv().await
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// Overwrite (or create) the whole document.
    async fn set(&self, path: &DocumentPath, document: Document) -> Result<(), StoreError>;

    /// Atomically add `delta` to an integer field and return the committed document.
    ///
    /// A missing field counts as 0. Fails with `NotFound` if the document is missing.
    async fn increment(
        &self,
        path: &DocumentPath,
        field: &str,
        delta: i64,
    ) -> Result<Document, StoreError>;

    async fn subscribe(&self, path: &DocumentPath) -> Result<DocumentSubscription, StoreError>;
}
