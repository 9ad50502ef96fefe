//! Stored document shapes.
//!
//! Field names match the documents written by earlier clients of the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stressdungeon_domain::{BossEncounter, BossHealth, PlayerId, MAX_BOSS_HEALTH};

use crate::infrastructure::ports::{Document, DocumentPath, StoreError};

pub const BOSS_COLLECTION: &str = "boss";
pub const BOSS_HEALTH_FIELD: &str = "BossHealth";

/// Path of a player's boss document.
pub fn boss_path(owner_id: PlayerId) -> DocumentPath {
    DocumentPath::new(BOSS_COLLECTION, owner_id.to_string())
}

/// `boss/<playerId>` document.
///
/// `boss_health` is raw: concurrent decrements may leave it below 0, so it is
/// only ever read through [`BossDocument::health`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDocument {
    #[serde(rename = "BossHealth")]
    pub boss_health: i64,
    #[serde(rename = "UserID", default)]
    pub user_id: String,
}

impl BossDocument {
    pub fn full(owner_id: PlayerId) -> Self {
        Self {
            boss_health: i64::from(MAX_BOSS_HEALTH),
            user_id: owner_id.to_string(),
        }
    }

    pub fn health(&self) -> BossHealth {
        BossHealth::clamped(self.boss_health)
    }

    pub fn to_encounter(&self, owner_id: PlayerId) -> BossEncounter {
        BossEncounter::with_health(owner_id, self.health())
    }

    pub fn from_document(document: &Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(document.clone()))
            .map_err(|e| StoreError::serialization(format!("boss document: {}", e)))
    }

    pub fn into_document(self) -> Result<Document, StoreError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(other) => Err(StoreError::serialization(format!(
                "boss document serialized to {}",
                other
            ))),
            Err(e) => Err(StoreError::serialization(e)),
        }
    }
}
