//! Encounter use cases - the player's boss health as stored remotely.
//!
//! `EncounterHandle` is the one way sessions reach the shared health value. It
//! is created per authenticated player and passed explicitly to whoever needs
//! it. Damage is an atomic decrement on the store; the health read back is
//! clamped, so concurrent overkill never shows a negative value.

use std::sync::Arc;

use futures_util::stream::{self, Stream};
use stressdungeon_domain::{BossEncounter, DamageEvent, DamageOutcome, DomainError, PlayerId};

use crate::infrastructure::documents::{boss_path, BossDocument, BOSS_HEALTH_FIELD};
use crate::infrastructure::ports::{
    Document, DocumentPath, DocumentStorePort, DocumentSubscription, StoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EncounterError {
    /// Message suitable for showing to the player.
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(StoreError::NotFound { .. }) => {
                "Your boss could not be found. Sign in again to start a new encounter.".to_string()
            }
            Self::Store(StoreError::Backend { .. }) => {
                "Could not reach the game server. Check your connection and try again.".to_string()
            }
            Self::Store(StoreError::Serialization(_)) => {
                "Your boss data could not be read.".to_string()
            }
            Self::Domain(DomainError::InvalidStateTransition(_)) => {
                "The boss is already defeated. Claim your victory first.".to_string()
            }
            Self::Domain(e) => e.to_string(),
        }
    }
}

/// Access to one player's encounter.
#[derive(Clone)]
pub struct EncounterHandle {
    owner_id: PlayerId,
    path: DocumentPath,
    store: Arc<dyn DocumentStorePort>,
}

impl std::fmt::Debug for EncounterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterHandle")
            .field("owner_id", &self.owner_id)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl EncounterHandle {
    pub fn new(owner_id: PlayerId, store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            owner_id,
            path: boss_path(owner_id),
            store,
        }
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    /// Create the document at full health unless it already exists.
    pub async fn ensure_initialized(&self) -> Result<BossEncounter, EncounterError> {
        if let Some(document) = self.store.get(&self.path).await? {
            return self.decode(&document);
        }
        tracing::info!(player_id = %self.owner_id, "Creating boss encounter at full health");
        self.reset_to_full().await
    }

    /// Overwrite the document with a fresh encounter.
    pub async fn reset_to_full(&self) -> Result<BossEncounter, EncounterError> {
        let document = BossDocument::full(self.owner_id).into_document()?;
        self.store.set(&self.path, document).await?;
        Ok(BossEncounter::new(self.owner_id))
    }

    /// One-shot read.
    pub async fn current(&self) -> Result<BossEncounter, EncounterError> {
        let document = self
            .store
            .get(&self.path)
            .await?
            .ok_or_else(|| StoreError::not_found(&self.path))?;
        self.decode(&document)
    }

    /// Apply a damage event as an atomic decrement.
    ///
    /// Rejected when the encounter has already been won. The returned outcome
    /// describes the committed change, which may include damage from other
    /// sessions that landed first.
    pub async fn apply_damage(&self, event: &DamageEvent) -> Result<DamageOutcome, EncounterError> {
        if event.owner_id() != self.owner_id {
            return Err(DomainError::constraint(format!(
                "Damage event for player {} sent to encounter of {}",
                event.owner_id(),
                self.owner_id
            ))
            .into());
        }

        let before = self.current().await?;
        if let Err(e) = before.ensure_active() {
            tracing::warn!(
                player_id = %self.owner_id,
                attempt_id = %event.attempt_id(),
                "Damage rejected: boss already defeated"
            );
            return Err(e.into());
        }

        let amount = i64::from(event.amount());
        let committed = self
            .store
            .increment(&self.path, BOSS_HEALTH_FIELD, -amount)
            .await?;
        let committed = BossDocument::from_document(&committed)?;
        let previous = BossDocument {
            boss_health: committed.boss_health.saturating_add(amount),
            ..committed.clone()
        };
        let outcome = DamageOutcome::between(previous.health(), committed.health());

        tracing::info!(
            player_id = %self.owner_id,
            attempt_id = %event.attempt_id(),
            amount = event.amount(),
            health = committed.health().value(),
            defeated = outcome.is_defeated(),
            "Damage applied"
        );
        Ok(outcome)
    }

    /// Start a new cycle after a win.
    pub async fn acknowledge_win(&self) -> Result<BossEncounter, EncounterError> {
        let mut encounter = self.current().await?;
        if let Err(e) = encounter.acknowledge_win() {
            tracing::warn!(
                player_id = %self.owner_id,
                health = encounter.health().value(),
                "Win acknowledged while boss still standing"
            );
            return Err(e.into());
        }
        let encounter = self.reset_to_full().await?;
        tracing::info!(player_id = %self.owner_id, "Victory acknowledged; boss restored");
        Ok(encounter)
    }

    /// Live health updates: the current value first, then every committed change.
    pub async fn observe(&self) -> Result<HealthUpdates, EncounterError> {
        let subscription = self.store.subscribe(&self.path).await?;
        tracing::debug!(player_id = %self.owner_id, "Observing boss health");
        Ok(HealthUpdates {
            handle: self.clone(),
            subscription,
        })
    }

    fn decode(&self, document: &Document) -> Result<BossEncounter, EncounterError> {
        Ok(BossDocument::from_document(document)?.to_encounter(self.owner_id))
    }
}

/// Ordered stream of encounter states for one observer.
///
/// A missing document is created at full health and the creation is then
/// reported like any other change. Dropping the value unsubscribes.
pub struct HealthUpdates {
    handle: EncounterHandle,
    subscription: DocumentSubscription,
}

impl HealthUpdates {
    /// Next state, or `None` if the store closed the subscription.
    pub async fn next(&mut self) -> Option<Result<BossEncounter, EncounterError>> {
        loop {
            match self.subscription.next().await? {
                Some(document) => return Some(self.handle.decode(&document)),
                None => {
                    if let Err(e) = self.handle.ensure_initialized().await {
                        return Some(Err(e));
                    }
                }
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<BossEncounter, EncounterError>> {
        stream::unfold(self, |mut updates| async move {
            let item = updates.next().await?;
            Some((item, updates))
        })
    }
}
