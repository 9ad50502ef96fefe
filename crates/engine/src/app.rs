//! Application state and composition.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory_auth::InMemoryAuth,
    memory_store::InMemoryDocumentStore,
    ports::{AuthPort, ClockPort, DocumentStorePort, RandomPort},
};
use crate::use_cases::{Authenticate, MiniGameController};

/// Main application state.
///
/// Holds the use cases wired to one set of adapters. Sessions get their
/// `EncounterHandle` from `auth`; nothing here is global.
pub struct App {
    pub auth: Authenticate,
    pub mini_games: MiniGameController,
    pub store: Arc<dyn DocumentStorePort>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: &EngineConfig,
        store: Arc<dyn DocumentStorePort>,
        auth: Arc<dyn AuthPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            auth: Authenticate::new(auth, store.clone()),
            mini_games: MiniGameController::new(config.rules(), config.simulation(), random, clock),
            store,
        }
    }

    /// App backed by the in-memory store and auth provider.
    pub fn in_memory(config: &EngineConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
        let store: Arc<dyn DocumentStorePort> = Arc::new(InMemoryDocumentStore::new());
        let auth: Arc<dyn AuthPort> = Arc::new(InMemoryAuth::new(clock.clone()));
        Self::new(config, store, auth, clock, random)
    }
}
