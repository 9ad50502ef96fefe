//! Use cases - user stories orchestrated over the domain and the ports.

pub mod auth;
pub mod encounter;
pub mod mini_game;

pub use auth::{AuthFlowError, Authenticate, Credentials, PlayerSession};
pub use encounter::{EncounterError, EncounterHandle, HealthUpdates};
pub use mini_game::{
    AttemptHandle, AttemptReport, DamageDelivery, MiniGameController, MiniGameError,
    SimulationSettings,
};
