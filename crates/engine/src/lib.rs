//! Stress Dungeon Engine library.
//!
//! Orchestrates the boss encounter, the role mini-games and authentication
//! over the domain crate.
//!
//! ## Structure
//!
//! - `use_cases/` - Encounter, mini-game session and auth flows
//! - `infrastructure/` - Port traits and their adapters (in-memory store and auth)
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
