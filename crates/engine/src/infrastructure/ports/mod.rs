//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The remote document store holding boss health
//! - The auth provider (password and OAuth identities)
//! - Clock/Random (for testing)

mod auth;
mod error;
mod store;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use auth::{AuthIdentity, AuthPort, AuthProvider};
pub use store::{Document, DocumentPath, DocumentStorePort, DocumentSubscription};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use auth::MockAuthPort;
#[cfg(test)]
pub use store::MockDocumentStorePort;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{AuthError, StoreError};
