//! Infrastructure - port traits and the adapters that implement them.

pub mod clock;
pub mod documents;
pub mod memory_auth;
pub mod memory_store;
pub mod ports;
