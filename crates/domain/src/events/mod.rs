//! Domain events
//!
//! Events communicate what happened during a mini-game attempt so the
//! encounter can react to it.

mod damage;

pub use damage::DamageEvent;
