//! Value objects - validated, immutable domain values.

mod boss_health;

pub use boss_health::{BossHealth, MAX_BOSS_HEALTH};
