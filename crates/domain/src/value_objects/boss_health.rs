//! Boss health value object - the shared encounter resource.
//!
//! Health is an integer in `0..=100`. Stored values are decremented with an
//! atomic delta and may undershoot; every read clamps them back into range,
//! so a `BossHealth` is never negative.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Health of a fresh (or reset) boss.
pub const MAX_BOSS_HEALTH: u8 = 100;

/// Boss health in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BossHealth(u8);

impl BossHealth {
    /// Create a health value, rejecting anything above the maximum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `value > 100`.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > MAX_BOSS_HEALTH {
            return Err(DomainError::validation(format!(
                "Boss health cannot exceed {}",
                MAX_BOSS_HEALTH
            )));
        }
        Ok(Self(value))
    }

    /// Full health.
    pub fn full() -> Self {
        Self(MAX_BOSS_HEALTH)
    }

    /// Defeated.
    pub fn depleted() -> Self {
        Self(0)
    }

    /// Read a raw stored value, clamping it into `0..=100`.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, i64::from(MAX_BOSS_HEALTH)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Health left after taking `amount` damage: `max(0, health − amount)`.
    pub fn after_damage(&self, amount: u32) -> Self {
        Self(u32::from(self.0).saturating_sub(amount) as u8)
    }

    /// Fill ratio for a health bar, in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        f32::from(self.0) / f32::from(MAX_BOSS_HEALTH)
    }
}

impl Default for BossHealth {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for BossHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for BossHealth {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u8::try_from(value).map_err(|_| {
            DomainError::validation(format!("Boss health out of range: {}", value))
        })?;
        Self::new(value)
    }
}

impl From<BossHealth> for i64 {
    fn from(health: BossHealth) -> i64 {
        i64::from(health.0)
    }
}
