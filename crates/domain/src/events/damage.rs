//! Damage dealt to the boss by a successful mini-game attempt.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AttemptId, PlayerId};

/// A fixed-amount decrement produced by exactly one successful attempt.
///
/// # Invariants
///
/// - `amount` is always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageEvent {
    owner_id: PlayerId,
    attempt_id: AttemptId,
    amount: u8,
}

impl DamageEvent {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `amount` is zero.
    pub fn new(owner_id: PlayerId, attempt_id: AttemptId, amount: u8) -> Result<Self, DomainError> {
        if amount == 0 {
            return Err(DomainError::validation("Damage amount must be positive"));
        }
        Ok(Self {
            owner_id,
            attempt_id,
            amount,
        })
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_damage() {
        let err = DamageEvent::new(PlayerId::new(), AttemptId::new(), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn keeps_amount_and_origin() {
        let owner = PlayerId::new();
        let attempt = AttemptId::new();
        let event = DamageEvent::new(owner, attempt, 25).unwrap();
        assert_eq!(event.amount(), 25);
        assert_eq!(event.owner_id(), owner);
        assert_eq!(event.attempt_id(), attempt);
    }
}
