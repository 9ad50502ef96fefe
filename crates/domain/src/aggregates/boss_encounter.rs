//! BossEncounter aggregate - one boss fight per player
//!
//! # State machine
//!
//! ```text
//! Active(health) --apply_damage--> Active(health')   (health' > 0)
//! Active(health) --apply_damage--> Won               (health' == 0)
//! Won            --acknowledge_win--> Active(100)
//! ```
//!
//! The phase is derived from health, so an encounter read back from storage
//! with health 0 is already `Won`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::DamageEvent;
use crate::ids::PlayerId;
use crate::value_objects::BossHealth;

/// Where the encounter is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterPhase {
    /// Boss still standing; damage is accepted
    Active,
    /// Boss defeated; waiting for the player to acknowledge
    Won,
}

/// What a damage application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Boss took damage and is still standing
    Damaged {
        previous: BossHealth,
        current: BossHealth,
    },
    /// Boss health reached zero
    Defeated { previous: BossHealth },
}

impl DamageOutcome {
    /// Classify a committed change from `previous` to `current`.
    pub fn between(previous: BossHealth, current: BossHealth) -> Self {
        if current.is_depleted() {
            Self::Defeated { previous }
        } else {
            Self::Damaged { previous, current }
        }
    }

    pub fn previous(&self) -> BossHealth {
        match self {
            Self::Damaged { previous, .. } | Self::Defeated { previous } => *previous,
        }
    }

    pub fn current(&self) -> BossHealth {
        match self {
            Self::Damaged { current, .. } => *current,
            Self::Defeated { .. } => BossHealth::depleted(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        matches!(self, Self::Defeated { .. })
    }
}

/// A player's boss encounter.
///
/// # Invariants
///
/// - `health` is always in `0..=100` (enforced by `BossHealth`)
/// - the encounter is `Won` exactly when health is 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossEncounter {
    owner_id: PlayerId,
    health: BossHealth,
}

impl BossEncounter {
    /// A fresh encounter at full health.
    pub fn new(owner_id: PlayerId) -> Self {
        Self {
            owner_id,
            health: BossHealth::full(),
        }
    }

    /// Rebuild from a stored health value.
    pub fn with_health(owner_id: PlayerId, health: BossHealth) -> Self {
        Self { owner_id, health }
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn health(&self) -> BossHealth {
        self.health
    }

    pub fn phase(&self) -> EncounterPhase {
        if self.health.is_depleted() {
            EncounterPhase::Won
        } else {
            EncounterPhase::Active
        }
    }

    pub fn is_won(&self) -> bool {
        self.phase() == EncounterPhase::Won
    }

    /// Fails unless the boss can still take damage.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_won() {
            return Err(DomainError::invalid_state_transition(
                "Boss is already defeated; acknowledge the win first",
            ));
        }
        Ok(())
    }

    /// Apply `amount` damage: `health = max(0, health − amount)`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` when the encounter is `Won`.
    pub fn apply_damage(&mut self, amount: u32) -> Result<DamageOutcome, DomainError> {
        self.ensure_active()?;
        let previous = self.health;
        self.health = previous.after_damage(amount);
        Ok(DamageOutcome::between(previous, self.health))
    }

    /// Apply a damage event aimed at this encounter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if the event targets another player.
    pub fn apply(&mut self, event: &DamageEvent) -> Result<DamageOutcome, DomainError> {
        if event.owner_id() != self.owner_id {
            return Err(DomainError::constraint(format!(
                "Damage event for player {} applied to encounter of {}",
                event.owner_id(),
                self.owner_id
            )));
        }
        self.apply_damage(u32::from(event.amount()))
    }

    /// Reset a won encounter to full health for a new cycle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the encounter is `Won`.
    pub fn acknowledge_win(&mut self) -> Result<(), DomainError> {
        if !self.is_won() {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot acknowledge a win while the boss has {} health",
                self.health
            )));
        }
        self.health = BossHealth::full();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AttemptId;

    #[test]
    fn starts_active_at_full_health() {
        let encounter = BossEncounter::new(PlayerId::new());
        assert_eq!(encounter.health(), BossHealth::full());
        assert_eq!(encounter.phase(), EncounterPhase::Active);
    }

    #[test]
    fn damage_decrements_health() {
        let mut encounter = BossEncounter::new(PlayerId::new());
        let outcome = encounter.apply_damage(25).unwrap();
        assert_eq!(
            outcome,
            DamageOutcome::Damaged {
                previous: BossHealth::full(),
                current: BossHealth::new(75).unwrap(),
            }
        );
    }

    #[test]
    fn repeated_damage_always_ends_won() {
        for amount in [1u32, 7, 20, 25, 33, 100] {
            let mut encounter = BossEncounter::new(PlayerId::new());
            let mut last = None;
            while !encounter.is_won() {
                last = Some(encounter.apply_damage(amount).unwrap());
            }
            assert!(matches!(last, Some(DamageOutcome::Defeated { .. })));
            assert_eq!(encounter.health().value(), 0);
        }
    }

    #[test]
    fn overkill_clamps_at_zero() {
        let mut encounter = BossEncounter::with_health(PlayerId::new(), BossHealth::new(10).unwrap());
        let outcome = encounter.apply_damage(25).unwrap();
        assert_eq!(
            outcome,
            DamageOutcome::Defeated {
                previous: BossHealth::new(10).unwrap()
            }
        );
        assert_eq!(encounter.health().value(), 0);
    }

    #[test]
    fn won_encounter_rejects_damage() {
        let mut encounter = BossEncounter::with_health(PlayerId::new(), BossHealth::depleted());
        let err = encounter.apply_damage(20).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
    }

    #[test]
    fn acknowledge_resets_to_full() {
        let mut encounter = BossEncounter::with_health(PlayerId::new(), BossHealth::depleted());
        encounter.acknowledge_win().unwrap();
        assert_eq!(encounter.health(), BossHealth::full());
        assert_eq!(encounter.phase(), EncounterPhase::Active);
    }

    #[test]
    fn acknowledge_requires_win() {
        let mut encounter = BossEncounter::new(PlayerId::new());
        let err = encounter.acknowledge_win().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
    }

    #[test]
    fn event_for_other_player_is_rejected() {
        let mut encounter = BossEncounter::new(PlayerId::new());
        let event = DamageEvent::new(PlayerId::new(), AttemptId::new(), 20).unwrap();
        assert!(matches!(
            encounter.apply(&event),
            Err(DomainError::Constraint(_))
        ));
        assert_eq!(encounter.health(), BossHealth::full());
    }
}
