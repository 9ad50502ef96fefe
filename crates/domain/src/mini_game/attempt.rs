//! MiniGameAttempt - the transient lifecycle of one "Simulate" press
//!
//! ```text
//! Idle --begin--> Running --resolve--> Resolved(outcome)
//!   \                 \--cancel--> Resolved(Invalid(Cancelled))
//!    \--resolve--> Resolved(outcome)      (rejected input)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::game::MiniGame;
use crate::error::DomainError;
use crate::events::DamageEvent;
use crate::ids::{AttemptId, PlayerId};

/// Why an attempt ended without a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "message", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Parameters were rejected before anything ran
    Validation(String),
    /// Player stopped the simulation
    Cancelled,
}

/// Why an attempt failed to damage the boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// Projectile landed outside the tolerance window
    Missed {
        target: f64,
        reached: f64,
        difference: f64,
    },
    /// Friction wins; `net_force` is the push left after friction
    InsufficientForce { net_force: f64 },
    /// Jump force too small to leave the ground
    NoLift { jump_force: f64 },
    /// Jump landed without reaching the required apex
    BelowThreshold { apex: f64, threshold: f64 },
}

/// Final result of an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success { damage: u8 },
    Failure(FailureReason),
    /// Informational game finished; nothing to win or lose
    Observed,
    Invalid(InvalidReason),
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Damage to deal, only for successes.
    pub fn damage(&self) -> Option<u8> {
        match self {
            Self::Success { damage } => Some(*damage),
            _ => None,
        }
    }

    /// Text shown to the player once the attempt resolves.
    pub fn message(&self) -> String {
        match self {
            Self::Success { damage } => format!("Hit! The boss takes {} damage.", damage),
            Self::Failure(FailureReason::Missed { difference, .. }) => {
                format!("Miss! You missed by {:.2} meters. Keep trying!", difference)
            }
            Self::Failure(FailureReason::InsufficientForce { .. }) => {
                "Insufficient force: the push is too small to overcome friction!".to_string()
            }
            Self::Failure(FailureReason::NoLift { .. }) => {
                "Insufficient force: the jump cannot leave the ground!".to_string()
            }
            Self::Failure(FailureReason::BelowThreshold { apex, threshold }) => format!(
                "The jump peaked at {:.2} meters; it must reach {:.0} meters.",
                apex, threshold
            ),
            Self::Observed => "Simulation complete.".to_string(),
            Self::Invalid(InvalidReason::Validation(message)) => {
                format!("Invalid input: {}", message)
            }
            Self::Invalid(InvalidReason::Cancelled) => "Simulation stopped.".to_string(),
        }
    }
}

/// Lifecycle state of an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    Idle,
    Running,
    Resolved(AttemptOutcome),
}

/// One attempt at a mini-game. Never persisted.
#[derive(Debug, Clone)]
pub struct MiniGameAttempt {
    id: AttemptId,
    owner_id: PlayerId,
    game: MiniGame,
    state: AttemptState,
    started_at: DateTime<Utc>,
}

impl MiniGameAttempt {
    pub fn new(owner_id: PlayerId, game: MiniGame, now: DateTime<Utc>) -> Self {
        Self {
            id: AttemptId::new(),
            owner_id,
            game,
            state: AttemptState::Idle,
            started_at: now,
        }
    }

    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn game(&self) -> MiniGame {
        self.game
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AttemptState::Running)
    }

    pub fn outcome(&self) -> Option<&AttemptOutcome> {
        match &self.state {
            AttemptState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Idle → Running.
    pub fn begin(&mut self) -> Result<(), DomainError> {
        match self.state {
            AttemptState::Idle => {
                self.state = AttemptState::Running;
                Ok(())
            }
            _ => Err(DomainError::invalid_state_transition(format!(
                "Attempt {} already started",
                self.id
            ))),
        }
    }

    /// Idle | Running → Resolved.
    pub fn resolve(&mut self, outcome: AttemptOutcome) -> Result<(), DomainError> {
        if let AttemptState::Resolved(_) = self.state {
            return Err(DomainError::invalid_state_transition(format!(
                "Attempt {} already resolved",
                self.id
            )));
        }
        self.state = AttemptState::Resolved(outcome);
        Ok(())
    }

    /// Running → Resolved(Invalid(Cancelled)).
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if !self.is_running() {
            return Err(DomainError::invalid_state_transition(format!(
                "Attempt {} is not running",
                self.id
            )));
        }
        self.state = AttemptState::Resolved(AttemptOutcome::Invalid(InvalidReason::Cancelled));
        Ok(())
    }

    /// The damage event this attempt produces, if it resolved as a success.
    pub fn damage_event(&self) -> Option<DamageEvent> {
        let damage = self.outcome()?.damage()?;
        DamageEvent::new(self.owner_id, self.id, damage).ok()
    }
}
