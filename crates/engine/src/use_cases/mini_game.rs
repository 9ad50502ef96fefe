//! Mini-game session controller.
//!
//! One controller serves every role. `start` validates the raw text inputs,
//! plans the attempt and hands it to a runner task. Stepped games advance one
//! frame per tick and publish each frame for rendering; the runner checks the
//! attempt's cancellation token at every tick. A successful attempt applies
//! exactly one damage event to the encounter it was started against.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stressdungeon_domain::{
    plan_attempt, AttemptDetail, AttemptId, AttemptOutcome, AttemptPlan, Frame, GameInputs,
    InvalidReason, MiniGame, MiniGameAttempt, MiniGameRules, ParameterError, RawParameters,
    Simulation,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::encounter::EncounterHandle;
use crate::infrastructure::ports::{ClockPort, RandomPort};

/// Frames buffered per attempt before new ones are dropped.
const FRAME_BUFFER: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum MiniGameError {
    #[error(transparent)]
    Validation(#[from] ParameterError),
    #[error("Attempt runner stopped unexpectedly: {0}")]
    Aborted(String),
}

impl MiniGameError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => format!("Invalid input: {}", e),
            Self::Aborted(_) => "The simulation stopped unexpectedly. Please try again.".to_string(),
        }
    }
}

/// Pacing for stepped simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    /// Delay between frames; zero yields to the scheduler instead of sleeping
    pub frame_interval: Duration,
    /// Frames streamed before stepping stops and the planned outcome is emitted
    pub max_frames: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            max_frames: 10_000,
        }
    }
}

/// What happened to the damage of a resolved attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DamageDelivery {
    /// Outcome carried no damage
    NotApplicable,
    Applied { amount: u8, health: u8 },
    /// Attempt succeeded but the store rejected or lost the decrement
    Failed { amount: u8, message: String },
}

/// Everything known about an attempt once it has resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptReport {
    pub attempt_id: AttemptId,
    pub game: MiniGame,
    pub outcome: AttemptOutcome,
    pub detail: AttemptDetail,
    pub frames: u32,
    pub delivery: DamageDelivery,
    pub started_at: DateTime<Utc>,
}

impl AttemptReport {
    pub fn message(&self) -> String {
        match &self.delivery {
            DamageDelivery::Failed { message, .. } => {
                format!("{} {}", self.outcome.message(), message)
            }
            _ => self.outcome.message(),
        }
    }
}

/// A running (or already resolved) attempt.
///
/// Dropping the handle cancels the attempt.
pub struct AttemptHandle {
    attempt_id: AttemptId,
    game: MiniGame,
    frames: mpsc::Receiver<Frame>,
    cancel: CancellationToken,
    task: JoinHandle<AttemptReport>,
    _cancel_on_drop: DropGuard,
}

impl AttemptHandle {
    pub fn id(&self) -> AttemptId {
        self.attempt_id
    }

    pub fn game(&self) -> MiniGame {
        self.game
    }

    /// Stop the simulation; a cancelled attempt never deals damage.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Next rendered frame, or `None` once the simulation has ended.
    pub async fn next_frame(&mut self) -> Option<Frame> {
        self.frames.recv().await
    }

    /// Wait for the attempt to resolve.
    pub async fn wait(self) -> Result<AttemptReport, MiniGameError> {
        self.task
            .await
            .map_err(|e| MiniGameError::Aborted(e.to_string()))
    }
}

pub struct MiniGameController {
    rules: MiniGameRules,
    settings: SimulationSettings,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl MiniGameController {
    pub fn new(
        rules: MiniGameRules,
        settings: SimulationSettings,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            rules,
            settings,
            random,
            clock,
        }
    }

    pub fn rules(&self) -> &MiniGameRules {
        &self.rules
    }

    /// Parse raw inputs without starting an attempt.
    pub fn validate(&self, game: MiniGame, raw: &RawParameters) -> Result<GameInputs, MiniGameError> {
        Ok(GameInputs::parse(game, raw)?)
    }

    /// Start one attempt against `encounter`. Must be called inside a Tokio runtime.
    pub fn start(
        &self,
        encounter: &EncounterHandle,
        game: MiniGame,
        raw: &RawParameters,
    ) -> AttemptHandle {
        let attempt = MiniGameAttempt::new(encounter.owner_id(), game, self.clock.now());
        let attempt_id = attempt.id();

        let plan = match GameInputs::parse(game, raw) {
            Ok(inputs) => plan_attempt(&inputs, &self.rules, |min, max| {
                self.random.gen_range(min, max)
            }),
            Err(e) => {
                tracing::debug!(
                    attempt_id = %attempt_id,
                    game = %game,
                    error = %e,
                    "Attempt rejected"
                );
                AttemptPlan::Resolved {
                    outcome: AttemptOutcome::Invalid(InvalidReason::Validation(e.to_string())),
                    detail: AttemptDetail::Rejected,
                }
            }
        };

        tracing::debug!(
            player_id = %encounter.owner_id(),
            attempt_id = %attempt_id,
            game = %game,
            "Attempt started"
        );

        let (frame_tx, frame_rx) = mpsc::channel(FRAME_BUFFER);
        let cancel = CancellationToken::new();
        let runner = AttemptRunner {
            attempt,
            encounter: encounter.clone(),
            frames: frame_tx,
            cancel: cancel.clone(),
            settings: self.settings,
        };
        let task = tokio::spawn(runner.run(plan));

        AttemptHandle {
            attempt_id,
            game,
            frames: frame_rx,
            cancel: cancel.clone(),
            task,
            _cancel_on_drop: cancel.drop_guard(),
        }
    }
}

enum DriveResult {
    Finished,
    Cancelled,
    Capped,
}

struct AttemptRunner {
    attempt: MiniGameAttempt,
    encounter: EncounterHandle,
    frames: mpsc::Sender<Frame>,
    cancel: CancellationToken,
    settings: SimulationSettings,
}

impl AttemptRunner {
    async fn run(mut self, plan: AttemptPlan) -> AttemptReport {
        let (detail, frames) = match plan {
            AttemptPlan::Resolved { outcome, detail } => {
                self.resolve(outcome);
                (detail, 0)
            }
            AttemptPlan::Simulate {
                mut simulation,
                on_finish,
                detail,
            } => {
                if let Err(e) = self.attempt.begin() {
                    tracing::warn!(attempt_id = %self.attempt.id(), error = %e, "Attempt already started");
                }
                match self.drive(&mut simulation).await {
                    DriveResult::Finished | DriveResult::Capped => self.resolve(on_finish),
                    DriveResult::Cancelled => {
                        if let Err(e) = self.attempt.cancel() {
                            tracing::warn!(attempt_id = %self.attempt.id(), error = %e, "Cancel ignored");
                        }
                    }
                }
                (detail, simulation.frames())
            }
        };

        let outcome = self
            .attempt
            .outcome()
            .cloned()
            .unwrap_or(AttemptOutcome::Invalid(InvalidReason::Cancelled));
        tracing::info!(
            player_id = %self.attempt.owner_id(),
            attempt_id = %self.attempt.id(),
            game = %self.attempt.game(),
            frames,
            success = outcome.is_success(),
            "{}",
            outcome.message()
        );

        let delivery = self.deliver_damage().await;
        AttemptReport {
            attempt_id: self.attempt.id(),
            game: self.attempt.game(),
            outcome,
            detail,
            frames,
            delivery,
            started_at: self.attempt.started_at(),
        }
    }

    fn resolve(&mut self, outcome: AttemptOutcome) {
        if let Err(e) = self.attempt.resolve(outcome) {
            tracing::warn!(attempt_id = %self.attempt.id(), error = %e, "Attempt already resolved");
        }
    }

    async fn drive(&self, simulation: &mut Simulation) -> DriveResult {
        loop {
            if self.cancel.is_cancelled() {
                return DriveResult::Cancelled;
            }
            if simulation.frames() >= self.settings.max_frames {
                tracing::debug!(
                    attempt_id = %self.attempt.id(),
                    frames = simulation.frames(),
                    "Frame cap reached, skipping to the planned outcome"
                );
                return DriveResult::Capped;
            }

            let step = simulation.step();
            let frame = step.frame();
            tracing::trace!(
                attempt_id = %self.attempt.id(),
                index = frame.index,
                position = frame.position,
                velocity = frame.velocity,
                "Frame"
            );
            if let Err(mpsc::error::TrySendError::Full(_)) = self.frames.try_send(frame) {
                tracing::trace!(attempt_id = %self.attempt.id(), index = frame.index, "Frame dropped");
            }
            if step.is_finished() {
                return DriveResult::Finished;
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return DriveResult::Cancelled,
                _ = pace(self.settings.frame_interval) => {}
            }
        }
    }

    async fn deliver_damage(&self) -> DamageDelivery {
        let Some(event) = self.attempt.damage_event() else {
            return DamageDelivery::NotApplicable;
        };
        match self.encounter.apply_damage(&event).await {
            Ok(outcome) => DamageDelivery::Applied {
                amount: event.amount(),
                health: outcome.current().value(),
            },
            Err(e) => {
                tracing::error!(
                    player_id = %event.owner_id(),
                    attempt_id = %event.attempt_id(),
                    amount = event.amount(),
                    error = %e,
                    "Failed to apply damage"
                );
                DamageDelivery::Failed {
                    amount: event.amount(),
                    message: e.user_message(),
                }
            }
        }
    }
}

async fn pace(interval: Duration) {
    if interval.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(interval).await;
    }
}
