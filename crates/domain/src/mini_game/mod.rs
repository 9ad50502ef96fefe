//! Mini-games - role-specific physics puzzles that can damage the boss.
//!
//! One controller handles every role. A mini-game is described by its
//! parameter list, a plan (closed-form result or stepped simulation) and the
//! outcome to emit when the plan completes.

mod attempt;
mod game;
mod parameters;
mod plan;
mod role;
mod rules;

pub use attempt::{AttemptOutcome, AttemptState, FailureReason, InvalidReason, MiniGameAttempt};
pub use game::MiniGame;
pub use parameters::{Bound, GameInputs, ParameterError, ParameterSpec, RawParameters};
pub use plan::{plan_attempt, AttemptDetail, AttemptPlan};
pub use role::Role;
pub use rules::MiniGameRules;
