extern crate self as stressdungeon_domain;

pub mod aggregates;
pub mod error;
pub mod events;
pub mod ids;
pub mod mini_game;
pub mod physics;
pub mod value_objects;

pub use aggregates::{BossEncounter, DamageOutcome, EncounterPhase};
pub use error::DomainError;
pub use events::DamageEvent;
pub use ids::{AttemptId, PlayerId};

// Re-export mini-game types
pub use mini_game::{
    plan_attempt, AttemptDetail, AttemptOutcome, AttemptPlan, AttemptState, FailureReason,
    GameInputs, InvalidReason, MiniGame, MiniGameAttempt, MiniGameRules, ParameterError,
    ParameterSpec, RawParameters, Role,
};

// Re-export physics formulas
pub use physics::{
    collision_outcome, compute_projectile, free_fall_height, friction_limited_acceleration,
    jump_apex_height, jump_launch_velocity, net_push_force, projectile_range, CollisionKind,
    CollisionReport, Frame, MotionState, Simulation, Step, Trajectory, TrajectoryPoint,
};

pub use value_objects::{BossHealth, MAX_BOSS_HEALTH};
