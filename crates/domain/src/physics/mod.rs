//! Physics formulas behind the mini-games.
//!
//! Everything here is pure and deterministic. Gravity is always supplied by the
//! caller so tests can pin it. Inputs are expected to be validated already;
//! malformed numbers produce `NaN` rather than errors.

mod collision;
mod kinematics;
mod projectile;
mod simulation;

pub use collision::{
    collision_outcome, kinetic_energy, momentum, CollisionKind, CollisionReport,
};
pub use kinematics::{
    free_fall_height, friction_limited_acceleration, jump_apex_height, jump_launch_velocity,
    net_push_force, MotionState,
};
pub use projectile::{
    compute_projectile, flight_time, projectile_range, Trajectory, TrajectoryPoint,
    TRAJECTORY_STEPS,
};
pub use simulation::{Frame, Simulation, Step};
