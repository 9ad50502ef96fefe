//! Constant-acceleration kinematics: free fall, friction-limited pushes and jumps.

use serde::{Deserialize, Serialize};

/// Height after `elapsed` seconds: `h0 + v0·t − ½·g·t²`, never below ground.
///
/// `initial_velocity` is positive upwards.
pub fn free_fall_height(
    initial_height: f64,
    initial_velocity: f64,
    gravity: f64,
    elapsed: f64,
) -> f64 {
    let height =
        initial_height + initial_velocity * elapsed - 0.5 * gravity * elapsed * elapsed;
    height.max(0.0)
}

/// Push force left over after kinetic friction: `F − μ·m·g`.
pub fn net_push_force(force: f64, mass: f64, friction_coefficient: f64, gravity: f64) -> f64 {
    force - friction_coefficient * mass * gravity
}

/// Acceleration of a pushed body, or `None` when friction wins and it never moves.
pub fn friction_limited_acceleration(
    force: f64,
    mass: f64,
    friction_coefficient: f64,
    gravity: f64,
) -> Option<f64> {
    let net_force = net_push_force(force, mass, friction_coefficient, gravity);
    if net_force <= 0.0 {
        return None;
    }
    Some(net_force / mass)
}

/// Launch velocity of a jump, negative meaning upwards (screen coordinates).
///
/// Returns `None` when the value is not negative, i.e. the body cannot leave
/// the ground.
pub fn jump_launch_velocity(jump_force: f64, mass: f64) -> Option<f64> {
    let velocity = -jump_force / mass;
    if velocity >= 0.0 {
        return None;
    }
    Some(velocity)
}

/// Peak height reached from a launch velocity: `v0² / 2g`.
pub fn jump_apex_height(launch_velocity: f64, gravity: f64) -> f64 {
    launch_velocity.powi(2) / (2.0 * gravity)
}

/// Position and velocity of a body moving along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub position: f64,
    pub velocity: f64,
}

impl MotionState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Semi-implicit Euler step: velocity is updated first, then position.
    pub fn step(&mut self, acceleration: f64, dt: f64) {
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_follows_parabola() {
        let h = free_fall_height(100.0, 0.0, 9.8, 2.0);
        assert!((h - (100.0 - 0.5 * 9.8 * 4.0)).abs() < 1e-9);
    }

    #[test]
    fn free_fall_with_upward_throw_rises_first() {
        let h = free_fall_height(10.0, 5.0, 9.8, 0.2);
        assert!(h > 10.0);
    }

    #[test]
    fn free_fall_clamps_at_ground() {
        assert_eq!(free_fall_height(5.0, 0.0, 9.8, 10.0), 0.0);
    }

    #[test]
    fn push_overcomes_friction() {
        let acceleration = friction_limited_acceleration(50.0, 5.0, 0.2, 9.8).unwrap();
        assert!((net_push_force(50.0, 5.0, 0.2, 9.8) - 40.2).abs() < 1e-9);
        assert!((acceleration - 8.04).abs() < 1e-9);
    }

    #[test]
    fn push_loses_to_friction() {
        assert!(net_push_force(5.0, 5.0, 0.5, 9.8) < 0.0);
        assert_eq!(friction_limited_acceleration(5.0, 5.0, 0.5, 9.8), None);
    }

    #[test]
    fn push_exactly_balanced_does_not_move() {
        // 0.5 * 2 * 10 = 10
        assert_eq!(friction_limited_acceleration(10.0, 2.0, 0.5, 10.0), None);
    }

    #[test]
    fn jump_launch_velocity_points_up() {
        assert_eq!(jump_launch_velocity(50.0, 5.0), Some(-10.0));
        assert_eq!(jump_launch_velocity(10.0, 5.0), Some(-2.0));
    }

    #[test]
    fn jump_without_force_fails() {
        assert_eq!(jump_launch_velocity(0.0, 5.0), None);
        assert_eq!(jump_launch_velocity(-20.0, 5.0), None);
    }

    #[test]
    fn apex_height_from_launch() {
        let apex = jump_apex_height(-10.0, 9.8);
        assert!((apex - 100.0 / 19.6).abs() < 1e-9);
    }

    #[test]
    fn euler_step_updates_velocity_before_position() {
        let mut state = MotionState::default();
        state.step(8.04, 0.1);
        assert!((state.velocity - 0.804).abs() < 1e-12);
        assert!((state.position - 0.0804).abs() < 1e-12);
    }
}
