//! Projectile motion on flat ground.

use serde::{Deserialize, Serialize};

/// Number of equal time slices used to sample a trajectory.
pub const TRAJECTORY_STEPS: usize = 50;

/// One sampled point of a projectile path (x forward, y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
}

/// Closed-form result of a launch plus the samples used to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    pub range: f64,
    pub flight_time: f64,
    /// Samples with non-negative height, in flight order
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Highest sampled height, 0 when nothing was sampled.
    pub fn max_sampled_height(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(0.0, f64::max)
    }
}

/// Total time aloft: `2·v·sinθ / g`.
pub fn flight_time(velocity: f64, angle_degrees: f64, gravity: f64) -> f64 {
    2.0 * velocity * angle_degrees.to_radians().sin() / gravity
}

/// Horizontal distance covered before landing: `v·cosθ · t_flight`.
pub fn projectile_range(velocity: f64, angle_degrees: f64, gravity: f64) -> f64 {
    let angle = angle_degrees.to_radians();
    velocity * angle.cos() * flight_time(velocity, angle_degrees, gravity)
}

/// Range, flight time and a discretized path of the launch.
///
/// The path is sampled at `TRAJECTORY_STEPS + 1` instants from launch to the
/// computed landing time; samples that dip below ground (rounding at landing)
/// are dropped.
pub fn compute_projectile(velocity: f64, angle_degrees: f64, gravity: f64) -> Trajectory {
    let angle = angle_degrees.to_radians();
    let total_time = flight_time(velocity, angle_degrees, gravity);
    let (sin, cos) = angle.sin_cos();

    let points = (0..=TRAJECTORY_STEPS)
        .map(|i| {
            let t = total_time / TRAJECTORY_STEPS as f64 * i as f64;
            TrajectoryPoint {
                x: velocity * cos * t,
                y: velocity * sin * t - 0.5 * gravity * t * t,
            }
        })
        .filter(|p| p.y >= 0.0)
        .collect();

    Trajectory {
        range: velocity * cos * total_time,
        flight_time: total_time,
        points,
    }
}
