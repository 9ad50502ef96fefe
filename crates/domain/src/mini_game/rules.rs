//! Gameplay constants for the mini-games.

use serde::{Deserialize, Serialize};

/// Tunable rules shared by every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniGameRules {
    pub knight_damage: u8,
    pub archer_damage: u8,
    pub sorcerer_damage: u8,
    /// Allowed distance between landing point and target for a Knight hit
    pub hit_tolerance: f64,
    /// Inclusive bounds for the Knight's random target distance
    pub target_min: i32,
    pub target_max: i32,
    /// Minimum apex a Sorcerer jump must reach
    pub jump_apex_threshold: f64,
    /// Step for the Archer slide and Sorcerer jump (seconds)
    pub coarse_time_step: f64,
    /// Step for the Sorcerer fall (seconds)
    pub fine_time_step: f64,
    /// Gravity for games that do not take it as a parameter
    pub standard_gravity: f64,
    /// Distance the Archer's arrow must travel to reach the boss
    pub archer_track_length: f64,
}

impl Default for MiniGameRules {
    fn default() -> Self {
        Self {
            knight_damage: 25,
            archer_damage: 20,
            sorcerer_damage: 25,
            hit_tolerance: 5.0,
            target_min: 20,
            target_max: 100,
            jump_apex_threshold: 10.0,
            coarse_time_step: 0.1,
            fine_time_step: 1.0 / 60.0,
            standard_gravity: 9.8,
            archer_track_length: 360.0,
        }
    }
}
