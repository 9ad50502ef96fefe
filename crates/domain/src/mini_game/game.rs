//! The catalogue of mini-games.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::parameters::{Bound, ParameterSpec};
use super::role::Role;
use super::rules::MiniGameRules;
use crate::physics::CollisionKind;

const PROJECTILE_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("velocity", "Velocity (m/s)", "20", Bound::Positive),
    ParameterSpec::new("angle", "Angle (degrees)", "45", Bound::LaunchAngle),
    ParameterSpec::new("gravity", "Gravity (m/s²)", "9.8", Bound::Positive),
];

const COLLISION_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("mass1", "Mass 1 (kg)", "2", Bound::Positive),
    ParameterSpec::new("velocity1", "Velocity 1 (m/s)", "3", Bound::Any),
    ParameterSpec::new("mass2", "Mass 2 (kg)", "4", Bound::Positive),
    ParameterSpec::new("velocity2", "Velocity 2 (m/s)", "-2", Bound::Any),
];

const PUSH_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("force", "Push force (N)", "50", Bound::Any),
    ParameterSpec::new("mass", "Mass (kg)", "5", Bound::Positive),
    ParameterSpec::new("friction", "Friction coefficient", "0.2", Bound::NonNegative),
];

const JUMP_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("jumpForce", "Jump force (N)", "50", Bound::Any),
    ParameterSpec::new("mass", "Mass (kg)", "5", Bound::Positive),
];

const FALL_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("height", "Initial height (m)", "20", Bound::NonNegative),
    ParameterSpec::new("velocity", "Initial velocity (m/s, up positive)", "0", Bound::Any),
    ParameterSpec::new("gravity", "Gravity (m/s²)", "9.8", Bound::Positive),
];

/// A physics puzzle a role can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum MiniGame {
    /// Hit a random target distance with a projectile
    KnightProjectile,
    /// Compare momentum and energy across a collision
    GuardianCollision { kind: CollisionKind },
    /// Push an arrow past friction until it reaches the boss
    ArcherPush,
    /// Jump high enough to strike the boss
    SorcererJump,
    /// Watch a body fall to the ground
    SorcererFall,
}

impl MiniGame {
    pub fn role(&self) -> Role {
        match self {
            Self::KnightProjectile => Role::Knight,
            Self::GuardianCollision { .. } => Role::Guardian,
            Self::ArcherPush => Role::Archer,
            Self::SorcererJump | Self::SorcererFall => Role::Sorcerer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::KnightProjectile => "knight_projectile",
            Self::GuardianCollision {
                kind: CollisionKind::Elastic,
            } => "guardian_elastic_collision",
            Self::GuardianCollision {
                kind: CollisionKind::Inelastic,
            } => "guardian_inelastic_collision",
            Self::ArcherPush => "archer_push",
            Self::SorcererJump => "sorcerer_jump",
            Self::SorcererFall => "sorcerer_fall",
        }
    }

    /// Input fields, in form order, with their default text.
    pub fn parameters(&self) -> &'static [ParameterSpec] {
        match self {
            Self::KnightProjectile => PROJECTILE_PARAMETERS,
            Self::GuardianCollision { .. } => COLLISION_PARAMETERS,
            Self::ArcherPush => PUSH_PARAMETERS,
            Self::SorcererJump => JUMP_PARAMETERS,
            Self::SorcererFall => FALL_PARAMETERS,
        }
    }

    /// Damage dealt on success; `None` for observational games.
    pub fn damage(&self, rules: &MiniGameRules) -> Option<u8> {
        match self {
            Self::KnightProjectile => Some(rules.knight_damage),
            Self::ArcherPush => Some(rules.archer_damage),
            Self::SorcererJump => Some(rules.sorcerer_damage),
            Self::GuardianCollision { .. } | Self::SorcererFall => None,
        }
    }

    /// Observational games never pass or fail.
    pub fn is_observational(&self) -> bool {
        matches!(self, Self::GuardianCollision { .. } | Self::SorcererFall)
    }

    /// Whether the result needs frame stepping rather than a closed form.
    pub fn is_stepped(&self) -> bool {
        matches!(
            self,
            Self::ArcherPush | Self::SorcererJump | Self::SorcererFall
        )
    }
}

impl fmt::Display for MiniGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
