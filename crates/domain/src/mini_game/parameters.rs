//! Text parameters entered by the player, parsed into typed inputs.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::game::MiniGame;
use crate::physics::CollisionKind;

/// Parameter text keyed by parameter name, as typed into the form.
pub type RawParameters = HashMap<String, String>;

/// Domain restriction on a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Any,
    Positive,
    NonNegative,
    /// Launch angle in degrees, `(0, 90]`
    LaunchAngle,
}

impl Bound {
    fn admits(&self, value: f64) -> bool {
        match self {
            Self::Any => true,
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
            Self::LaunchAngle => value > 0.0 && value <= 90.0,
        }
    }

    fn requirement(&self) -> &'static str {
        match self {
            Self::Any => "must be a number",
            Self::Positive => "must be greater than zero",
            Self::NonNegative => "must not be negative",
            Self::LaunchAngle => "must be between 0 (exclusive) and 90 degrees",
        }
    }
}

/// One form field of a mini-game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Text used when the field is not supplied
    pub default: &'static str,
    pub bound: Bound,
}

impl ParameterSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        default: &'static str,
        bound: Bound,
    ) -> Self {
        Self {
            key,
            label,
            default,
            bound,
        }
    }
}

/// Why a parameter was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{key} must be a number, got '{value}'")]
    NotANumber { key: &'static str, value: String },
    #[error("{key} must be a finite number")]
    NotFinite { key: &'static str },
    #[error("{key} {requirement}, got {value}")]
    OutOfDomain {
        key: &'static str,
        value: f64,
        requirement: &'static str,
    },
    #[error("Unknown parameter '{0}'")]
    Unknown(String),
    #[error("Missing parameter '{0}'")]
    Missing(&'static str),
}

/// Validated numeric inputs for one mini-game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInputs {
    Projectile {
        velocity: f64,
        angle_degrees: f64,
        gravity: f64,
    },
    Collision {
        kind: CollisionKind,
        mass1: f64,
        velocity1: f64,
        mass2: f64,
        velocity2: f64,
    },
    Push {
        force: f64,
        mass: f64,
        friction: f64,
    },
    Jump {
        force: f64,
        mass: f64,
    },
    Fall {
        height: f64,
        velocity: f64,
        gravity: f64,
    },
}

impl GameInputs {
    /// Parse and validate form text for `game`.
    ///
    /// Fields absent from `raw` take their default text. Present fields must
    /// parse as finite numbers within the field's bound.
    pub fn parse(game: MiniGame, raw: &RawParameters) -> Result<Self, ParameterError> {
        let specs = game.parameters();
        if let Some(unknown) = raw.keys().find(|k| !specs.iter().any(|s| s.key == k.as_str())) {
            return Err(ParameterError::Unknown(unknown.clone()));
        }

        let mut values = BTreeMap::new();
        for spec in specs {
            let text = raw.get(spec.key).map(String::as_str).unwrap_or(spec.default);
            values.insert(spec.key, parse_value(spec, text)?);
        }
        let take = |key: &'static str| values.get(key).copied().ok_or(ParameterError::Missing(key));

        let inputs = match game {
            MiniGame::KnightProjectile => Self::Projectile {
                velocity: take("velocity")?,
                angle_degrees: take("angle")?,
                gravity: take("gravity")?,
            },
            MiniGame::GuardianCollision { kind } => Self::Collision {
                kind,
                mass1: take("mass1")?,
                velocity1: take("velocity1")?,
                mass2: take("mass2")?,
                velocity2: take("velocity2")?,
            },
            MiniGame::ArcherPush => Self::Push {
                force: take("force")?,
                mass: take("mass")?,
                friction: take("friction")?,
            },
            MiniGame::SorcererJump => Self::Jump {
                force: take("jumpForce")?,
                mass: take("mass")?,
            },
            MiniGame::SorcererFall => Self::Fall {
                height: take("height")?,
                velocity: take("velocity")?,
                gravity: take("gravity")?,
            },
        };
        Ok(inputs)
    }
}

fn parse_value(spec: &ParameterSpec, text: &str) -> Result<f64, ParameterError> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| ParameterError::NotANumber {
        key: spec.key,
        value: trimmed.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { key: spec.key });
    }
    if !spec.bound.admits(value) {
        return Err(ParameterError::OutOfDomain {
            key: spec.key,
            value,
            requirement: spec.bound.requirement(),
        });
    }
    Ok(value)
}
