//! One-dimensional two-body collisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How the two bodies interact on impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    /// Momentum and kinetic energy are both conserved
    Elastic,
    /// Bodies stick together; only momentum is conserved
    Inelastic,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elastic => "elastic",
            Self::Inelastic => "inelastic",
        }
    }
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elastic" => Ok(Self::Elastic),
            "inelastic" => Ok(Self::Inelastic),
            other => Err(DomainError::parse(format!(
                "Unknown collision kind: {}",
                other
            ))),
        }
    }
}

/// Velocities of both bodies right after impact.
pub fn collision_outcome(
    mass1: f64,
    velocity1: f64,
    mass2: f64,
    velocity2: f64,
    kind: CollisionKind,
) -> (f64, f64) {
    let total_mass = mass1 + mass2;
    match kind {
        CollisionKind::Elastic => {
            let v1 = ((mass1 - mass2) * velocity1 + 2.0 * mass2 * velocity2) / total_mass;
            let v2 = ((mass2 - mass1) * velocity2 + 2.0 * mass1 * velocity1) / total_mass;
            (v1, v2)
        }
        CollisionKind::Inelastic => {
            let shared = (mass1 * velocity1 + mass2 * velocity2) / total_mass;
            (shared, shared)
        }
    }
}

/// Total linear momentum of the pair.
pub fn momentum(mass1: f64, velocity1: f64, mass2: f64, velocity2: f64) -> f64 {
    mass1 * velocity1 + mass2 * velocity2
}

/// Total kinetic energy of the pair.
pub fn kinetic_energy(mass1: f64, velocity1: f64, mass2: f64, velocity2: f64) -> f64 {
    0.5 * mass1 * velocity1.powi(2) + 0.5 * mass2 * velocity2.powi(2)
}

/// Before/after comparison shown to the Guardian player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionReport {
    pub kind: CollisionKind,
    pub velocity1_after: f64,
    pub velocity2_after: f64,
    pub momentum_before: f64,
    pub momentum_after: f64,
    pub energy_before: f64,
    pub energy_after: f64,
}

impl CollisionReport {
    pub fn compute(
        mass1: f64,
        velocity1: f64,
        mass2: f64,
        velocity2: f64,
        kind: CollisionKind,
    ) -> Self {
        let (v1_after, v2_after) = collision_outcome(mass1, velocity1, mass2, velocity2, kind);
        Self {
            kind,
            velocity1_after: v1_after,
            velocity2_after: v2_after,
            momentum_before: momentum(mass1, velocity1, mass2, velocity2),
            momentum_after: momentum(mass1, v1_after, mass2, v2_after),
            energy_before: kinetic_energy(mass1, velocity1, mass2, velocity2),
            energy_after: kinetic_energy(mass1, v1_after, mass2, v2_after),
        }
    }

    /// Kinetic energy converted to heat/deformation by the impact.
    pub fn energy_lost(&self) -> f64 {
        self.energy_before - self.energy_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn elastic_conserves_momentum_and_energy() {
        let cases = [
            (2.0, 3.0, 4.0, -2.0),
            (1.0, 10.0, 1.0, 0.0),
            (0.5, -7.25, 12.0, 3.5),
            (1e3, 0.01, 1e-3, -250.0),
        ];
        for (m1, v1, m2, v2) in cases {
            let report = CollisionReport::compute(m1, v1, m2, v2, CollisionKind::Elastic);
            let scale = report.momentum_before.abs().max(1.0);
            assert!(
                (report.momentum_before - report.momentum_after).abs() < EPS * scale,
                "momentum drift for {:?}",
                (m1, v1, m2, v2)
            );
            let scale = report.energy_before.abs().max(1.0);
            assert!((report.energy_before - report.energy_after).abs() < 1e-6 * scale);
        }
    }

    #[test]
    fn equal_masses_swap_velocities() {
        let (v1, v2) = collision_outcome(3.0, 5.0, 3.0, -1.0, CollisionKind::Elastic);
        assert!((v1 - -1.0).abs() < EPS);
        assert!((v2 - 5.0).abs() < EPS);
    }

    #[test]
    fn inelastic_shares_velocity() {
        let (v1, v2) = collision_outcome(2.0, 3.0, 4.0, -2.0, CollisionKind::Inelastic);
        assert_eq!(v1, v2);
        assert!((v1 - (2.0 * 3.0 + 4.0 * -2.0) / 6.0).abs() < EPS);
    }

    #[test]
    fn inelastic_loses_energy() {
        let report = CollisionReport::compute(2.0, 3.0, 4.0, -2.0, CollisionKind::Inelastic);
        assert!(report.energy_lost() > 0.0);
        assert!((report.momentum_before - report.momentum_after).abs() < EPS);
    }

    #[test]
    fn parses_collision_kind() {
        assert_eq!(
            "Elastic".parse::<CollisionKind>().unwrap(),
            CollisionKind::Elastic
        );
        assert_eq!(
            " inelastic ".parse::<CollisionKind>().unwrap(),
            CollisionKind::Inelastic
        );
        assert!("sticky".parse::<CollisionKind>().is_err());
    }
}
