//! Playable roles shown on the boss screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::game::MiniGame;
use crate::error::DomainError;
use crate::physics::CollisionKind;

/// A role the player can pick to attack the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ranged projectile shot at a target distance
    Knight,
    /// Shield collision study
    Guardian,
    /// Arrow pushed against friction
    Archer,
    /// Levitation jump and free fall
    Sorcerer,
}

impl Role {
    /// Roles in the order the boss screen lists them.
    pub const ALL: [Role; 4] = [Role::Knight, Role::Guardian, Role::Archer, Role::Sorcerer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knight => "knight",
            Self::Guardian => "guardian",
            Self::Archer => "archer",
            Self::Sorcerer => "sorcerer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Knight => "Knight",
            Self::Guardian => "Guardian",
            Self::Archer => "Archer",
            Self::Sorcerer => "Sorcerer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Knight => "A skilled sword master who hurls blades at a distant target.",
            Self::Guardian => "A loyal heavy-armored knight who studies every impact on the shield.",
            Self::Archer => "An expert archer whose arrows must beat friction to reach the boss.",
            Self::Sorcerer => "A mage who leaps against gravity to strike from above.",
        }
    }

    /// Mini-games this role offers; the first is the default.
    pub fn mini_games(&self) -> Vec<MiniGame> {
        match self {
            Self::Knight => vec![MiniGame::KnightProjectile],
            Self::Guardian => vec![
                MiniGame::GuardianCollision {
                    kind: CollisionKind::Elastic,
                },
                MiniGame::GuardianCollision {
                    kind: CollisionKind::Inelastic,
                },
            ],
            Self::Archer => vec![MiniGame::ArcherPush],
            Self::Sorcerer => vec![MiniGame::SorcererJump, MiniGame::SorcererFall],
        }
    }

    pub fn default_mini_game(&self) -> MiniGame {
        match self {
            Self::Knight => MiniGame::KnightProjectile,
            Self::Guardian => MiniGame::GuardianCollision {
                kind: CollisionKind::Elastic,
            },
            Self::Archer => MiniGame::ArcherPush,
            Self::Sorcerer => MiniGame::SorcererJump,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knight" => Ok(Self::Knight),
            "guardian" => Ok(Self::Guardian),
            "archer" => Ok(Self::Archer),
            "sorcerer" => Ok(Self::Sorcerer),
            other => Err(DomainError::parse(format!("Unknown role: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_offers_its_default_game() {
        for role in Role::ALL {
            let games = role.mini_games();
            assert_eq!(games[0], role.default_mini_game());
            assert!(games.iter().all(|g| g.role() == role));
        }
    }

    #[test]
    fn roles_have_distinct_descriptions() {
        let mut descriptions: Vec<_> = Role::ALL.iter().map(|r| r.description()).collect();
        assert!(descriptions.iter().all(|d| !d.is_empty()));
        descriptions.sort_unstable();
        descriptions.dedup();
        assert_eq!(descriptions.len(), Role::ALL.len());
    }

    #[test]
    fn parses_role_names() {
        assert_eq!("Knight".parse::<Role>().unwrap(), Role::Knight);
        assert_eq!(" sorcerer".parse::<Role>().unwrap(), Role::Sorcerer);
        assert!("bard".parse::<Role>().is_err());
    }
}
