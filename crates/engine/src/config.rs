//! Engine configuration from environment variables.

use std::str::FromStr;
use std::time::Duration;

use stressdungeon_domain::MiniGameRules;

use crate::use_cases::SimulationSettings;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
const DEFAULT_MAX_SIMULATION_FRAMES: u32 = 10_000;
const DEFAULT_DEMO_EMAIL: &str = "hero@stressdungeon.local";
const DEFAULT_DEMO_PASSWORD: &str = "dungeon-pass";
const DEFAULT_DEMO_MAX_ROUNDS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub frame_interval: Duration,
    pub max_simulation_frames: u32,
    pub archer_track_length: f64,
    pub demo_email: String,
    pub demo_password: String,
    pub demo_max_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            max_simulation_frames: DEFAULT_MAX_SIMULATION_FRAMES,
            archer_track_length: MiniGameRules::default().archer_track_length,
            demo_email: DEFAULT_DEMO_EMAIL.to_string(),
            demo_password: DEFAULT_DEMO_PASSWORD.to_string(),
            demo_max_rounds: DEFAULT_DEMO_MAX_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let archer_track_length = parse_or(&lookup, "ARCHER_TRACK_LENGTH", defaults.archer_track_length);
        Self {
            frame_interval: Duration::from_millis(parse_or(
                &lookup,
                "FRAME_INTERVAL_MS",
                DEFAULT_FRAME_INTERVAL_MS,
            )),
            max_simulation_frames: parse_or(
                &lookup,
                "MAX_SIMULATION_FRAMES",
                defaults.max_simulation_frames,
            )
            .max(1),
            archer_track_length: if archer_track_length.is_finite() && archer_track_length > 0.0 {
                archer_track_length
            } else {
                tracing::warn!(
                    value = archer_track_length,
                    "ARCHER_TRACK_LENGTH must be positive, using default"
                );
                defaults.archer_track_length
            },
            demo_email: lookup("DEMO_EMAIL").unwrap_or(defaults.demo_email),
            demo_password: lookup("DEMO_PASSWORD").unwrap_or(defaults.demo_password),
            demo_max_rounds: parse_or(&lookup, "DEMO_MAX_ROUNDS", defaults.demo_max_rounds),
        }
    }

    pub fn rules(&self) -> MiniGameRules {
        MiniGameRules {
            archer_track_length: self.archer_track_length,
            ..MiniGameRules::default()
        }
    }

    pub fn simulation(&self) -> SimulationSettings {
        SimulationSettings {
            frame_interval: self.frame_interval,
            max_frames: self.max_simulation_frames,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = ?default, "Invalid config value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.rules(), MiniGameRules::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("FRAME_INTERVAL_MS", "0"),
            ("MAX_SIMULATION_FRAMES", "500"),
            ("ARCHER_TRACK_LENGTH", "120.5"),
            ("DEMO_EMAIL", "sorcerer@example.com"),
            ("DEMO_MAX_ROUNDS", "3"),
        ]);
        assert!(config.simulation().frame_interval.is_zero());
        assert_eq!(config.simulation().max_frames, 500);
        assert_eq!(config.rules().archer_track_length, 120.5);
        assert_eq!(config.demo_email, "sorcerer@example.com");
        assert_eq!(config.demo_max_rounds, 3);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[
            ("FRAME_INTERVAL_MS", "fast"),
            ("MAX_SIMULATION_FRAMES", "0"),
            ("ARCHER_TRACK_LENGTH", "-3"),
        ]);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.max_simulation_frames, 1);
        assert_eq!(config.archer_track_length, 360.0);
    }
}
