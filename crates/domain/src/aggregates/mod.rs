//! Aggregates - consistency boundaries with private state and explicit transitions.

pub mod boss_encounter;

pub use boss_encounter::{BossEncounter, DamageOutcome, EncounterPhase};
