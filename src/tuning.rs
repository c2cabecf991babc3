//! Data-driven game balance
//!
//! One table per entity kind, loaded from a JSON file next to the binary so
//! balance passes don't need a rebuild. Missing or malformed files fall back
//! to compiled defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player movement and firing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub speed: f32,
    pub radius: f32,
    pub fire_cooldown_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            fire_cooldown_ticks: PLAYER_FIRE_COOLDOWN_TICKS,
        }
    }
}

/// Zombie attraction and spawn parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieTuning {
    pub speed: f32,
    /// Distance beyond which the pull toward the player weakens
    pub attraction_range: f32,
    pub radius: f32,
    pub max_count: usize,
    pub min_spawn_distance: f32,
    pub max_spawn_distance: f32,
}

impl Default for ZombieTuning {
    fn default() -> Self {
        Self {
            speed: ZOMBIE_SPEED,
            attraction_range: ZOMBIE_ATTRACTION_RANGE,
            radius: ZOMBIE_RADIUS,
            max_count: MAX_ZOMBIES,
            min_spawn_distance: ZOMBIE_MIN_SPAWN_DISTANCE,
            max_spawn_distance: ZOMBIE_MAX_SPAWN_DISTANCE,
        }
    }
}

/// Ally guard, separation, firing, and bump parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllyTuning {
    pub speed: f32,
    pub follow_distance: f32,
    pub separation: f32,
    pub fire_range: f32,
    pub fire_cooldown_ticks: u32,
    pub radius: f32,
    pub max_count: usize,
    pub bump_impulse: f32,
}

impl Default for AllyTuning {
    fn default() -> Self {
        Self {
            speed: ALLY_SPEED,
            follow_distance: ALLY_FOLLOW_DISTANCE,
            separation: ALLY_SEPARATION,
            fire_range: ALLY_FIRE_RANGE,
            fire_cooldown_ticks: ALLY_FIRE_COOLDOWN_TICKS,
            radius: ALLY_RADIUS,
            max_count: MAX_ALLIES,
            bump_impulse: ALLY_BUMP_IMPULSE,
        }
    }
}

/// Bolt speed, decay range, and pool size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoltTuning {
    pub speed: f32,
    /// Distance traveled at which power reaches zero
    pub max_range: f32,
    pub radius: f32,
    pub max_count: usize,
}

impl Default for BoltTuning {
    fn default() -> Self {
        Self {
            speed: BOLT_SPEED,
            max_range: BOLT_MAX_RANGE,
            radius: BOLT_RADIUS,
            max_count: MAX_BOLTS,
        }
    }
}

/// Kind-indexed parameter table for the whole simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub zombie: ZombieTuning,
    pub ally: AllyTuning,
    pub bolt: BoltTuning,
}

impl Tuning {
    /// Load a tuning table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&text)?;
        Ok(tuning)
    }

    /// Load from file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
