//! Data-driven game balance
//!
//! Everything a designer might reasonably retune without touching code:
//! world geometry, population growth, session rules, camera feel. Loadable
//! from JSON; missing fields fall back to the built-in balance.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Viewport dimensions (screen pixels)
    pub view_width: f32,
    pub view_height: f32,
    /// World dimensions
    pub world_width: f32,
    pub world_height: f32,

    /// Camera
    pub camera_policy: String,
    pub camera_x_decel_dist: f32,
    pub camera_y_decel_dist: f32,

    /// Asteroid population: `start_count + (level - 1) * per_level`
    pub asteroid_start_count: u32,
    pub asteroids_per_level: u32,

    /// Session rules
    pub starting_lives: u8,
    pub max_lives: u8,
    pub respawn_delay_secs: f64,
    pub levelup_delay_secs: f64,
    pub score_per_asteroid: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            camera_policy: "smooth_exp".to_string(),
            camera_x_decel_dist: CAMERA_X_DECEL_DIST,
            camera_y_decel_dist: CAMERA_Y_DECEL_DIST,
            asteroid_start_count: ASTEROID_START_COUNT,
            asteroids_per_level: ASTEROIDS_PER_LEVEL,
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            respawn_delay_secs: RESPAWN_DELAY_SECS,
            levelup_delay_secs: LEVELUP_DELAY_SECS,
            score_per_asteroid: SCORE_ASTEROID_HIT,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }

    /// Ship spawn point: the world center.
    pub fn ship_start(&self) -> (f32, f32) {
        (self.world_width / 2.0, self.world_height / 2.0)
    }

    /// Asteroid count for a given level.
    pub fn asteroid_count_for_level(&self, level: u32) -> u32 {
        self.asteroid_start_count + level.saturating_sub(1) * self.asteroids_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_balance() {
        let t = Tuning::default();
        assert_eq!(t.asteroid_count_for_level(1), 10);
        assert_eq!(t.asteroid_count_for_level(3), 20);
        assert_eq!(t.ship_start(), (1600.0, 900.0));
    }

    #[test]
    fn test_partial_json_overrides() {
        let t = Tuning::from_json(r#"{"asteroid_start_count": 4, "max_lives": 9}"#).unwrap();
        assert_eq!(t.asteroid_start_count, 4);
        assert_eq!(t.max_lives, 9);
        // Untouched fields keep the built-in balance
        assert_eq!(t.world_width, WORLD_WIDTH);
        assert_eq!(t.camera_policy, "smooth_exp");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{not json").is_err());
    }
}
