//! Rock Drift - an asteroids arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `viewport`: Camera tracking and world-to-screen projection
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error types
//!
//! Rendering, windowing and input hardware are collaborator concerns: the
//! core hands out [`sim::body::Drawable`] descriptors and projected screen
//! coordinates, nothing else.

pub mod error;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use error::GameError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE_HZ: f64 = 30.0;

    /// Viewport dimensions (screen pixels)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// World dimensions (4x3 screens)
    pub const WORLD_WIDTH: f32 = 4.0 * VIEW_WIDTH;
    pub const WORLD_HEIGHT: f32 = 3.0 * VIEW_HEIGHT;

    /// Camera deceleration distances (per axis, pixels)
    pub const CAMERA_X_DECEL_DIST: f32 = VIEW_WIDTH / 4.0;
    pub const CAMERA_Y_DECEL_DIST: f32 = VIEW_HEIGHT / 4.0;

    /// Asteroid population
    pub const ASTEROID_START_COUNT: u32 = 10;
    pub const ASTEROIDS_PER_LEVEL: u32 = 5;

    /// Session rules
    pub const SCORE_ASTEROID_HIT: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const RESPAWN_DELAY_SECS: f64 = 4.0;
    pub const LEVELUP_DELAY_SECS: f64 = 4.0;

    /// Ship handling
    pub const SHIP_TURN_RATE_DEG: f32 = 6.0;
    pub const SHIP_THRUST_DELTA: f32 = 0.5;
    /// Per-axis speed cap (pixels/tick)
    pub const SHIP_MAX_SPEED: f32 = 10.0;

    /// Plasma weapon
    pub const PLASMA_MUZZLE_SPEED: f32 = 8.0;
    pub const PLASMA_MAX_LIVE: usize = 5;
    pub const PLASMA_TTL_SECS: f64 = 1.0;
    pub const PLASMA_FRAME_SECS: f64 = 0.05;

    /// Deathblossom area weapon
    pub const BLOSSOM_MAX_RADIUS: f32 = 125.0;
    pub const BLOSSOM_RADIUS_STEP: f32 = 10.0;
    pub const BLOSSOM_FRAME_SECS: f64 = 0.03;
    pub const BLOSSOM_CHARGES: u32 = 10;

    /// Ship explosion animation
    pub const BOOM_FRAME_SECS: f64 = 0.05;
}

/// Normalize a heading in degrees to (-360, 360].
///
/// Applies a single wrap correction, enough for the small per-tick rotation
/// deltas the simulation produces.
#[inline]
pub fn normalize_heading(mut heading: f32) -> f32 {
    if heading > 360.0 {
        heading -= 360.0;
    } else if heading < -360.0 {
        heading += 360.0;
    }
    heading
}

/// Unit vector for a heading in degrees, in screen space (y grows downward).
#[inline]
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let rad = heading_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_heading_wraps_once() {
        assert_eq!(normalize_heading(365.0), 5.0);
        assert_eq!(normalize_heading(-365.0), -5.0);
        assert_eq!(normalize_heading(360.0), 360.0);
        assert_eq!(normalize_heading(-359.0), -359.0);
    }

    #[test]
    fn test_heading_vector_screen_space() {
        // Heading 0: straight right
        let v = heading_vector(0.0);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);

        // Heading 90: up on screen (negative y)
        let v = heading_vector(90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - (-1.0)).abs() < 1e-6);
    }
}
