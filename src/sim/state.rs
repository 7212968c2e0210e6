//! Game state and session bookkeeping
//!
//! Owns every entity collection, the session counters and the seeded RNG.
//! All mutation happens through the tick driver; nothing here reads a clock
//! or touches the platform.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, MAX_SIZE};
use super::body::BoundsPolicy;
use super::projectile::Projectile;
use super::ship::{Ship, WeaponKind};
use crate::consts::PLASMA_FRAME_SECS;
use crate::error::Result;
use crate::tuning::Tuning;
use crate::viewport::{TrackingMode, Viewport};

/// Per-run session counters
///
/// The high score is in-memory application state: it survives `reset` and
/// dies with the process.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub game_over: bool,
    /// Deadline for the dead ship's replacement
    pub respawn_at: f64,
    /// Set while the cleared level's respawn delay runs
    pub level_clear_pending: bool,
    pub next_level_at: f64,
    pub high_score: u64,
}

impl GameSession {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            level: 1,
            lives,
            game_over: false,
            respawn_at: 0.0,
            level_clear_pending: false,
            next_level_at: 0.0,
            high_score: 0,
        }
    }

    /// Reset for a fresh run, preserving the high score.
    pub fn reset(&mut self, lives: u8) {
        let high_score = self.high_score;
        *self = Self::new(lives);
        self.high_score = high_score;
    }

    /// Fold the current score into the high score. Returns whether it
    /// improved.
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub session: GameSession,
    pub ship: Ship,
    /// Live asteroid field, insertion-ordered
    pub asteroids: Vec<Asteroid>,
    /// Live plasma bolts, insertion-ordered; the ship's fire cap counts
    /// these
    pub projectiles: Vec<Projectile>,
    pub viewport: Viewport,
    pub camera_mode: TrackingMode,
    rng: Pcg32,
}

impl GameState {
    /// Build a state with the default balance.
    pub fn new(seed: u64) -> Self {
        Self::with_mode(seed, Tuning::default(), TrackingMode::SmoothExp)
    }

    /// Build a state from tuning, validating the camera configuration.
    pub fn from_tuning(seed: u64, tuning: Tuning) -> Result<Self> {
        let mode = tuning.camera_policy.parse::<TrackingMode>()?;
        let decel = (tuning.camera_x_decel_dist, tuning.camera_y_decel_dist);
        let mut state = Self::with_mode(seed, tuning, mode);
        if let Some(cam) = state.viewport.camera.as_mut() {
            cam.set_decel_distances(decel.0, decel.1)?;
        }
        Ok(state)
    }

    fn with_mode(seed: u64, tuning: Tuning, camera_mode: TrackingMode) -> Self {
        let (start_x, start_y) = tuning.ship_start();
        let mut viewport = Viewport::new(
            tuning.view_width,
            tuning.view_height,
            tuning.world_width,
            tuning.world_height,
        );
        viewport.create_camera(start_x, start_y);

        let mut state = Self {
            seed,
            session: GameSession::new(tuning.starting_lives),
            ship: Self::new_ship(&tuning),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            viewport,
            camera_mode,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.populate_field();
        state
    }

    fn new_ship(tuning: &Tuning) -> Ship {
        let (x, y) = tuning.ship_start();
        let mut ship = Ship::new(Vec2::new(x, y));
        ship.body.set_move_bounds(
            tuning.world_width,
            tuning.world_height,
            0.0,
            0.0,
            BoundsPolicy::Bounce,
        );
        ship
    }

    /// Replace the dead ship with a fresh one at the start location.
    ///
    /// The old respawn deadline dies with the old ship.
    pub fn respawn_ship(&mut self) {
        self.ship = Self::new_ship(&self.tuning);
    }

    /// Spawn the starting asteroid field for the current level.
    fn populate_field(&mut self) {
        let count = self.tuning.asteroid_count_for_level(self.session.level);
        self.spawn_asteroids(count);
    }

    /// Scatter `count` asteroids across the world at random tiers.
    pub fn spawn_asteroids(&mut self, count: u32) {
        let (w, h) = (self.tuning.world_width, self.tuning.world_height);
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(0.0..=w),
                self.rng.random_range(0.0..=h),
            );
            let vel = Vec2::new(
                self.rng.random_range(-5.0..=5.0),
                self.rng.random_range(-5.0..=5.0),
            );
            let size = self.rng.random_range(0..=MAX_SIZE);
            self.spawn_asteroid_at(pos, vel, size);
        }
    }

    /// Spawn the children of a fragmented asteroid.
    ///
    /// Placement follows the fixed linear offset pattern; count and size
    /// decrement are the fragmentation contract.
    pub fn spawn_fragments(&mut self, origin: Vec2, parent_size: u8) {
        let count = Asteroid::fragments_for(parent_size);
        for i in 0..count {
            let offset = -20.0 + 10.0 * i as f32;
            let pos = origin + Vec2::splat(offset);
            let vel = Vec2::new(
                self.rng.random_range(-5.0..=5.0),
                self.rng.random_range(-5.0..=5.0),
            );
            self.spawn_asteroid_at(pos, vel, parent_size - 1);
        }
    }

    fn spawn_asteroid_at(&mut self, pos: Vec2, vel: Vec2, size: u8) {
        let mut rock = Asteroid::new(pos, vel, &mut self.rng);
        rock.body.set_move_bounds(
            self.tuning.world_width,
            self.tuning.world_height,
            0.0,
            0.0,
            BoundsPolicy::Teleport,
        );
        rock.body.rotate(self.rng.random_range(0.0..=360.0));
        // Tier comes from the spawner and is always within range
        if let Err(err) = rock.set_size(size) {
            log::error!("asteroid spawn skipped: {err}");
            return;
        }
        self.asteroids.push(rock);
    }

    pub fn live_projectile_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.body.alive).count()
    }

    /// Fire a weapon by kind, appending any new bolt to the roster.
    pub fn fire_weapon(&mut self, kind: WeaponKind, now: f64) -> Result<()> {
        match kind {
            WeaponKind::Plasma => {
                let live = self.live_projectile_count();
                if let Some(mut bolt) = self.ship.fire_plasma(live, now) {
                    bolt.body.set_move_bounds(
                        self.tuning.world_width,
                        self.tuning.world_height,
                        0.0,
                        0.0,
                        BoundsPolicy::Teleport,
                    );
                    bolt.body.configure_animation(PLASMA_FRAME_SECS, None, true)?;
                    bolt.body.start_animation();
                    self.projectiles.push(bolt);
                }
            }
            WeaponKind::Deathblossom => {
                if self.ship.fire_deathblossom()? {
                    log::debug!(
                        "deathblossom fired, {} charges remaining",
                        self.ship.blossom.charges
                    );
                }
            }
        }
        Ok(())
    }

    /// Restart after game over: fold in the high score, reset the session,
    /// rebuild the world.
    pub fn restart(&mut self) {
        self.session.record_high_score();
        self.session.reset(self.tuning.starting_lives);
        self.projectiles.clear();
        self.asteroids.clear();
        self.respawn_ship();
        self.populate_field();
        log::info!("session restarted, high score {}", self.session.high_score);
    }
}
