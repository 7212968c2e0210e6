//! The player ship: thrust physics, two weapon systems, death animation
//!
//! Frame table layout: 0 = idle hull, 1 = hull with engine flame, 2..=6 =
//! explosion frames small to large. The "boom" sequence runs the explosion
//! out and back; "deathblossom" repeats the hull frame while the area-damage
//! disc grows underneath it.

use std::str::FromStr;

use glam::Vec2;

use super::body::{Body, Drawable, FrameSize, SpriteSource, default_sequences};
use super::projectile::Projectile;
use crate::consts::{
    BLOSSOM_CHARGES, BLOSSOM_FRAME_SECS, BLOSSOM_MAX_RADIUS, BLOSSOM_RADIUS_STEP, BOOM_FRAME_SECS,
    PLASMA_MAX_LIVE, PLASMA_MUZZLE_SPEED, PLASMA_TTL_SECS, SHIP_MAX_SPEED,
};
use crate::error::{GameError, Result};
use crate::heading_vector;

/// Hitbox tightening for the hull sprite, in pixels
const SHIP_HITBOX_SHRINK: u32 = 6;

struct ShipSprites;

impl SpriteSource for ShipSprites {
    fn create_frames() -> Vec<FrameSize> {
        vec![
            FrameSize::new(33.0, 20.0), // idle hull
            FrameSize::new(33.0, 20.0), // hull + engine flame
            FrameSize::new(24.0, 24.0), // explosion, smallest
            FrameSize::new(48.0, 48.0),
            FrameSize::new(72.0, 72.0),
            FrameSize::new(96.0, 96.0),
            FrameSize::new(120.0, 120.0), // explosion, largest
        ]
    }

    fn create_sequences(frames: &[FrameSize]) -> super::body::SequenceTable {
        let mut table = default_sequences(frames.len());
        table.insert("boom".into(), vec![2, 3, 4, 5, 6, 5, 4, 3, 2]);
        table.insert("deathblossom".into(), vec![0]);
        table
    }
}

/// Weapon identifiers accepted by the fire operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Plasma,
    Deathblossom,
}

impl FromStr for WeaponKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plasma" => Ok(WeaponKind::Plasma),
            "deathblossom" => Ok(WeaponKind::Deathblossom),
            other => Err(GameError::UnsupportedWeapon(other.to_string())),
        }
    }
}

/// Growing-radius area weapon state
#[derive(Debug, Clone)]
pub struct Deathblossom {
    pub active: bool,
    pub radius: f32,
    pub charges: u32,
}

impl Default for Deathblossom {
    fn default() -> Self {
        Self {
            active: false,
            radius: 0.0,
            charges: BLOSSOM_CHARGES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub blossom: Deathblossom,
    thrusting: bool,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new::<ShipSprites>(pos, Vec2::ZERO, 0.0);
        body.hitbox_shrink = SHIP_HITBOX_SHRINK;
        Self {
            body,
            blossom: Deathblossom::default(),
            thrusting: false,
        }
    }

    pub fn update(&mut self) {
        self.body.update();
    }

    /// Accelerate along the current heading.
    ///
    /// Refused while dead or while the deathblossom runs; each velocity axis
    /// is capped independently.
    pub fn thrust(&mut self, delta: f32) {
        if !self.body.alive || self.blossom.active {
            return;
        }
        self.thrusting = true;

        let change = heading_vector(self.body.heading()) * delta;
        let sx = self.body.vel.x + change.x;
        let sy = self.body.vel.y + change.y;

        if sx.abs() < SHIP_MAX_SPEED {
            self.body.vel.x = sx;
        }
        if sy.abs() < SHIP_MAX_SPEED {
            self.body.vel.y = sy;
        }
    }

    /// Fire a plasma bolt, if the live-bolt cap permits.
    ///
    /// `live_count` is the number of bolts currently alive in the owning
    /// roster; the returned bolt inherits the ship's velocity plus muzzle
    /// speed along the heading.
    pub fn fire_plasma(&self, live_count: usize, now: f64) -> Option<Projectile> {
        if !self.body.alive || live_count >= PLASMA_MAX_LIVE {
            return None;
        }

        let vel = self.body.vel + heading_vector(self.body.heading()) * PLASMA_MUZZLE_SPEED;
        Some(Projectile::new(
            self.body.pos,
            vel,
            self.body.heading(),
            now + PLASMA_TTL_SECS,
        ))
    }

    /// Trigger the deathblossom, consuming one charge.
    ///
    /// Returns whether it activated. Refused while dead, already active, or
    /// out of charges.
    pub fn fire_deathblossom(&mut self) -> Result<bool> {
        if !self.body.alive || self.blossom.active || self.blossom.charges == 0 {
            return Ok(false);
        }

        self.blossom.charges -= 1;
        self.blossom.active = true;
        self.blossom.radius = self.body.frame_size().width / 2.0;

        self.body
            .configure_animation(BLOSSOM_FRAME_SECS, Some("deathblossom"), true)?;
        self.body.start_animation();
        Ok(true)
    }

    /// Begin the explosion: one-shot boom sequence, immediately non-alive.
    pub fn explode(&mut self) -> Result<()> {
        self.body
            .configure_animation(BOOM_FRAME_SECS, Some("boom"), false)?;
        self.body.start_animation();
        self.body.alive = false;
        self.blossom.active = false;
        Ok(())
    }

    /// Render handle for the current tick.
    ///
    /// While animating, the animation drives the frame (and blossom radius
    /// growth); after a finished death animation there is nothing to draw.
    /// Otherwise the hull frame tracks the thrust state, which is consumed
    /// here and must be reasserted every tick.
    pub fn render(&mut self, now: f64) -> Option<Drawable> {
        if self.body.anim.animating {
            return Some(self.animate(now));
        }
        if self.body.anim.complete && !self.body.alive {
            return None;
        }

        let frame = if self.thrusting { 1 } else { 0 };
        self.thrusting = false;
        self.body.switch_frame(frame);
        Some(self.body.drawable())
    }

    fn animate(&mut self, now: f64) -> Drawable {
        if let Some(index) = self.body.anim.poll(now) {
            self.body.switch_frame(index);

            // The blossom disc widens on every frame tick until its cap
            if self.blossom.active {
                self.blossom.radius += BLOSSOM_RADIUS_STEP;
                if self.blossom.radius >= BLOSSOM_MAX_RADIUS {
                    self.blossom.active = false;
                    self.body.anim.complete = true;
                    self.body.anim.stop();
                }
            }
        }

        let mut drawable = self.body.drawable();
        if self.blossom.active {
            drawable.blossom_radius = Some(self.blossom.radius);
        }
        drawable
    }
}
