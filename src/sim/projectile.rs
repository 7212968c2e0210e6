//! Plasma bolts: short-lived projectiles with an absolute expiry time

use glam::Vec2;

use super::body::{Body, FrameSize, SpriteSource};

struct PlasmaSprites;

impl SpriteSource for PlasmaSprites {
    fn create_frames() -> Vec<FrameSize> {
        vec![FrameSize::new(8.0, 8.0)]
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    expires_at: f64,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, heading: f32, expires_at: f64) -> Self {
        let mut body = Body::new::<PlasmaSprites>(pos, vel, heading);
        body.set_properties(true, true, true);
        Self { body, expires_at }
    }

    pub fn expires_at(&self) -> f64 {
        self.expires_at
    }

    /// Advance position; the bolt dies when its TTL lapses, regardless of
    /// what it did or did not hit.
    pub fn update(&mut self, now: f64) {
        self.body.update();
        if now >= self.expires_at {
            self.body.alive = false;
        }
    }
}
