//! Asteroids: spinning bodies in three size tiers
//!
//! Size maps directly onto the frame table index, so selecting a tier also
//! selects the sprite. Size 0 rocks are terminal and fragment no further.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, DistanceTarget, FrameSize, SpriteSource};
use crate::error::{GameError, Result};

/// Largest size tier; tiers run 0 (smallest) through MAX_SIZE.
pub const MAX_SIZE: u8 = 2;

/// Spin magnitude cap in degrees per tick
pub const MAX_SPIN: f32 = 1.5;

struct AsteroidSprites;

impl SpriteSource for AsteroidSprites {
    fn create_frames() -> Vec<FrameSize> {
        // One frame per size tier, smallest first
        vec![
            FrameSize::new(28.0, 28.0),
            FrameSize::new(56.0, 56.0),
            FrameSize::new(112.0, 112.0),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    size: u8,
    spin: f32,
}

impl Asteroid {
    /// Spawn at the largest tier with a random constant spin.
    pub fn new<R: Rng>(pos: Vec2, vel: Vec2, rng: &mut R) -> Self {
        let magnitude = MAX_SPIN * rng.random::<f32>();
        let spin = if rng.random_bool(0.5) {
            magnitude
        } else {
            -magnitude
        };

        let mut body = Body::new::<AsteroidSprites>(pos, vel, 0.0);
        body.switch_frame(MAX_SIZE as usize);
        Self {
            body,
            size: MAX_SIZE,
            spin,
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Select a size tier, switching to the matching sprite frame.
    pub fn set_size(&mut self, size: u8) -> Result<()> {
        if size > MAX_SIZE || size as usize >= self.body.frame_count() {
            return Err(GameError::InvalidSize {
                size,
                max: MAX_SIZE,
            });
        }
        self.size = size;
        self.body.switch_frame(size as usize);
        Ok(())
    }

    /// Number of children a fatal hit produces.
    pub fn fragment_count(&self) -> u32 {
        Self::fragments_for(self.size)
    }

    /// Fragmentation contract: smaller parents shatter into more pieces,
    /// tier 0 yields nothing.
    pub fn fragments_for(size: u8) -> u32 {
        if size == 0 {
            0
        } else {
            (MAX_SIZE - size) as u32 + 2
        }
    }

    /// Half of the smaller sprite dimension, used by area-damage range tests.
    pub fn half_min_extent(&self) -> f32 {
        let size = self.body.frame_size();
        size.width.min(size.height) / 2.0
    }

    pub fn update(&mut self) {
        self.body.update();
        if self.spin != 0.0 {
            self.body.rotate(self.spin);
        }
    }

    pub fn distance_to(&self, target: DistanceTarget<'_>) -> f32 {
        self.body.distance_to(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock() -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(7);
        Asteroid::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), &mut rng)
    }

    #[test]
    fn test_new_asteroid_is_largest_tier() {
        let a = rock();
        assert_eq!(a.size(), MAX_SIZE);
        assert_eq!(a.body.frame_index(), MAX_SIZE as usize);
        assert!(a.spin().abs() <= MAX_SPIN);
    }

    #[test]
    fn test_set_size_switches_frame() {
        let mut a = rock();
        a.set_size(0).unwrap();
        assert_eq!(a.size(), 0);
        assert_eq!(a.body.frame_size(), FrameSize::new(28.0, 28.0));
    }

    #[test]
    fn test_set_size_rejects_out_of_range() {
        let mut a = rock();
        let err = a.set_size(MAX_SIZE + 1).unwrap_err();
        assert!(matches!(err, GameError::InvalidSize { size, .. } if size == MAX_SIZE + 1));
        // Failed selection leaves the tier unchanged
        assert_eq!(a.size(), MAX_SIZE);
    }

    #[test]
    fn test_fragment_counts_per_tier() {
        let mut a = rock();
        assert_eq!(a.fragment_count(), 2); // size 2
        a.set_size(1).unwrap();
        assert_eq!(a.fragment_count(), 3);
        a.set_size(0).unwrap();
        assert_eq!(a.fragment_count(), 0);
    }

    #[test]
    fn test_update_applies_spin() {
        let mut a = rock();
        let before = a.body.heading();
        a.update();
        assert!((a.body.heading() - before - a.spin()).abs() < 1e-5);
    }
}
