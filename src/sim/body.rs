//! Base simulation body shared by every entity kind
//!
//! A body owns position, velocity, heading, world-bounds policy, the
//! liveness/solid/visible flags that gate collision and rendering, and an
//! embedded animation state machine. Entity kinds supply their frame table
//! and named sequences through [`SpriteSource`] and compose a `Body` rather
//! than inheriting from it.

use std::collections::HashMap;

use glam::Vec2;

use super::animation::{Animation, SequenceMode};
use crate::error::{GameError, Result};
use crate::normalize_heading;

/// Unrotated pixel dimensions of one sprite frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Named frame-index sequences for an entity kind
pub type SequenceTable = HashMap<String, Vec<usize>>;

/// Default sequences every kind gets: all frames forward and reversed.
pub fn default_sequences(frame_count: usize) -> SequenceTable {
    let all: Vec<usize> = (0..frame_count).collect();
    let mut table = SequenceTable::new();
    table.insert("reversed".into(), all.iter().rev().copied().collect());
    table.insert("all".into(), all);
    table
}

/// Per-kind sprite construction, composed into a generic [`Body`].
pub trait SpriteSource {
    /// Frame dimensions, in display order.
    fn create_frames() -> Vec<FrameSize>;

    /// Named animation sequences over those frames.
    fn create_sequences(frames: &[FrameSize]) -> SequenceTable {
        default_sequences(frames.len())
    }
}

/// Boundary handling when a body crosses a world edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Reflect: negate the axis velocity and clamp to the edge
    Bounce,
    /// Reappear exactly at the opposite edge
    Teleport,
}

/// Axis-aligned world bounds for a body
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub policy: BoundsPolicy,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 10_000.0,
            top: 0.0,
            bottom: 10_000.0,
            policy: BoundsPolicy::Teleport,
        }
    }
}

/// Target of a distance query
#[derive(Debug, Clone, Copy)]
pub enum DistanceTarget<'a> {
    Body(&'a Body),
    Point(f32, f32),
}

/// Render handle for the external drawing collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    /// Index into the entity kind's frame table
    pub frame: usize,
    /// Heading in degrees; rotation is a rendering concern only
    pub heading: f32,
    pub size: FrameSize,
    /// Radius of the deathblossom disc to composite under the ship, if active
    pub blossom_radius: Option<f32>,
}

/// Base simulation unit
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    heading: f32,
    pub bounds: Bounds,
    pub alive: bool,
    pub solid: bool,
    pub visible: bool,
    /// Pixels subtracted from each frame dimension before halving,
    /// tightening the hitbox relative to the sprite rectangle
    pub hitbox_shrink: u32,
    frames: Vec<FrameSize>,
    sequences: SequenceTable,
    frame_index: usize,
    pub anim: Animation,
}

impl Body {
    pub fn new<S: SpriteSource>(pos: Vec2, vel: Vec2, heading: f32) -> Self {
        let frames = S::create_frames();
        let sequences = S::create_sequences(&frames);
        debug_assert!(!frames.is_empty());
        Self {
            pos,
            vel,
            heading: normalize_heading(heading),
            bounds: Bounds::default(),
            alive: true,
            solid: true,
            visible: true,
            hitbox_shrink: 0,
            frames,
            sequences,
            frame_index: 0,
            anim: Animation::default(),
        }
    }

    /// Set world boundaries as an origin plus extent.
    pub fn set_move_bounds(
        &mut self,
        width: f32,
        height: f32,
        left: f32,
        top: f32,
        policy: BoundsPolicy,
    ) {
        self.bounds = Bounds {
            left,
            right: left + width,
            top,
            bottom: top + height,
            policy,
        };
    }

    pub fn set_properties(&mut self, alive: bool, solid: bool, visible: bool) {
        self.alive = alive;
        self.solid = solid;
        self.visible = visible;
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Rotate by `degrees` (positive is counter-clockwise).
    pub fn rotate(&mut self, degrees: f32) {
        self.heading = normalize_heading(self.heading + degrees);
    }

    /// Advance position one tick and apply the bounds policy per axis.
    pub fn update(&mut self) {
        let mut cx = self.pos.x + self.vel.x;
        let mut cy = self.pos.y + self.vel.y;
        let b = self.bounds;

        if cx > b.right {
            match b.policy {
                BoundsPolicy::Bounce => {
                    self.vel.x = -self.vel.x;
                    cx = b.right;
                }
                BoundsPolicy::Teleport => cx = b.left,
            }
        } else if cx < b.left {
            match b.policy {
                BoundsPolicy::Bounce => {
                    self.vel.x = -self.vel.x;
                    cx = b.left;
                }
                BoundsPolicy::Teleport => cx = b.right,
            }
        }

        if cy > b.bottom {
            match b.policy {
                BoundsPolicy::Bounce => {
                    self.vel.y = -self.vel.y;
                    cy = b.bottom;
                }
                BoundsPolicy::Teleport => cy = b.top,
            }
        } else if cy < b.top {
            match b.policy {
                BoundsPolicy::Bounce => {
                    self.vel.y = -self.vel.y;
                    cy = b.top;
                }
                BoundsPolicy::Teleport => cy = b.bottom,
            }
        }

        self.pos = Vec2::new(cx, cy);
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Dimensions of the current frame.
    pub fn frame_size(&self) -> FrameSize {
        self.frames[self.frame_index]
    }

    /// Switch to another frame; out-of-range indices are ignored.
    pub fn switch_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.frame_index = index;
        }
    }

    /// Select a named sequence and cadence for playback.
    ///
    /// `None` selects all frames in order. Unknown names are an error the
    /// caller must handle; they are never recovered silently.
    pub fn configure_animation(
        &mut self,
        frame_secs: f64,
        sequence_name: Option<&str>,
        repeat: bool,
    ) -> Result<()> {
        let sequence = match sequence_name {
            Some(name) => self
                .sequences
                .get(name)
                .cloned()
                .ok_or_else(|| GameError::UnknownSequence(name.to_string()))?,
            None => (0..self.frames.len()).collect(),
        };
        let mode = if repeat {
            SequenceMode::Repeat
        } else {
            SequenceMode::Once
        };
        self.anim.configure(sequence, frame_secs, mode);
        Ok(())
    }

    /// Begin playback, applying the default configuration if none was set.
    pub fn start_animation(&mut self) {
        if !self.anim.is_configured() {
            let all: Vec<usize> = (0..self.frames.len()).collect();
            self.anim.configure(all, 0.1, SequenceMode::Repeat);
        }
        self.anim.start();
    }

    pub fn stop_animation(&mut self) {
        self.anim.stop();
    }

    /// Advance any running animation and hand out the current render handle.
    ///
    /// Returns `None` while invisible or dead.
    pub fn render(&mut self, now: f64) -> Option<Drawable> {
        if !self.visible || !self.alive {
            return None;
        }
        if self.anim.animating
            && let Some(index) = self.anim.poll(now)
        {
            self.switch_frame(index);
        }
        Some(self.drawable())
    }

    /// Render handle for the current frame, without advancing animation.
    pub fn drawable(&self) -> Drawable {
        Drawable {
            frame: self.frame_index,
            heading: self.heading,
            size: self.frame_size(),
            blossom_radius: None,
        }
    }

    /// Half extent of the hitbox along one dimension.
    fn half_extent(dim: f32, shrink: u32) -> f32 {
        (dim - shrink as f32) / 2.0
    }

    /// Axis-aligned overlap test between two bodies.
    ///
    /// Returns false whenever either participant is non-solid, invisible or
    /// dead. Each side shrinks its own hitbox; boxes are unrotated.
    pub fn is_collision(&self, other: &Body) -> bool {
        if !self.solid || !self.visible || !self.alive {
            return false;
        }
        if !other.solid || !other.visible || !other.alive {
            return false;
        }

        let my = self.frame_size();
        let their = other.frame_size();
        let my_half_x = Self::half_extent(my.width, self.hitbox_shrink);
        let my_half_y = Self::half_extent(my.height, self.hitbox_shrink);
        let their_half_x = Self::half_extent(their.width, other.hitbox_shrink);
        let their_half_y = Self::half_extent(their.height, other.hitbox_shrink);

        let overlap_x = !(self.pos.x + my_half_x < other.pos.x - their_half_x
            || self.pos.x - my_half_x > other.pos.x + their_half_x);
        let overlap_y = !(self.pos.y + my_half_y < other.pos.y - their_half_y
            || self.pos.y - my_half_y > other.pos.y + their_half_y);

        overlap_x && overlap_y
    }

    /// Euclidean distance to another body or an explicit point.
    pub fn distance_to(&self, target: DistanceTarget<'_>) -> f32 {
        let (x, y) = match target {
            DistanceTarget::Body(other) => (other.pos.x, other.pos.y),
            DistanceTarget::Point(x, y) => (x, y),
        };
        Vec2::new(x - self.pos.x, y - self.pos.y).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Square28;

    impl SpriteSource for Square28 {
        fn create_frames() -> Vec<FrameSize> {
            vec![FrameSize::new(28.0, 28.0)]
        }
    }

    fn body_at(x: f32, y: f32) -> Body {
        Body::new::<Square28>(Vec2::new(x, y), Vec2::ZERO, 0.0)
    }

    #[test]
    fn test_bounce_flips_velocity_and_clamps() {
        let mut b = body_at(95.0, 50.0);
        b.vel = Vec2::new(10.0, 0.0);
        b.set_move_bounds(100.0, 100.0, 0.0, 0.0, BoundsPolicy::Bounce);

        b.update();
        assert_eq!(b.pos.x, 100.0);
        assert_eq!(b.vel.x, -10.0);

        // Velocity flips exactly once per crossing; moving back inward now
        b.update();
        assert_eq!(b.pos.x, 90.0);
        assert_eq!(b.vel.x, -10.0);
    }

    #[test]
    fn test_teleport_relocates_to_opposite_edge() {
        let mut b = body_at(98.0, 50.0);
        b.vel = Vec2::new(7.0, 0.0);
        b.set_move_bounds(100.0, 100.0, 0.0, 0.0, BoundsPolicy::Teleport);

        b.update();
        // Exactly the opposite bound, not an overshoot-preserving wrap
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.vel.x, 7.0);

        let mut b = body_at(2.0, 50.0);
        b.vel = Vec2::new(-7.0, 0.0);
        b.set_move_bounds(100.0, 100.0, 0.0, 0.0, BoundsPolicy::Teleport);
        b.update();
        assert_eq!(b.pos.x, 100.0);
    }

    #[test]
    fn test_axes_handled_independently() {
        let mut b = body_at(95.0, 3.0);
        b.vel = Vec2::new(10.0, -6.0);
        b.set_move_bounds(100.0, 100.0, 0.0, 0.0, BoundsPolicy::Bounce);

        b.update();
        assert_eq!(b.pos, Vec2::new(100.0, 0.0));
        assert_eq!(b.vel, Vec2::new(-10.0, 6.0));
    }

    #[test]
    fn test_collision_overlap() {
        let a = body_at(100.0, 100.0);
        let b = body_at(120.0, 100.0);
        // 28px frames: half extents 14, centers 20 apart -> overlap
        assert!(a.is_collision(&b));

        let c = body_at(150.0, 100.0);
        assert!(!a.is_collision(&c));
    }

    #[test]
    fn test_collision_gated_on_flags() {
        let a = body_at(100.0, 100.0);
        let mut b = body_at(100.0, 100.0);

        b.set_properties(false, true, true);
        assert!(!a.is_collision(&b));
        assert!(!b.is_collision(&a));

        b.set_properties(true, false, true);
        assert!(!a.is_collision(&b));

        b.set_properties(true, true, false);
        assert!(!a.is_collision(&b));

        b.set_properties(true, true, true);
        assert!(a.is_collision(&b));
    }

    #[test]
    fn test_hitbox_shrink_tightens_box() {
        let mut a = body_at(100.0, 100.0);
        let b = body_at(127.0, 100.0);
        // Touching at full extents (14 + 14 >= 27)
        assert!(a.is_collision(&b));

        // Shrinking one side by 6px pulls its half extent to 11
        a.hitbox_shrink = 6;
        assert!(!a.is_collision(&b));
        assert!(!b.is_collision(&a));
    }

    #[test]
    fn test_distance_to() {
        let a = body_at(0.0, 0.0);
        let b = body_at(3.0, 4.0);
        assert!((a.distance_to(DistanceTarget::Body(&b)) - 5.0).abs() < 1e-6);
        assert!((a.distance_to(DistanceTarget::Point(-3.0, -4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_gates_on_flags() {
        let mut b = body_at(0.0, 0.0);
        assert!(b.render(0.0).is_some());
        b.alive = false;
        assert!(b.render(0.0).is_none());
        b.alive = true;
        b.visible = false;
        assert!(b.render(0.0).is_none());
    }

    #[test]
    fn test_configure_animation_unknown_sequence() {
        let mut b = body_at(0.0, 0.0);
        let err = b.configure_animation(0.1, Some("warp"), true).unwrap_err();
        assert!(matches!(err, GameError::UnknownSequence(name) if name == "warp"));
    }

    proptest! {
        /// Symmetric result for any unordered pair when shrinks are equal.
        #[test]
        fn prop_collision_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            shrink in 0u32..20,
        ) {
            let mut a = body_at(ax, ay);
            let mut b = body_at(bx, by);
            a.hitbox_shrink = shrink;
            b.hitbox_shrink = shrink;
            prop_assert_eq!(a.is_collision(&b), b.is_collision(&a));
        }

        /// Bounce keeps the position inside the bounds after any single step.
        #[test]
        fn prop_bounce_never_overshoots(
            x in 0.0f32..100.0, y in 0.0f32..100.0,
            vx in -50.0f32..50.0, vy in -50.0f32..50.0,
        ) {
            let mut b = body_at(x, y);
            b.vel = Vec2::new(vx, vy);
            b.set_move_bounds(100.0, 100.0, 0.0, 0.0, BoundsPolicy::Bounce);
            b.update();
            prop_assert!(b.pos.x >= 0.0 && b.pos.x <= 100.0);
            prop_assert!(b.pos.y >= 0.0 && b.pos.y <= 100.0);
        }
    }
}
