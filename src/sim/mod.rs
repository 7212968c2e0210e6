//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only; the driver supplies the current time
//! - Stable iteration order (roster insertion order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod asteroid;
pub mod body;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;

pub use animation::{Animation, SequenceMode};
pub use asteroid::{Asteroid, MAX_SIZE, MAX_SPIN};
pub use body::{
    Body, Bounds, BoundsPolicy, DistanceTarget, Drawable, FrameSize, SpriteSource,
};
pub use projectile::Projectile;
pub use ship::{Deathblossom, Ship, WeaponKind};
pub use state::{GameSession, GameState};
pub use tick::{RenderItem, TickInput, render_frame, tick};
