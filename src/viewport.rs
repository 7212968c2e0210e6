//! Viewport and camera: world-to-screen translation with tracked-target
//! following
//!
//! The camera center lives in world coordinates and may never leave the
//! hard-limit rectangle `[w/2, W-w/2] x [h/2, H-h/2]`. Two update policies:
//! a direct clamp, and a smoothed variant that brakes exponentially inside a
//! per-axis deceleration band near each world edge instead of stopping dead.

use std::str::FromStr;

use glam::Vec2;

use crate::error::{GameError, Result};

/// Camera update policy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Clamp straight to the hard limits
    Simple,
    /// Exponential-decay braking inside the decel band
    SmoothExp,
}

impl FromStr for TrackingMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(TrackingMode::Simple),
            "smooth_exp" => Ok(TrackingMode::SmoothExp),
            other => Err(GameError::UnsupportedPolicy(other.to_string())),
        }
    }
}

/// Hard-limit rectangle for the camera center
#[derive(Debug, Clone, Copy)]
struct CamLimits {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    view_width: f32,
    view_height: f32,
    limits: CamLimits,
    decel: Vec2,
}

impl Camera {
    pub fn new(
        view_width: f32,
        view_height: f32,
        world_width: f32,
        world_height: f32,
        x: f32,
        y: f32,
    ) -> Self {
        Self {
            x,
            y,
            view_width,
            view_height,
            limits: CamLimits {
                left: view_width / 2.0,
                right: world_width - view_width / 2.0,
                top: view_height / 2.0,
                bottom: world_height - view_height / 2.0,
            },
            decel: Vec2::new(view_width / 4.0, view_height / 4.0),
        }
    }

    /// Configure the per-axis deceleration distances.
    ///
    /// Distances must be positive: the smoothing time constant is derived
    /// from them.
    pub fn set_decel_distances(&mut self, x_dist: f32, y_dist: f32) -> Result<()> {
        if x_dist <= 0.0 {
            return Err(GameError::InvalidDecelDistance(x_dist));
        }
        if y_dist <= 0.0 {
            return Err(GameError::InvalidDecelDistance(y_dist));
        }
        self.decel = Vec2::new(x_dist, y_dist);
        Ok(())
    }

    /// Translate a world coordinate into screen space.
    ///
    /// Pure affine translation by the camera's top-left corner; no scaling,
    /// no rotation.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let cam_left = self.x - self.view_width / 2.0;
        let cam_top = self.y - self.view_height / 2.0;
        (x - cam_left, y - cam_top)
    }

    /// Re-center on a target under the given policy.
    pub fn update(&mut self, mode: TrackingMode, target_x: f32, target_y: f32) {
        match mode {
            TrackingMode::Simple => self.clamp_update(target_x, target_y),
            TrackingMode::SmoothExp => self.smooth_update(target_x, target_y),
        }
    }

    /// Track the target with an abrupt stop at the hard limits.
    fn clamp_update(&mut self, target_x: f32, target_y: f32) {
        self.x = target_x.max(self.limits.left).min(self.limits.right);
        self.y = target_y.max(self.limits.top).min(self.limits.bottom);
    }

    /// Track the target, braking exponentially near the hard limits.
    fn smooth_update(&mut self, target_x: f32, target_y: f32) {
        self.x = Self::smooth_axis(target_x, self.limits.left, self.limits.right, self.decel.x);
        self.y = Self::smooth_axis(target_y, self.limits.top, self.limits.bottom, self.decel.y);
    }

    /// One axis of the smoothed update; both edges handled symmetrically.
    fn smooth_axis(target: f32, limit_lo: f32, limit_hi: f32, decel_dist: f32) -> f32 {
        // Inside the free-tracking zone the camera is locked 1:1 to the
        // target
        let locked = target.max(limit_lo + decel_dist).min(limit_hi - decel_dist);
        if locked == target {
            return target;
        }

        if target < limit_lo + decel_dist {
            let begin = limit_lo + decel_dist;
            let scaled = limit_lo + Self::decel_offset(begin, target, decel_dist);
            // Never overshoot past the target, never pass the hard limit
            return target.max(scaled);
        }

        let begin = limit_hi - decel_dist;
        let scaled = limit_hi - Self::decel_offset(begin, target, decel_dist);
        target.min(scaled)
    }

    /// Offset of the camera from the hard limit as the target penetrates the
    /// decel zone: exponential decay with time constant = half the zone
    /// width.
    fn decel_offset(begin: f32, target: f32, decel_dist: f32) -> f32 {
        let tau = decel_dist / 2.0;
        let depth = (target - begin).abs();
        (-depth / tau).exp() * decel_dist
    }
}

/// Display window onto the world; owns the camera and the projection the
/// render collaborator must use before any draw call.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub camera: Option<Camera>,
}

impl Viewport {
    pub fn new(width: f32, height: f32, world_width: f32, world_height: f32) -> Self {
        Self {
            width,
            height,
            world_width,
            world_height,
            camera: None,
        }
    }

    pub fn create_camera(&mut self, x: f32, y: f32) {
        self.camera = Some(Camera::new(
            self.width,
            self.height,
            self.world_width,
            self.world_height,
            x,
            y,
        ));
    }

    /// Project a world coordinate to screen space. Identity before a camera
    /// exists.
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        match &self.camera {
            Some(cam) => cam.apply(x, y),
            None => (x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW_W: f32 = 800.0;
    const VIEW_H: f32 = 600.0;
    const WORLD_W: f32 = 3200.0;
    const WORLD_H: f32 = 1800.0;

    fn camera() -> Camera {
        Camera::new(VIEW_W, VIEW_H, WORLD_W, WORLD_H, WORLD_W / 2.0, WORLD_H / 2.0)
    }

    #[test]
    fn test_tracking_mode_parse() {
        assert_eq!("simple".parse::<TrackingMode>().unwrap(), TrackingMode::Simple);
        assert_eq!(
            "smooth_exp".parse::<TrackingMode>().unwrap(),
            TrackingMode::SmoothExp
        );
        let err = "spline".parse::<TrackingMode>().unwrap_err();
        assert!(matches!(err, GameError::UnsupportedPolicy(name) if name == "spline"));
    }

    #[test]
    fn test_apply_is_pure_translation() {
        let cam = camera();
        // Camera centered at world center: its top-left corner is at
        // (1200, 600)
        let (sx, sy) = cam.apply(1200.0, 600.0);
        assert_eq!((sx, sy), (0.0, 0.0));
        let (sx, sy) = cam.apply(1600.0, 900.0);
        assert_eq!((sx, sy), (400.0, 300.0));
    }

    #[test]
    fn test_clamp_update_hits_limits_abruptly() {
        let mut cam = camera();
        cam.update(TrackingMode::Simple, 0.0, 0.0);
        assert_eq!((cam.x, cam.y), (VIEW_W / 2.0, VIEW_H / 2.0));

        cam.update(TrackingMode::Simple, WORLD_W + 500.0, WORLD_H + 500.0);
        assert_eq!((cam.x, cam.y), (WORLD_W - VIEW_W / 2.0, WORLD_H - VIEW_H / 2.0));
    }

    #[test]
    fn test_smooth_identity_inside_free_zone() {
        let mut cam = camera();
        // Free zone: [400+200, 2800-200] x [300+150, 1500-150]
        cam.update(TrackingMode::SmoothExp, 1000.0, 800.0);
        assert_eq!((cam.x, cam.y), (1000.0, 800.0));
    }

    #[test]
    fn test_smooth_brakes_deep_in_decel_zone() {
        let mut cam = camera();
        // Deep in the left decel zone the camera falls behind the target,
        // held off the hard limit by the decay curve
        cam.update(TrackingMode::SmoothExp, 420.0, WORLD_H / 2.0);
        assert!(cam.x > 420.0);
        assert!(cam.x < 600.0);

        // Target far past the world edge: camera eases toward, but never
        // reaches past, the hard limit
        cam.update(TrackingMode::SmoothExp, 300.0, WORLD_H / 2.0);
        assert!(cam.x > 400.0);
        assert!(cam.x < 420.0);
    }

    #[test]
    fn test_smooth_never_exits_limits_for_far_targets() {
        let mut cam = camera();
        cam.update(TrackingMode::SmoothExp, -10_000.0, -10_000.0);
        assert!(cam.x >= VIEW_W / 2.0);
        assert!(cam.y >= VIEW_H / 2.0);

        cam.update(TrackingMode::SmoothExp, 10_000.0, 10_000.0);
        assert!(cam.x <= WORLD_W - VIEW_W / 2.0);
        assert!(cam.y <= WORLD_H - VIEW_H / 2.0);
    }

    #[test]
    fn test_decel_distance_validation() {
        let mut cam = camera();
        assert!(cam.set_decel_distances(200.0, 150.0).is_ok());
        assert!(matches!(
            cam.set_decel_distances(0.0, 150.0),
            Err(GameError::InvalidDecelDistance(_))
        ));
        assert!(matches!(
            cam.set_decel_distances(200.0, -1.0),
            Err(GameError::InvalidDecelDistance(_))
        ));
    }

    #[test]
    fn test_viewport_project_identity_without_camera() {
        let vp = Viewport::new(VIEW_W, VIEW_H, WORLD_W, WORLD_H);
        assert_eq!(vp.project(42.0, 17.0), (42.0, 17.0));
    }

    proptest! {
        /// The hard-limit rectangle is never violated under the smoothed
        /// policy, for any sequence of targets including ones far outside
        /// the world.
        #[test]
        fn prop_smooth_center_stays_in_limits(
            targets in prop::collection::vec((-5000.0f32..8000.0, -5000.0f32..8000.0), 1..40)
        ) {
            let mut cam = camera();
            for (tx, ty) in targets {
                cam.update(TrackingMode::SmoothExp, tx, ty);
                prop_assert!(cam.x >= VIEW_W / 2.0 && cam.x <= WORLD_W - VIEW_W / 2.0);
                prop_assert!(cam.y >= VIEW_H / 2.0 && cam.y <= WORLD_H - VIEW_H / 2.0);
            }
        }

        /// Identity mapping whenever the target lies inside the free zone.
        #[test]
        fn prop_smooth_identity_in_free_zone(
            tx in 600.0f32..2600.0,
            ty in 450.0f32..1350.0,
        ) {
            let mut cam = camera();
            cam.update(TrackingMode::SmoothExp, tx, ty);
            prop_assert_eq!((cam.x, cam.y), (tx, ty));
        }

        /// Clamp policy lands exactly on the clamped target.
        #[test]
        fn prop_clamp_matches_manual_clamp(
            tx in -5000.0f32..8000.0,
            ty in -5000.0f32..8000.0,
        ) {
            let mut cam = camera();
            cam.update(TrackingMode::Simple, tx, ty);
            prop_assert_eq!(cam.x, tx.max(VIEW_W / 2.0).min(WORLD_W - VIEW_W / 2.0));
            prop_assert_eq!(cam.y, ty.max(VIEW_H / 2.0).min(WORLD_H - VIEW_H / 2.0));
        }
    }
}
