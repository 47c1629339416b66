//! Bat strike surfaces and impact response
//!
//! The bat rig itself (model, rotation input) is owned by the host; the
//! simulation only sees its world-space collision volumes and orientation.
//! Blade and handle share one parametrized proximity check, tried in fixed
//! order with a short-circuit on the first hit. Missing volumes simply
//! mean no strike is possible yet.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::zones::Aabb;
use crate::consts::*;
use crate::elevation_angle;

/// What the free-body stepper remembers about a strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeRecord {
    /// Ball speed immediately after impact (m/s)
    pub speed: f32,
    /// Launch angle above the ground plane (radians)
    pub angle: f32,
}

impl StrikeRecord {
    pub fn from_velocity(v: Vec3) -> Self {
        Self {
            speed: v.length(),
            angle: elevation_angle(v),
        }
    }
}

/// World-space view of the externally-owned bat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatRig {
    /// Current world orientation (identity = blade upright, face to bowler)
    pub orientation: Quat,
    /// Blade collision volume, if the rig has published one
    pub blade: Option<Aabb>,
    /// Handle collision volume
    pub handle: Option<Aabb>,
}

impl BatRig {
    pub fn new(orientation: Quat, blade: Option<Aabb>, handle: Option<Aabb>) -> Self {
        Self {
            orientation,
            blade,
            handle,
        }
    }

    /// Bat face normal: local +Y in world space
    pub fn up_axis(&self) -> Vec3 {
        (self.orientation * Vec3::Y).normalize_or_zero()
    }

    /// Swing direction: local +Z in world space
    pub fn forward_axis(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize_or_zero()
    }

    /// Candidate strike surfaces in check order: blade first, then handle
    fn surfaces(&self) -> impl Iterator<Item = &Aabb> {
        self.blade.iter().chain(self.handle.iter())
    }

    /// First surface within striking range of the ball, if any
    pub fn surface_within(&self, ball_pos: Vec3, range: f32) -> Option<&Aabb> {
        self.surfaces()
            .find(|s| s.distance_to_point(ball_pos) < range)
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Post-impact velocity: damped reflection about the bat face, a forward
/// boost along the swing axis scaled by incoming speed, and a fixed lift.
pub fn strike_response(velocity: Vec3, rig: &BatRig) -> Vec3 {
    let reflected = reflect_velocity(velocity, rig.up_axis()) * BAT_REFLECT_DAMP;
    let forward = rig.forward_axis() * (velocity.length() * BAT_FORWARD_GAIN + BAT_FORWARD_BASE);
    let mut out = reflected + forward;
    out.y = out.y.abs() + BAT_LIFT;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upright_rig(blade: Option<Aabb>, handle: Option<Aabb>) -> BatRig {
        BatRig::new(Quat::IDENTITY, blade, handle)
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball dropping onto a flat face (normal up)
        let v = Vec3::new(1.0, -2.0, 0.0);
        let r = reflect_velocity(v, Vec3::Y);
        assert!((r.x - 1.0).abs() < 1e-6);
        assert!((r.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_strike_response_lifts_the_ball() {
        let rig = upright_rig(None, None);
        let out = strike_response(Vec3::new(0.0, -2.0, -10.0), &rig);
        assert!(out.y > 0.0);
        // Forward boost sends it back down the pitch
        assert!(out.z > 0.0);
    }

    #[test]
    fn test_strike_response_scales_with_incoming_speed() {
        let rig = upright_rig(None, None);
        let slow = strike_response(Vec3::new(0.0, 0.0, -5.0), &rig);
        let fast = strike_response(Vec3::new(0.0, 0.0, -20.0), &rig);
        assert!(fast.length() > slow.length());
    }

    #[test]
    fn test_surface_order_blade_first() {
        let blade = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(1.0));
        let handle = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let rig = upright_rig(Some(blade), Some(handle));
        let hit = rig.surface_within(Vec3::ZERO, 0.1).unwrap();
        assert_eq!(*hit, blade);
    }

    #[test]
    fn test_missing_volumes_never_strike() {
        let rig = upright_rig(None, None);
        assert!(rig.surface_within(Vec3::ZERO, 100.0).is_none());

        // Handle alone still works
        let handle = Aabb::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.2));
        let rig = upright_rig(None, Some(handle));
        assert!(rig.surface_within(Vec3::new(0.0, 1.0, 0.0), 0.05).is_some());
    }

    #[test]
    fn test_strike_record_angle() {
        let rec = StrikeRecord::from_velocity(Vec3::new(0.0, 1.0, 1.0));
        assert!((rec.angle - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert!((rec.speed - 2.0_f32.sqrt()).abs() < 1e-5);
    }
}
