//! Field zone geometry
//!
//! Static regions the physics stepper tests against every frame: the
//! wicket-area boxes around each set of stumps, the batsman-side alert
//! ellipse, and the two concentric boundary ellipses (inner = scoring,
//! outer = physical wall). All shared read-only.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned box, used for wicket areas and bat strike volumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Point containment, inclusive of the faces
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Distance from a point to the box surface; zero inside
    pub fn distance_to_point(&self, p: Vec3) -> f32 {
        let clamped = p.clamp(self.min, self.max);
        (p - clamped).length()
    }
}

/// Ellipse on the ground plane, centered at the pitch middle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEllipse {
    pub semi_x: f32,
    pub semi_z: f32,
}

impl BoundaryEllipse {
    pub const fn new(semi_x: f32, semi_z: f32) -> Self {
        Self { semi_x, semi_z }
    }

    /// Squared normalized elliptical radius: < 1 inside, 1 on the rim
    pub fn normalized_radius_sq(&self, x: f32, z: f32) -> f32 {
        (x * x) / (self.semi_x * self.semi_x) + (z * z) / (self.semi_z * self.semi_z)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.normalized_radius_sq(p.x, p.z) <= 1.0
    }

    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        self.normalized_radius_sq(x, z) <= 1.0
    }
}

/// All static field geometry the stepper consults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldZones {
    /// One box per wicket (index 0 = bowler's end, 1 = batsman's end)
    pub wicket_areas: Vec<Aabb>,
    /// Inner scoring boundary
    pub scoring: BoundaryEllipse,
    /// Outer physical wall
    pub wall: BoundaryEllipse,
    /// Alert zone lower z bound (batsman's side of the scoring ellipse)
    pub alert_min_z: f32,
}

impl FieldZones {
    /// Inside the alert zone: scoring footprint, batsman's side only
    pub fn alert_contains(&self, p: Vec3) -> bool {
        p.z > self.alert_min_z && self.scoring.contains(p)
    }

    /// Index of the wicket area containing the point, if any
    pub fn wicket_area_at(&self, p: Vec3) -> Option<usize> {
        self.wicket_areas.iter().position(|a| a.contains(p))
    }
}

fn wicket_area(z: f32) -> Aabb {
    Aabb::from_center_size(
        Vec3::new(0.0, STUMP_HEIGHT / 2.0 + 0.05, z),
        Vec3::new(STUMPS_WIDTH, STUMP_HEIGHT, STUMP_DIA * 2.0),
    )
}

impl Default for FieldZones {
    fn default() -> Self {
        Self {
            wicket_areas: vec![
                wicket_area(-PITCH_HALF_LENGTH),
                wicket_area(PITCH_HALF_LENGTH),
            ],
            scoring: BoundaryEllipse::new(SCORING_SEMI_X, SCORING_SEMI_Z),
            wall: BoundaryEllipse::new(WALL_SEMI_X, WALL_SEMI_Z),
            alert_min_z: ALERT_MIN_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_contains_and_distance() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        assert!(b.contains(Vec3::ZERO));
        assert!(b.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(Vec3::new(1.01, 0.0, 0.0)));
        assert_eq!(b.distance_to_point(Vec3::new(0.5, 0.0, 0.0)), 0.0);
        assert!((b.distance_to_point(Vec3::new(3.0, 0.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_containment() {
        let e = BoundaryEllipse::new(62.5, 72.5);
        assert!(e.contains(Vec3::ZERO));
        assert!(e.contains(Vec3::new(62.0, 0.0, 0.0)));
        assert!(!e.contains(Vec3::new(63.0, 0.0, 0.0)));
        // Longer axis along the pitch
        assert!(e.contains(Vec3::new(0.0, 0.0, 70.0)));
        assert!(!e.contains(Vec3::new(0.0, 0.0, 73.0)));
    }

    #[test]
    fn test_wicket_areas_cover_the_stumps() {
        let zones = FieldZones::default();
        assert_eq!(zones.wicket_areas.len(), 2);
        // Middle stump at the batsman's end
        assert_eq!(
            zones.wicket_area_at(Vec3::new(0.0, 0.3, PITCH_HALF_LENGTH)),
            Some(1)
        );
        // Outside stump at the bowler's end
        assert_eq!(
            zones.wicket_area_at(Vec3::new(STUMP_GAP, 0.3, -PITCH_HALF_LENGTH)),
            Some(0)
        );
        // Mid-pitch is no-man's-land
        assert_eq!(zones.wicket_area_at(Vec3::new(0.0, 0.3, 0.0)), None);
    }

    #[test]
    fn test_alert_zone_is_batsman_side_only() {
        let zones = FieldZones::default();
        assert!(zones.alert_contains(Vec3::new(0.0, 0.1, 20.0)));
        assert!(!zones.alert_contains(Vec3::new(0.0, 0.1, -20.0)));
        assert!(!zones.alert_contains(Vec3::new(0.0, 0.1, 5.0)));
        // Batsman side but beyond the scoring rim
        assert!(!zones.alert_contains(Vec3::new(0.0, 0.1, 73.0)));
    }

    #[test]
    fn test_wall_encloses_scoring_boundary() {
        let zones = FieldZones::default();
        assert!(zones.wall.semi_x > zones.scoring.semi_x);
        assert!(zones.wall.semi_z > zones.scoring.semi_z);
    }
}
