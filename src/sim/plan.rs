//! Delivery planning
//!
//! Turns a delivery type and bowling speed into the immutable flight plan
//! the scripted stepper follows: release point, bounce point, target point,
//! and the duration of each scripted phase. One uniform draw per ranged
//! profile field; everything else is deterministic.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::profile::{DeliveryType, profile, target_height};
use crate::consts::*;

/// A fully planned delivery, immutable once created
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub kind: DeliveryType,
    /// Bowling speed (m/s)
    pub speed: f32,
    /// Where the ball leaves the bowler's hand
    pub release: Vec3,
    /// Where it pitches
    pub bounce: Vec3,
    /// Where it would arrive absent further physics
    pub target: Vec3,
    /// Duration of the release->bounce phase (s)
    pub air_time: f32,
    /// Duration of the bounce->target phase (s)
    pub carry_time: f32,
    /// Profile values the scripted stepper needs each frame
    pub spin: f32,
    pub air_curve: f32,
    pub restitution: f32,
}

impl DeliveryPlan {
    /// Total planned scripted-flight duration
    pub fn total_time(&self) -> f32 {
        self.air_time + self.carry_time
    }
}

fn draw(rng: &mut Pcg32, range: [f32; 2]) -> f32 {
    if range[0] >= range[1] {
        return range[0];
    }
    rng.random_range(range[0]..=range[1])
}

/// Plan a delivery. `speed` must be positive; there are no error paths -
/// every `(kind, speed)` pair yields a usable plan.
pub fn plan(kind: DeliveryType, speed: f32, rng: &mut Pcg32) -> DeliveryPlan {
    let cfg = profile(kind);

    let release = Vec3::new(
        draw(rng, cfg.release_lateral),
        draw(rng, cfg.release_height),
        RELEASE_Z,
    );

    // Bounce point: yorkers pitch just short of the crease, bouncers at the
    // pitch midpoint, everything else a drawn distance short of the batsman
    // with the air curve folded into the lateral landing spot.
    let (bounce_x, bounce_z) = match kind {
        DeliveryType::Yorker => (release.x, CREASE_Z - 0.1),
        DeliveryType::Bouncer => (release.x, (RELEASE_Z + CREASE_Z) / 2.0),
        _ => (
            release.x + cfg.air_curve,
            CREASE_Z - draw(rng, cfg.bounce_distance),
        ),
    };
    let bounce = Vec3::new(bounce_x, BOUNCE_CONTACT_Y, bounce_z);

    // Target lateral: spin aims inside the stumps so the turn shift is
    // visible against them; everything else anywhere between the creases.
    let mut target_x = match kind {
        DeliveryType::Spin => {
            let half = STUMPS_WIDTH / 2.0 - 0.01;
            draw(rng, [-half, half])
        }
        _ => draw(rng, [-SIDE_CREASE_X, SIDE_CREASE_X]),
    };
    target_x += cfg.spin * SPIN_TARGET_SHIFT;
    let target = Vec3::new(target_x, target_height(kind), CREASE_Z);

    // Durations stretch the straight-line time because the path is curved
    let air_time = (bounce.z - release.z).abs() / speed * AIR_TIME_STRETCH;
    let carry_time = (target.z - bounce.z).abs() / speed * CARRY_TIME_STRETCH;

    DeliveryPlan {
        kind,
        speed,
        release,
        bounce,
        target,
        air_time,
        carry_time,
        spin: cfg.spin,
        air_curve: cfg.air_curve,
        restitution: cfg.restitution,
    }
}
