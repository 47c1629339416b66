//! Per-delivery-type trajectory profiles
//!
//! Each delivery type has a static profile: where the bowler may release
//! from, how far short of the batsman the ball pitches, how lively the
//! bounce is, and the cosmetic spin/curve magnitudes. Values are tuned
//! for feel, not derived from real aerodynamics.

use serde::{Deserialize, Serialize};

/// The bowled variations a session can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Normal,
    Fast,
    Bouncer,
    Yorker,
    Spin,
}

impl DeliveryType {
    pub const ALL: [DeliveryType; 5] = [
        DeliveryType::Normal,
        DeliveryType::Fast,
        DeliveryType::Bouncer,
        DeliveryType::Yorker,
        DeliveryType::Spin,
    ];

    /// Parse a UI/selector name. Unknown names fall back to `Normal`,
    /// mirroring the planner's unknown-type policy.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fast" => DeliveryType::Fast,
            "bouncer" => DeliveryType::Bouncer,
            "yorker" => DeliveryType::Yorker,
            "spin" => DeliveryType::Spin,
            _ => DeliveryType::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeliveryType::Normal => "normal",
            DeliveryType::Fast => "fast",
            DeliveryType::Bouncer => "bouncer",
            DeliveryType::Yorker => "yorker",
            DeliveryType::Spin => "spin",
        }
    }
}

/// Static parameters for one delivery type.
///
/// Ranges are `[min, max]` with `min <= max`; restitution is in (0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeliveryProfile {
    /// Release height range (m)
    pub release_height: [f32; 2],
    /// Release lateral range (m, within the side creases)
    pub release_lateral: [f32; 2],
    /// Bounce distance short of the batsman's crease (m)
    pub bounce_distance: [f32; 2],
    /// Vertical bounce liveliness used by the scripted carry hump
    pub restitution: f32,
    /// Signed turn magnitude applied after the bounce
    pub spin: f32,
    /// Signed lateral curve magnitude applied in the air
    pub air_curve: f32,
}

const NORMAL: DeliveryProfile = DeliveryProfile {
    release_height: [1.78, 2.12],
    release_lateral: [-0.6, 0.6],
    bounce_distance: [2.5, 4.0],
    restitution: 0.55,
    spin: 0.0,
    air_curve: 0.0,
};

const FAST: DeliveryProfile = DeliveryProfile {
    release_height: [1.9, 2.1],
    release_lateral: [-0.6, 0.6],
    bounce_distance: [5.0, 7.0],
    restitution: 0.45,
    spin: 0.0,
    air_curve: 0.0,
};

const BOUNCER: DeliveryProfile = DeliveryProfile {
    release_height: [2.1, 2.4],
    release_lateral: [-0.6, 0.6],
    bounce_distance: [8.0, 10.0],
    restitution: 0.7,
    spin: 0.0,
    air_curve: 0.0,
};

const YORKER: DeliveryProfile = DeliveryProfile {
    release_height: [1.5, 1.7],
    release_lateral: [-0.6, 0.6],
    bounce_distance: [0.5, 1.2],
    restitution: 0.3,
    spin: 0.0,
    air_curve: 0.0,
};

const SPIN: DeliveryProfile = DeliveryProfile {
    release_height: [1.8, 2.0],
    release_lateral: [-0.5, 0.5],
    bounce_distance: [5.5, 7.5],
    restitution: 0.55,
    spin: 0.5,
    air_curve: 0.5,
};

/// Look up the profile for a delivery type
pub const fn profile(kind: DeliveryType) -> &'static DeliveryProfile {
    match kind {
        DeliveryType::Normal => &NORMAL,
        DeliveryType::Fast => &FAST,
        DeliveryType::Bouncer => &BOUNCER,
        DeliveryType::Yorker => &YORKER,
        DeliveryType::Spin => &SPIN,
    }
}

/// Planned arrival height at the batsman's crease.
///
/// Yorkers finish just above the pitch, bouncers at helmet height,
/// everything else around the top of the stumps.
pub const fn target_height(kind: DeliveryType) -> f32 {
    match kind {
        DeliveryType::Yorker => 0.05,
        DeliveryType::Bouncer => 1.3,
        _ => 0.7,
    }
}
