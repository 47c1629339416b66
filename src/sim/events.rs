//! Effect events
//!
//! The simulation never talks to audio, VFX, scoring, or camera code
//! directly. It accumulates typed events on the match state; the host
//! drains them each frame and fans them out to whatever collaborators
//! are present.

use serde::{Deserialize, Serialize};

/// Shot classification by impact power, used for remote vibration feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Defensive,
    Flick,
    Drive,
    Power,
}

impl ShotType {
    /// Classify by normalized impact power (0..=1)
    pub fn classify(power: f32) -> Self {
        if power > 0.7 {
            ShotType::Power
        } else if power > 0.4 {
            ShotType::Drive
        } else if power > 0.2 {
            ShotType::Flick
        } else {
            ShotType::Defensive
        }
    }
}

/// Why a delivery ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Crossed the physical boundary wall
    BoundaryWall,
    /// Came to rest on the ground
    AtRest,
    /// Externally reset mid-flight
    Reset,
}

/// Camera hints for the host's view controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraCue {
    /// Switch to the ball-follow view (fires a beat after a strike)
    FollowBall,
    /// Return to the previous view (fires a beat after the ball stops)
    Restore,
}

/// One side effect the host should render, play, or score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectEvent {
    /// The bat connected. Power is normalized impact speed (0..=1).
    BatStrike {
        power: f32,
        speed: f32,
        shot: ShotType,
    },
    /// The ball hit the ground with meaningful downward speed
    GroundBounce,
    /// The ball entered a wicket area (highlight it)
    WicketZoneEntered { index: usize },
    /// A wicket-area highlight timed out (revert it)
    WicketZoneReverted { index: usize },
    /// The ball entered the batsman-side alert zone
    AlertZoneEntered,
    AlertZoneReverted,
    /// Scoring boundary crossed after a bounce
    BoundaryFour,
    /// Scoring boundary crossed on the full
    BoundarySix,
    /// The delivery is over
    DeliveryStopped { reason: StopReason },
    Camera(CameraCue),
}
