//! Gully Cricket - interactive cricket delivery simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (delivery planning, scripted flight,
//!   free-body physics, zone/boundary detection, effect events)
//! - `session`: Launch gating and delivery sequencing (free play, over of
//!   six, multiplayer turn rotation)
//! - `remote`: Remote-control packet shapes and bat orientation math
//!
//! Rendering, scene construction, audio, and the remote transport are
//! external collaborators; this crate only produces the data they consume.

pub mod remote;
pub mod session;
pub mod sim;

pub use session::{DeliverySettings, Session};
pub use sim::{BatRig, DeliveryType, EffectEvent, MatchState, tick};

use glam::Vec3;

/// Simulation constants.
///
/// Coordinate system: x lateral (positive toward the off side), y up,
/// z along the pitch with the bowler's crease at negative z and the
/// batsman at positive z. Units are meters and seconds.
pub mod consts {
    /// Ball radius (regulation-ish cricket ball)
    pub const BALL_RADIUS: f32 = 0.045;
    /// Bowler's release crease
    pub const RELEASE_Z: f32 = -11.06;
    /// Batsman's crease, 0.7 m inside the far wicket
    pub const CREASE_Z: f32 = 11.06 - 0.7;
    /// Wickets stand at z = ±PITCH_HALF_LENGTH
    pub const PITCH_HALF_LENGTH: f32 = 11.06;
    /// Pitch contact height of a planned bounce point
    pub const BOUNCE_CONTACT_Y: f32 = 0.045 + BALL_RADIUS;
    /// Side crease lines bound the lateral release/target spread
    pub const SIDE_CREASE_X: f32 = 0.6;

    /// Stump geometry (3 stumps, real dimensions)
    pub const STUMP_GAP: f32 = 0.1143;
    pub const STUMP_DIA: f32 = 0.045;
    pub const STUMP_HEIGHT: f32 = 0.71;
    /// Full width of the three-stump set
    pub const STUMPS_WIDTH: f32 = 2.0 * STUMP_GAP + STUMP_DIA;

    /// Frame dt clamp to avoid spiral-of-death on slow frames
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Nominal display-refresh timestep for headless stepping
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Baseline gravity
    pub const GRAVITY_Y: f32 = -9.8;
    /// Air resistance coefficient (isotropic, applied while airborne)
    pub const AIR_DRAG: f32 = 0.12;
    /// Per-frame horizontal damping while on the ground
    pub const GROUND_FRICTION: f32 = 0.88;
    /// Height margin above the radius that still counts as "on the ground"
    pub const GROUND_CLEARANCE: f32 = 0.01;
    /// Vertical restitution on bounce, struck vs raw-bowled ball
    pub const STRUCK_RESTITUTION: f32 = -0.5;
    pub const UNSTRUCK_RESTITUTION: f32 = -0.6;
    /// Horizontal damping at an unstruck bounce contact
    pub const UNSTRUCK_BOUNCE_DAMP: f32 = 0.95;
    /// Vertical speeds below this are zeroed at ground contact
    pub const BOUNCE_KILL_VY: f32 = 0.5;
    /// Component speeds below this count as "at rest"
    pub const REST_EPSILON: f32 = 0.01;

    /// Scripted flight stretch factors (curved path, not straight-line)
    pub const AIR_TIME_STRETCH: f32 = 1.2;
    pub const CARRY_TIME_STRETCH: f32 = 1.1;
    /// Fraction of the bowling speed carried into the free-body hand-off
    pub const HANDOFF_SPEED_FACTOR: f32 = 0.7;
    /// Bounce-hump and spin-drift gains in the post-bounce scripted phase
    pub const BOUNCE_HUMP_GAIN: f32 = 1.2;
    pub const SPIN_DRIFT_GAIN: f32 = 0.7;
    /// Lateral shift of the target point per unit of spin
    pub const SPIN_TARGET_SHIFT: f32 = 1.2;

    /// Bat proximity threshold as a multiple of the ball radius
    pub const BAT_HIT_RANGE: f32 = 1.1;
    /// Reflection damping off the blade face
    pub const BAT_REFLECT_DAMP: f32 = 0.7;
    /// Forward boost: incoming speed × gain + base
    pub const BAT_FORWARD_GAIN: f32 = 0.6;
    pub const BAT_FORWARD_BASE: f32 = 7.0;
    /// Fixed upward boost applied on every strike
    pub const BAT_LIFT: f32 = 3.0;
    /// Impact speed that maps to full vibration power
    pub const FULL_POWER_SPEED: f32 = 30.0;

    /// Scoring boundary ellipse semi-axes
    pub const SCORING_SEMI_X: f32 = 62.5;
    pub const SCORING_SEMI_Z: f32 = 72.5;
    /// Physical barrier ellipse semi-axes
    pub const WALL_SEMI_X: f32 = 72.5;
    pub const WALL_SEMI_Z: f32 = 82.5;
    /// Alert zone only triggers on the batsman's side of the ground
    pub const ALERT_MIN_Z: f32 = 8.0;

    /// Zone highlight auto-revert delays
    pub const WICKET_HIGHLIGHT_SECS: f32 = 1.0;
    pub const ALERT_HIGHLIGHT_SECS: f32 = 3.0;
    /// Camera cue delays: follow-ball after a strike, restore after rest
    pub const CAMERA_CUE_SECS: f32 = 1.0;
    pub const CAMERA_RESTORE_SECS: f32 = 0.8;
}

/// Horizontal (ground-plane) speed of a velocity vector
#[inline]
pub fn planar_speed(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Elevation angle of a velocity vector above the ground plane, radians
#[inline]
pub fn elevation_angle(v: Vec3) -> f32 {
    v.y.atan2(planar_speed(v))
}
