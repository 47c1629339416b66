//! Remote-control packet shapes and bat orientation math
//!
//! The transport is an opaque relay owned by the host; this module defines
//! what travels over it. Inbound: a calibration command or live device
//! orientation (Euler angles or a quaternion). Outbound: vibration feedback
//! on bat strikes. Malformed packets are discarded locally and the channel
//! stays usable.
//!
//! The orientation filter does the work the packets imply: device Euler
//! angles (intrinsic Z-X'-Y'', degrees) to a quaternion, a fixed phone-to-
//! bat frame alignment, calibration-relative rotation, and slerp smoothing.
//! The filtered quaternion is consumed by the externally-owned bat rig.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::{EffectEvent, ShotType};

/// Live device orientation as DeviceOrientation-style Euler angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerPacket {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

/// Live device orientation as a quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuaternionPacket {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum CalibrateTag {
    #[serde(rename = "calibrate")]
    Calibrate,
}

/// `{type:"calibrate", ...}` — establish the reference orientation.
/// Missing angles default to zero, matching lenient controller firmware.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibratePacket {
    #[serde(rename = "type")]
    tag: CalibrateTag,
    #[serde(default)]
    pub alpha: f32,
    #[serde(default)]
    pub beta: f32,
    #[serde(default)]
    pub gamma: f32,
}

impl CalibratePacket {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            tag: CalibrateTag::Calibrate,
            alpha,
            beta,
            gamma,
        }
    }
}

/// Anything the controller device may send.
/// Variant order matters: the tagged calibrate form is tried first, then
/// the stricter quaternion shape, then plain Euler angles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InboundPacket {
    Calibrate(CalibratePacket),
    Quaternion(QuaternionPacket),
    Euler(EulerPacket),
}

/// Parse one inbound message. Malformed input is logged and dropped;
/// the caller keeps reading the channel.
pub fn parse_packet(raw: &str) -> Option<InboundPacket> {
    match serde_json::from_str(raw) {
        Ok(packet) => Some(packet),
        Err(err) => {
            log::debug!("discarding malformed remote packet: {err}");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum FeedbackTag {
    #[serde(rename = "vibrate")]
    Vibrate,
}

/// `{type:"vibrate", power, speed, shotType}` — strike feedback for the
/// controller device. Power is normalized impact speed in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibratePacket {
    #[serde(rename = "type")]
    tag: FeedbackTag,
    pub power: f32,
    pub speed: f32,
    #[serde(rename = "shotType")]
    pub shot_type: ShotType,
}

impl VibratePacket {
    pub fn new(power: f32, speed: f32, shot_type: ShotType) -> Self {
        Self {
            tag: FeedbackTag::Vibrate,
            power,
            speed,
            shot_type,
        }
    }

    /// Build the feedback packet for a bat-strike event, if it is one
    pub fn from_event(event: &EffectEvent) -> Option<Self> {
        match *event {
            EffectEvent::BatStrike { power, speed, shot } => {
                Some(Self::new(power, speed, shot))
            }
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        // Serialization of a plain value struct cannot fail
        serde_json::to_string(self).expect("vibrate packet serializes")
    }
}

/// Fixed phone-to-bat frame alignment: phone held upright, screen facing
/// away, maps to the bat upright with the blade facing the bowler.
/// A 90° rotation about X followed by 180° about Z.
fn phone_to_bat() -> Quat {
    let quarter_x = Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);
    let half_z = Quat::from_axis_angle(Vec3::Z, std::f32::consts::PI);
    half_z * quarter_x
}

/// Convert DeviceOrientation Euler angles (degrees, intrinsic Z-X'-Y'')
/// to a bat-frame quaternion.
pub fn euler_to_quat(alpha: f32, beta: f32, gamma: f32) -> Quat {
    let z = alpha.to_radians();
    let x = beta.to_radians();
    let y = gamma.to_radians();

    let c1 = (z / 2.0).cos();
    let c2 = (x / 2.0).cos();
    let c3 = (y / 2.0).cos();
    let s1 = (z / 2.0).sin();
    let s2 = (x / 2.0).sin();
    let s3 = (y / 2.0).sin();

    // Z-X'-Y'' order
    let w = c1 * c2 * c3 - s1 * s2 * s3;
    let qx = c1 * s2 * c3 - s1 * c2 * s3;
    let qy = c1 * c2 * s3 + s1 * s2 * c3;
    let qz = s1 * c2 * c3 + c1 * s2 * s3;

    phone_to_bat() * Quat::from_xyzw(qx, qy, qz, w)
}

/// Turns raw orientation packets into the smoothed, calibration-relative
/// quaternion the bat rig consumes.
#[derive(Debug, Clone, Copy)]
pub struct OrientationFilter {
    calibration: Option<Quat>,
    current: Quat,
    /// Slerp factor toward each new sample (0 = frozen, 1 = raw)
    pub smoothing: f32,
}

impl OrientationFilter {
    pub fn new() -> Self {
        Self {
            calibration: None,
            current: Quat::IDENTITY,
            smoothing: 0.8,
        }
    }

    /// Feed one inbound packet; returns the updated bat orientation
    pub fn apply(&mut self, packet: InboundPacket) -> Quat {
        match packet {
            InboundPacket::Calibrate(c) => {
                // The device points at the bowler during calibration, so the
                // reference is the half-turned, sign-flipped pose
                self.calibration =
                    Some(euler_to_quat((c.alpha + 180.0) % 360.0, -c.beta, -c.gamma));
                log::debug!("remote orientation calibrated");
            }
            InboundPacket::Euler(e) => {
                let raw = euler_to_quat(e.alpha, -e.beta, -e.gamma);
                self.track(raw);
            }
            InboundPacket::Quaternion(q) => {
                let raw = Quat::from_xyzw(q.x, q.y, q.z, q.w).normalize();
                self.track(raw);
            }
        }
        self.current
    }

    fn track(&mut self, raw: Quat) {
        let relative = match self.calibration {
            Some(calib) => raw * calib.inverse(),
            None => raw,
        };
        self.current = self.current.slerp(relative, self.smoothing);
    }

    pub fn orientation(&self) -> Quat {
        self.current
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self::new()
    }
}
