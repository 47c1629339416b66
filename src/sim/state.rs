//! Match state and core simulation types
//!
//! One ball, one delivery in flight at a time. The flight phase tag names
//! which stepper currently owns the ball; hand-off is a one-way phase
//! transition, never shared mutation.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bat::StrikeRecord;
use super::events::{CameraCue, EffectEvent, StopReason};
use super::plan::{self, DeliveryPlan};
use super::profile::DeliveryType;
use super::zones::FieldZones;
use crate::consts::*;

/// Which stepper currently drives the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// No delivery in progress
    Rest,
    /// Scripted release->bounce curve
    ScriptedAir { elapsed: f32 },
    /// Scripted bounce->target curve
    ScriptedGround { elapsed: f32 },
    /// Free physics until a terminal condition
    FreeBody,
}

/// The single, reused ball instance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    /// Zero during the scripted phases; populated at hand-off
    pub vel: Vec3,
    pub radius: f32,
    pub phase: FlightPhase,
    /// Ground contact since the strike (decides four vs six)
    pub has_bounced: bool,
    /// Scoring boundary already credited this delivery
    pub has_crossed_boundary: bool,
    /// Latched on the first bat contact; never set twice per delivery
    pub strike: Option<StrikeRecord>,
    /// Active gravity; steepened after low-angle struck bounces
    pub gravity: f32,
    /// Previous-frame ground position for boundary-crossing detection
    pub prev_xz: Vec2,
}

impl BallState {
    /// Resting spot in front of the bowler's crease
    pub fn rest_position() -> Vec3 {
        Vec3::new(0.0, 0.05, RELEASE_Z)
    }

    pub fn new() -> Self {
        let pos = Self::rest_position();
        Self {
            pos,
            vel: Vec3::ZERO,
            radius: BALL_RADIUS,
            phase: FlightPhase::Rest,
            has_bounced: false,
            has_crossed_boundary: false,
            strike: None,
            gravity: GRAVITY_Y,
            prev_xz: Vec2::new(pos.x, pos.z),
        }
    }

    /// The authoritative "delivery in progress" flag
    pub fn in_flight(&self) -> bool {
        !matches!(self.phase, FlightPhase::Rest)
    }

    pub fn has_been_struck(&self) -> bool {
        self.strike.is_some()
    }

    /// Back to the release spot, inert. Same instance, reset not destroyed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed wrapper so match state stays serializable; each delivery gets its
/// own derived stream and replaying a seed reproduces every plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn delivery_rng(&self, delivery_index: u32) -> Pcg32 {
        let stream = (delivery_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Pcg32::seed_from_u64(self.seed ^ stream)
    }
}

/// Debounced countdown timers for zone highlights and camera cues.
/// One active timer per feature; a new trigger restarts rather than stacks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighlightTimers {
    wicket: Option<(usize, f32)>,
    alert: Option<f32>,
    camera_cue: Option<f32>,
    camera_armed: bool,
    camera_restore: Option<f32>,
}

impl HighlightTimers {
    /// Returns true if the highlight should (re)fire for this area.
    /// Re-entry of the already-lit area is debounced; a different area
    /// takes over the timer and the old one reverts.
    pub fn trigger_wicket(&mut self, index: usize, events: &mut Vec<EffectEvent>) -> bool {
        if let Some((lit, _)) = self.wicket {
            if lit == index {
                return false;
            }
            events.push(EffectEvent::WicketZoneReverted { index: lit });
        }
        self.wicket = Some((index, WICKET_HIGHLIGHT_SECS));
        true
    }

    pub fn trigger_alert(&mut self) -> bool {
        if self.alert.is_some() {
            return false;
        }
        self.alert = Some(ALERT_HIGHLIGHT_SECS);
        true
    }

    /// Arm the delayed follow-ball camera cue (on strike)
    pub fn arm_camera_cue(&mut self) {
        self.camera_cue = Some(CAMERA_CUE_SECS);
        self.camera_armed = true;
    }

    /// Arm the delayed restore cue (on stop), only if a strike armed us
    pub fn arm_camera_restore(&mut self) {
        if self.camera_armed {
            self.camera_armed = false;
            self.camera_cue = None;
            self.camera_restore = Some(CAMERA_RESTORE_SECS);
        }
    }

    pub fn clear_camera(&mut self) {
        self.camera_cue = None;
        self.camera_armed = false;
        self.camera_restore = None;
    }

    /// Advance all timers, emitting revert/cue events on expiry
    pub fn tick(&mut self, dt: f32, events: &mut Vec<EffectEvent>) {
        if let Some((index, remaining)) = &mut self.wicket {
            *remaining -= dt;
            if *remaining <= 0.0 {
                events.push(EffectEvent::WicketZoneReverted { index: *index });
                self.wicket = None;
            }
        }
        if let Some(remaining) = &mut self.alert {
            *remaining -= dt;
            if *remaining <= 0.0 {
                events.push(EffectEvent::AlertZoneReverted);
                self.alert = None;
            }
        }
        if let Some(remaining) = &mut self.camera_cue {
            *remaining -= dt;
            if *remaining <= 0.0 {
                events.push(EffectEvent::Camera(CameraCue::FollowBall));
                self.camera_cue = None;
            }
        }
        if let Some(remaining) = &mut self.camera_restore {
            *remaining -= dt;
            if *remaining <= 0.0 {
                events.push(EffectEvent::Camera(CameraCue::Restore));
                self.camera_restore = None;
            }
        }
    }
}

/// Complete simulation state for one crease
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Deliveries launched so far (also the per-delivery RNG stream index)
    pub deliveries_bowled: u32,
    pub ball: BallState,
    /// The active plan; `None` between deliveries
    pub plan: Option<DeliveryPlan>,
    pub zones: FieldZones,
    pub highlights: HighlightTimers,
    /// Pending effect events, drained by the host each frame
    #[serde(skip)]
    pub events: Vec<EffectEvent>,
}

impl MatchState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            deliveries_bowled: 0,
            ball: BallState::new(),
            plan: None,
            zones: FieldZones::default(),
            highlights: HighlightTimers::default(),
            events: Vec::new(),
        }
    }

    /// Begin a delivery. Silent no-op (returns false) while one is already
    /// in flight; unknown speed/type combinations always plan something.
    pub fn launch(&mut self, kind: DeliveryType, speed: f32) -> bool {
        if self.ball.in_flight() {
            return false;
        }
        let mut rng = self.rng_state.delivery_rng(self.deliveries_bowled);
        let plan = plan::plan(kind, speed, &mut rng);
        log::debug!(
            "delivery {}: {} at {:.1} m/s, pitching at z={:.2}",
            self.deliveries_bowled + 1,
            kind.name(),
            speed,
            plan.bounce.z
        );
        self.ball.reset();
        self.ball.pos = plan.release;
        self.ball.prev_xz = Vec2::new(plan.release.x, plan.release.z);
        self.ball.phase = FlightPhase::ScriptedAir { elapsed: 0.0 };
        self.highlights.clear_camera();
        self.plan = Some(plan);
        self.deliveries_bowled += 1;
        true
    }

    /// Abort/reset: ball back to the release spot, inert. The next tick of
    /// any in-flight stepper observes the phase and does nothing.
    pub fn reset_ball(&mut self) {
        if self.ball.in_flight() {
            self.events.push(EffectEvent::DeliveryStopped {
                reason: StopReason::Reset,
            });
        }
        self.ball.reset();
        self.plan = None;
        self.highlights.clear_camera();
    }

    /// Take this frame's accumulated effect events
    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }
}
