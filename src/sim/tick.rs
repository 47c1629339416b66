//! Per-frame orchestrator
//!
//! The host owns the frame loop (display refresh, ~60 Hz nominal) and calls
//! `tick` once per frame. The flight-phase tag picks the stepper that owns
//! the ball this frame; everything else here is timer housekeeping.

use super::physics;
use super::scripted;
use super::state::{FlightPhase, MatchState};
use crate::consts::MAX_FRAME_DT;
use crate::sim::bat::BatRig;

/// Advance the simulation by one frame. `dt` is the real elapsed time since
/// the previous frame; it is clamped to avoid spiral-of-death on slow
/// frames. `bat` is the host's current view of the bat rig, if loaded.
pub fn tick(state: &mut MatchState, bat: Option<&BatRig>, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    // Highlight/camera countdowns run even between deliveries
    state.highlights.tick(dt, &mut state.events);

    match state.ball.phase {
        FlightPhase::Rest => {}
        FlightPhase::ScriptedAir { .. } | FlightPhase::ScriptedGround { .. } => {
            match &state.plan {
                Some(plan) => scripted::step(&mut state.ball, plan, dt),
                None => {
                    // Unreachable through the public API; recover anyway
                    log::warn!("scripted phase with no plan, resetting ball");
                    state.ball.reset();
                }
            }
        }
        FlightPhase::FreeBody => physics::step(state, bat, dt),
    }
}
