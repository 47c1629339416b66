//! Scripted flight stepper
//!
//! The first two legs of a delivery follow designed curves rather than
//! physics, so every delivery type reads consistently on screen. Both
//! phases are driven by normalized progress `alpha = elapsed / duration`
//! clamped to [0, 1]:
//!
//! - Air (release->bounce): linear interpolation with a sinusoidal lateral
//!   curve peaking at alpha = 0.5.
//! - Carry (bounce->target): linear interpolation with a restitution-scaled
//!   bounce hump and a spin drift that accelerates through the phase.
//!
//! At the end of the carry the ball is handed to the free-body stepper
//! with a velocity along the carry direction at a fraction of the bowling
//! speed. Cancellation is a phase check: an externally reset ball is never
//! moved.

use std::f32::consts::PI;

use glam::Vec2;

use super::plan::DeliveryPlan;
use super::state::{BallState, FlightPhase};
use crate::consts::*;

/// Advance one scripted frame. No-op unless the ball is in a scripted phase.
pub(crate) fn step(ball: &mut BallState, plan: &DeliveryPlan, dt: f32) {
    match ball.phase {
        FlightPhase::ScriptedAir { elapsed } => step_air(ball, plan, elapsed + dt),
        FlightPhase::ScriptedGround { elapsed } => step_carry(ball, plan, elapsed + dt),
        _ => {}
    }
}

fn step_air(ball: &mut BallState, plan: &DeliveryPlan, elapsed: f32) {
    let alpha = (elapsed / plan.air_time).min(1.0);
    ball.pos = plan.release.lerp(plan.bounce, alpha);
    // Cosmetic in-air curve; zero at both endpoints so the planned bounce
    // point is hit exactly
    ball.pos.x += plan.air_curve * (PI * alpha).sin();

    if alpha >= 1.0 {
        ball.phase = FlightPhase::ScriptedGround { elapsed: 0.0 };
    } else {
        ball.phase = FlightPhase::ScriptedAir { elapsed };
    }
}

fn step_carry(ball: &mut BallState, plan: &DeliveryPlan, elapsed: f32) {
    let alpha = (elapsed / plan.carry_time).min(1.0);
    ball.pos = plan.bounce.lerp(plan.target, alpha);
    // Bounce hump, livelier for bouncier profiles
    ball.pos.y += (PI * alpha).sin() * plan.restitution * BOUNCE_HUMP_GAIN;
    // Turn off the pitch: drift accelerates through the phase
    if plan.spin != 0.0 {
        ball.pos.x += plan.spin * (1.0 - (PI * alpha).cos()) * SPIN_DRIFT_GAIN;
    }

    if alpha >= 1.0 {
        hand_off(ball, plan);
    } else {
        ball.phase = FlightPhase::ScriptedGround { elapsed };
    }
}

/// One-way ownership transfer to the free-body stepper
fn hand_off(ball: &mut BallState, plan: &DeliveryPlan) {
    let direction = (plan.target - plan.bounce).normalize_or_zero();
    ball.vel = direction * plan.speed * HANDOFF_SPEED_FACTOR;
    ball.gravity = GRAVITY_Y;
    ball.prev_xz = Vec2::new(ball.pos.x, ball.pos.z);
    ball.phase = FlightPhase::FreeBody;
    log::trace!(
        "hand-off at {:?} with speed {:.1} m/s",
        ball.pos,
        ball.vel.length()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::plan::plan;
    use crate::sim::profile::DeliveryType;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn launched(kind: DeliveryType, speed: f32, seed: u64) -> (BallState, DeliveryPlan) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let plan = plan(kind, speed, &mut rng);
        let mut ball = BallState::new();
        ball.pos = plan.release;
        ball.phase = FlightPhase::ScriptedAir { elapsed: 0.0 };
        (ball, plan)
    }

    #[test]
    fn test_air_phase_reaches_the_bounce_point() {
        let (mut ball, plan) = launched(DeliveryType::Spin, 16.0, 3);
        // A single oversized step lands exactly on the clamped endpoint
        step(&mut ball, &plan, plan.air_time + 1.0);
        assert!((ball.pos - plan.bounce).length() < 1e-4);
        assert!(matches!(ball.phase, FlightPhase::ScriptedGround { .. }));
        assert_eq!(ball.vel, glam::Vec3::ZERO);
    }

    #[test]
    fn test_air_curve_peaks_mid_flight() {
        let (mut ball, plan) = launched(DeliveryType::Spin, 16.0, 3);
        step(&mut ball, &plan, plan.air_time / 2.0);
        let straight = plan.release.lerp(plan.bounce, 0.5);
        assert!((ball.pos.x - straight.x - plan.air_curve).abs() < 1e-4);
    }

    #[test]
    fn test_hand_off_velocity_and_phase() {
        let (mut ball, plan) = launched(DeliveryType::Normal, 16.0, 5);
        step(&mut ball, &plan, plan.air_time + 1.0);
        step(&mut ball, &plan, plan.carry_time + 1.0);

        assert_eq!(ball.phase, FlightPhase::FreeBody);
        let speed = ball.vel.length();
        assert!((speed - 16.0 * HANDOFF_SPEED_FACTOR).abs() < 1e-3);
        // Moving toward the batsman
        assert!(ball.vel.z > 0.0);
        // Hump and drift vanish at alpha = 1: ball is exactly at the target
        assert!((ball.pos - plan.target).length() < 1e-3);
    }

    #[test]
    fn test_spin_drift_accelerates_through_the_carry() {
        let (mut ball, plan) = launched(DeliveryType::Spin, 16.0, 11);
        step(&mut ball, &plan, plan.air_time + 1.0);

        let mut early = ball;
        step(&mut early, &plan, plan.carry_time * 0.25);
        let early_drift = early.pos.x - plan.bounce.lerp(plan.target, 0.25).x;

        let mut late = ball;
        step(&mut late, &plan, plan.carry_time * 0.75);
        let late_drift = late.pos.x - plan.bounce.lerp(plan.target, 0.75).x;

        assert!(late_drift.abs() > early_drift.abs());
        assert_eq!(late_drift.signum(), plan.spin.signum());
    }

    #[test]
    fn test_reset_ball_is_never_moved() {
        let (mut ball, plan) = launched(DeliveryType::Normal, 16.0, 5);
        ball.reset();
        let at_rest = ball.pos;
        step(&mut ball, &plan, 0.5);
        assert_eq!(ball.pos, at_rest);
        assert_eq!(ball.phase, FlightPhase::Rest);
    }

    #[test]
    fn test_small_steps_accumulate_to_the_same_end() {
        let (mut stepped, plan) = launched(DeliveryType::Fast, 20.0, 8);
        let frames = (plan.air_time / SIM_DT).ceil() as usize + 2;
        for _ in 0..frames {
            step(&mut stepped, &plan, SIM_DT);
            if matches!(stepped.phase, FlightPhase::ScriptedGround { .. }) {
                break;
            }
        }
        assert!(matches!(stepped.phase, FlightPhase::ScriptedGround { .. }));
        assert!((stepped.pos - plan.bounce).length() < 1e-3);
    }
}
