//! Free-body physics stepper
//!
//! Owns the ball from the scripted hand-off until a terminal condition.
//! Each frame integrates velocity under gravity plus drag (airborne) or
//! friction (grounded), then runs the collision checks in a fixed priority
//! order: bat, ground, wicket zones, alert zone, physical wall, scoring
//! boundary, rest. The wall check is terminal and skips the rest of the
//! frame, so no two mutually exclusive terminal conditions can fire
//! together. The bat check is latched: one strike per delivery, ever.

use glam::{Vec2, Vec3};

use super::bat::{BatRig, StrikeRecord, strike_response};
use super::events::{EffectEvent, ShotType, StopReason};
use super::state::{FlightPhase, MatchState};
use crate::consts::*;

/// Ground response tuning keyed by the recorded strike launch angle.
/// The low-angle bucket models a skidding shot: more friction, steeper
/// gravity. Heuristic buckets, not derived physics.
#[derive(Debug, Clone, Copy)]
struct SkidTuning {
    gravity: f32,
    friction: f32,
}

const SKID_BUCKETS: [(f32, SkidTuning); 2] = [
    (
        0.2,
        SkidTuning {
            gravity: -11.5,
            friction: 0.82,
        },
    ),
    (
        f32::INFINITY,
        SkidTuning {
            gravity: GRAVITY_Y,
            friction: GROUND_FRICTION,
        },
    ),
];

impl SkidTuning {
    fn for_angle(angle: f32) -> SkidTuning {
        for (upper, tuning) in SKID_BUCKETS {
            if angle < upper {
                return tuning;
            }
        }
        SKID_BUCKETS[SKID_BUCKETS.len() - 1].1
    }
}

/// Advance one free-body frame. `dt` is already clamped by the caller.
pub(crate) fn step(state: &mut MatchState, bat: Option<&BatRig>, dt: f32) {
    let MatchState {
        ball,
        zones,
        highlights,
        events,
        ..
    } = state;

    // Cooperative cancellation: a ball reset out from under us is inert
    if ball.phase != FlightPhase::FreeBody {
        return;
    }

    // --- Integration ---
    ball.vel.y += ball.gravity * dt;
    if ball.pos.y > ball.radius + GROUND_CLEARANCE {
        // In the air: isotropic drag
        ball.vel *= 1.0 - AIR_DRAG * dt;
    } else {
        // On the ground: friction on the horizontal components only
        ball.vel.x *= GROUND_FRICTION;
        ball.vel.z *= GROUND_FRICTION;
    }
    ball.pos += ball.vel * dt;

    // --- Bat check (latched: at most one strike per delivery) ---
    if ball.strike.is_none() {
        if let Some(rig) = bat {
            if rig
                .surface_within(ball.pos, ball.radius * BAT_HIT_RANGE)
                .is_some()
            {
                ball.vel = strike_response(ball.vel, rig);
                let record = StrikeRecord::from_velocity(ball.vel);
                // A strike restarts the four-vs-six bookkeeping
                ball.has_bounced = false;
                ball.has_crossed_boundary = false;
                ball.strike = Some(record);

                let power = (record.speed / FULL_POWER_SPEED).min(1.0);
                events.push(EffectEvent::BatStrike {
                    power,
                    speed: record.speed,
                    shot: ShotType::classify(power),
                });
                highlights.arm_camera_cue();
                log::debug!(
                    "bat strike: {:.1} m/s at {:.2} rad",
                    record.speed,
                    record.angle
                );
            }
        }
    }

    // --- Ground check ---
    if ball.pos.y < ball.radius {
        ball.pos.y = ball.radius;
        let impact_vy = ball.vel.y;
        match ball.strike {
            Some(record) => {
                let tuning = SkidTuning::for_angle(record.angle);
                ball.vel.y *= STRUCK_RESTITUTION;
                ball.vel.x *= tuning.friction;
                ball.vel.z *= tuning.friction;
                ball.gravity = tuning.gravity;
                ball.has_bounced = true;
            }
            None => {
                ball.vel.y *= UNSTRUCK_RESTITUTION;
                ball.vel.x *= UNSTRUCK_BOUNCE_DAMP;
                ball.vel.z *= UNSTRUCK_BOUNCE_DAMP;
            }
        }
        // Kill micro-bounces
        if ball.vel.y.abs() < BOUNCE_KILL_VY {
            ball.vel.y = 0.0;
        }
        if impact_vy < -BOUNCE_KILL_VY {
            events.push(EffectEvent::GroundBounce);
        }
    }

    // --- Wicket zones (highlight only) ---
    if let Some(index) = zones.wicket_area_at(ball.pos) {
        if highlights.trigger_wicket(index, events) {
            events.push(EffectEvent::WicketZoneEntered { index });
        }
    }

    // --- Alert zone ---
    if zones.alert_contains(ball.pos) && highlights.trigger_alert() {
        events.push(EffectEvent::AlertZoneEntered);
    }

    // --- Physical wall: terminal, skips the rest of this frame ---
    if zones.wall.normalized_radius_sq(ball.pos.x, ball.pos.z) >= 1.0 {
        ball.vel = Vec3::ZERO;
        ball.gravity = 0.0;
        ball.phase = FlightPhase::Rest;
        events.push(EffectEvent::DeliveryStopped {
            reason: StopReason::BoundaryWall,
        });
        highlights.arm_camera_restore();
        log::debug!("delivery over: hit the boundary wall");
        return;
    }

    // --- Scoring boundary: inside->outside transition, struck balls only ---
    if ball.strike.is_some() && !ball.has_crossed_boundary {
        let was_inside = zones.scoring.contains_xz(ball.prev_xz.x, ball.prev_xz.y);
        let now_outside = !zones.scoring.contains(ball.pos);
        if was_inside && now_outside {
            ball.has_crossed_boundary = true;
            events.push(if ball.has_bounced {
                EffectEvent::BoundaryFour
            } else {
                EffectEvent::BoundarySix
            });
        }
    }
    ball.prev_xz = Vec2::new(ball.pos.x, ball.pos.z);

    // --- Rest check ---
    if ball.pos.y < ball.radius + GROUND_CLEARANCE
        && ball.vel.y.abs() < REST_EPSILON
        && crate::planar_speed(ball.vel) < REST_EPSILON
    {
        ball.phase = FlightPhase::Rest;
        events.push(EffectEvent::DeliveryStopped {
            reason: StopReason::AtRest,
        });
        highlights.arm_camera_restore();
        log::debug!("delivery over: ball at rest at {:?}", ball.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bat::BatRig;
    use crate::sim::zones::Aabb;
    use glam::Quat;

    fn free_ball(pos: Vec3, vel: Vec3) -> MatchState {
        let mut state = MatchState::new(0);
        state.ball.pos = pos;
        state.ball.vel = vel;
        state.ball.prev_xz = Vec2::new(pos.x, pos.z);
        state.ball.phase = FlightPhase::FreeBody;
        state
    }

    fn rig_at(pos: Vec3) -> BatRig {
        BatRig::new(
            Quat::IDENTITY,
            Some(Aabb::from_center_size(pos, Vec3::splat(0.5))),
            None,
        )
    }

    #[test]
    fn test_ground_clamp_never_tunnels() {
        let mut state = free_ball(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, -8.0, 0.0));
        for _ in 0..200 {
            step(&mut state, None, SIM_DT);
            assert!(state.ball.pos.y >= BALL_RADIUS - 1e-6);
            if !state.ball.in_flight() {
                break;
            }
        }
    }

    #[test]
    fn test_bat_strike_lifts_and_latches() {
        let pos = Vec3::new(0.0, 0.6, 10.3);
        let mut state = free_ball(pos, Vec3::new(0.0, -2.0, -10.0));
        let rig = rig_at(pos);

        step(&mut state, Some(&rig), SIM_DT);
        assert!(state.ball.has_been_struck());
        assert!(state.ball.vel.y > 0.0);

        let vel_after_strike = state.ball.vel;
        let events = state.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EffectEvent::BatStrike { .. }))
        );

        // Still in range next frame, but the strike never re-fires
        state.ball.pos = pos;
        step(&mut state, Some(&rig), SIM_DT);
        let events = state.drain_events();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, EffectEvent::BatStrike { .. }))
        );
        // Velocity only changed by integration, not another reflection
        assert!((state.ball.vel - vel_after_strike).length() < 1.0);
    }

    #[test]
    fn test_missing_bat_volumes_skip_gracefully() {
        let pos = Vec3::new(0.0, 0.6, 10.3);
        let mut state = free_ball(pos, Vec3::new(0.0, -2.0, -10.0));
        let rig = BatRig::new(Quat::IDENTITY, None, None);
        step(&mut state, Some(&rig), SIM_DT);
        assert!(!state.ball.has_been_struck());
    }

    #[test]
    fn test_wall_breach_stops_the_delivery() {
        let mut state = free_ball(Vec3::new(80.0, 0.5, 0.0), Vec3::new(20.0, 0.0, 0.0));
        step(&mut state, None, SIM_DT);

        assert!(!state.ball.in_flight());
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(state.ball.gravity, 0.0);
        let stops: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EffectEvent::DeliveryStopped { .. }))
            .collect();
        assert_eq!(
            stops,
            vec![EffectEvent::DeliveryStopped {
                reason: StopReason::BoundaryWall
            }]
        );

        // A stopped ball is inert; further wall frames emit nothing
        step(&mut state, None, SIM_DT);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_scoring_crossing_four_after_bounce() {
        let mut state = free_ball(Vec3::new(62.0, BALL_RADIUS, 0.0), Vec3::new(30.0, 0.0, 0.0));
        state.ball.strike = Some(StrikeRecord {
            speed: 20.0,
            angle: 0.5,
        });
        state.ball.has_bounced = true;

        let mut crossed = Vec::new();
        for _ in 0..30 {
            step(&mut state, None, SIM_DT);
            crossed.extend(state.drain_events());
            if state.ball.has_crossed_boundary {
                break;
            }
        }
        assert!(crossed.contains(&EffectEvent::BoundaryFour));
        assert!(!crossed.contains(&EffectEvent::BoundarySix));
    }

    #[test]
    fn test_scoring_crossing_six_on_the_full() {
        let mut state = free_ball(Vec3::new(62.0, 8.0, 0.0), Vec3::new(30.0, 2.0, 0.0));
        state.ball.strike = Some(StrikeRecord {
            speed: 30.0,
            angle: 0.6,
        });

        let mut seen = Vec::new();
        for _ in 0..30 {
            step(&mut state, None, SIM_DT);
            seen.extend(state.drain_events());
            if state.ball.has_crossed_boundary {
                break;
            }
        }
        assert!(seen.contains(&EffectEvent::BoundarySix));
    }

    #[test]
    fn test_unstruck_ball_never_scores() {
        let mut state = free_ball(Vec3::new(62.0, 5.0, 0.0), Vec3::new(30.0, 0.0, 0.0));
        let mut seen = Vec::new();
        for _ in 0..60 {
            step(&mut state, None, SIM_DT);
            seen.extend(state.drain_events());
            if !state.ball.in_flight() {
                break;
            }
        }
        assert!(!seen.contains(&EffectEvent::BoundaryFour));
        assert!(!seen.contains(&EffectEvent::BoundarySix));
    }

    #[test]
    fn test_comes_to_rest_on_the_ground() {
        let mut state = free_ball(
            Vec3::new(0.0, BALL_RADIUS + 0.001, 5.0),
            Vec3::new(0.5, 0.0, 1.5),
        );
        let mut stopped = 0;
        for _ in 0..600 {
            step(&mut state, None, SIM_DT);
            stopped += state
                .drain_events()
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        EffectEvent::DeliveryStopped {
                            reason: StopReason::AtRest
                        }
                    )
                })
                .count();
            if !state.ball.in_flight() {
                break;
            }
        }
        assert!(!state.ball.in_flight());
        assert_eq!(stopped, 1);
        assert_eq!(state.ball.pos.y, BALL_RADIUS);
        assert!(crate::planar_speed(state.ball.vel) < REST_EPSILON);
    }

    #[test]
    fn test_skid_bucket_steepens_gravity() {
        // Low launch angle: skid tuning after the first bounce
        let mut state = free_ball(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, -3.0, 8.0));
        state.ball.strike = Some(StrikeRecord {
            speed: 10.0,
            angle: 0.1,
        });
        for _ in 0..30 {
            step(&mut state, None, SIM_DT);
            if state.ball.has_bounced {
                break;
            }
        }
        assert!(state.ball.has_bounced);
        assert_eq!(state.ball.gravity, -11.5);

        // Steep angle keeps baseline gravity
        let mut state = free_ball(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, -3.0, 8.0));
        state.ball.strike = Some(StrikeRecord {
            speed: 10.0,
            angle: 0.8,
        });
        for _ in 0..30 {
            step(&mut state, None, SIM_DT);
            if state.ball.has_bounced {
                break;
            }
        }
        assert_eq!(state.ball.gravity, GRAVITY_Y);
    }

    #[test]
    fn test_wicket_zone_highlight_fires_once_per_visit() {
        let inside = Vec3::new(0.0, 0.3, PITCH_HALF_LENGTH);
        let mut state = free_ball(inside, Vec3::ZERO);
        state.ball.gravity = 0.0;

        step(&mut state, None, SIM_DT);
        let events = state.drain_events();
        assert!(events.contains(&EffectEvent::WicketZoneEntered { index: 1 }));

        // Lingering in the zone does not restack the highlight
        state.ball.pos = inside;
        state.ball.vel = Vec3::ZERO;
        state.ball.phase = FlightPhase::FreeBody;
        step(&mut state, None, SIM_DT);
        let events = state.drain_events();
        assert!(!events.contains(&EffectEvent::WicketZoneEntered { index: 1 }));
    }

    #[test]
    fn test_alert_zone_highlight() {
        let mut state = free_ball(Vec3::new(0.0, 0.2, 20.0), Vec3::new(0.0, 0.0, 2.0));
        step(&mut state, None, SIM_DT);
        let events = state.drain_events();
        assert!(events.contains(&EffectEvent::AlertZoneEntered));
    }
}
