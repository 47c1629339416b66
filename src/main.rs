//! Gully Cricket headless demo
//!
//! Bowls an over of six at a scripted swinging bat and logs every effect
//! event. Exercises the whole pipeline - planning, scripted flight,
//! free-body physics, zone/boundary detection, session gating, and the
//! remote feedback packets - without a renderer.
//!
//! Run with `RUST_LOG=info cargo run` (or `debug` for per-delivery detail).

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{Quat, Vec3};

use gully_cricket::consts::*;
use gully_cricket::remote::VibratePacket;
use gully_cricket::session::{DeliverySettings, OverOfSix, Session};
use gully_cricket::sim::{Aabb, BatRig, DeliveryType, EffectEvent};

/// A planted bat at the crease: fixed volumes, oscillating swing
fn demo_bat(time: f32) -> BatRig {
    let swing = (time * 2.5).sin() * 0.6;
    let blade = Aabb::from_center_size(
        Vec3::new(-0.2, 0.55, CREASE_Z - 0.1),
        Vec3::new(0.12, 0.7, 0.25),
    );
    let handle = Aabb::from_center_size(
        Vec3::new(-0.2, 1.05, CREASE_Z - 0.1),
        Vec3::new(0.06, 0.3, 0.1),
    );
    BatRig::new(Quat::from_rotation_z(swing), Some(blade), Some(handle))
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("gully-cricket demo, seed {seed}");

    let mut over = OverOfSix::new();
    over.relaunch_delay = 1.0;
    let mut session = Session::new(
        seed,
        DeliverySettings {
            kind: DeliveryType::Normal,
            speed: 16.0,
        },
        Box::new(over),
    );

    // Cycle the variations through the over
    let order = [
        DeliveryType::Normal,
        DeliveryType::Fast,
        DeliveryType::Bouncer,
        DeliveryType::Yorker,
        DeliveryType::Spin,
        DeliveryType::Fast,
    ];
    let mut next_ball = 0usize;

    session.settings.kind = order[next_ball];
    next_ball += 1;
    session.request_launch();

    let mut clock = 0.0f32;
    // Hard frame cap so a tuning mistake can't spin forever
    for _ in 0..60 * 600 {
        let bat = demo_bat(clock);
        session.tick(Some(&bat), SIM_DT);
        clock += SIM_DT;

        for event in session.state.drain_events() {
            match event {
                EffectEvent::BatStrike { power, speed, shot } => {
                    log::info!("CRACK! {shot:?} shot, {speed:.1} m/s (power {power:.2})");
                    let packet = VibratePacket::new(power, speed, shot);
                    log::info!("  -> remote: {}", packet.to_json());
                }
                EffectEvent::GroundBounce => log::debug!("bounce"),
                EffectEvent::WicketZoneEntered { index } => {
                    log::info!("ball through the wicket area {index}")
                }
                EffectEvent::WicketZoneReverted { .. } => {}
                EffectEvent::AlertZoneEntered => log::info!("into the outfield alert zone"),
                EffectEvent::AlertZoneReverted => {}
                EffectEvent::BoundaryFour => log::info!("FOUR! bounced over the rope"),
                EffectEvent::BoundarySix => log::info!("SIX! cleared it on the full"),
                EffectEvent::DeliveryStopped { reason } => {
                    log::info!(
                        "delivery over ({reason:?}); ball at {:.1?}",
                        session.state.ball.pos
                    );
                    if next_ball < order.len() {
                        session.settings.kind = order[next_ball];
                        next_ball += 1;
                    }
                }
                EffectEvent::Camera(cue) => log::debug!("camera cue: {cue:?}"),
            }
        }

        if session.finished() && !session.in_flight() {
            break;
        }
    }

    log::info!(
        "over complete: {} deliveries bowled",
        session.state.deliveries_bowled
    );
}
