//! Delivery sequencing and launch gating
//!
//! One `LaunchPolicy` object decides when a new delivery may start and what
//! happens after one ends; the `Session` wires a policy to the match state
//! and runs the relaunch/turn timers. This replaces the source material's
//! habit of overriding the launch function once per game mode.

use serde::{Deserialize, Serialize};

use crate::sim::{BatRig, DeliveryType, MatchState, tick};

/// What the policy wants after a delivery finishes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Followup {
    /// Wait for an external launch request
    None,
    /// Launch the next ball automatically after a delay (seconds)
    RelaunchAfter(f32),
    /// The sequence is complete; no further launches
    Finished,
}

/// Gate consulted before planning a delivery.
///
/// Implementations are single-mode session brains: they see every launch
/// and every completed delivery, and never touch the ball directly.
pub trait LaunchPolicy {
    /// May a new delivery start right now?
    fn can_launch(&self) -> bool;
    /// A delivery was just launched
    fn on_launch(&mut self) {}
    /// The ball just came to rest / left the field
    fn on_delivery_complete(&mut self) -> Followup {
        Followup::None
    }
    /// All allotted deliveries bowled
    fn finished(&self) -> bool {
        false
    }
}

/// Single-play mode: bowl whenever the previous ball is done
#[derive(Debug, Clone, Copy, Default)]
pub struct FreePlay;

impl LaunchPolicy for FreePlay {
    fn can_launch(&self) -> bool {
        true
    }
}

/// Over mode: six balls, one in play at a time, next ball bowled
/// automatically a beat after the previous one ends.
#[derive(Debug, Clone, Copy)]
pub struct OverOfSix {
    balls_left: u32,
    in_play: bool,
    /// Delay before the automatic next ball (seconds)
    pub relaunch_delay: f32,
}

impl OverOfSix {
    pub fn new() -> Self {
        Self {
            balls_left: 6,
            in_play: false,
            relaunch_delay: 10.0,
        }
    }

    pub fn balls_left(&self) -> u32 {
        self.balls_left
    }
}

impl Default for OverOfSix {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchPolicy for OverOfSix {
    fn can_launch(&self) -> bool {
        self.balls_left > 0 && !self.in_play
    }

    fn on_launch(&mut self) {
        self.balls_left -= 1;
        self.in_play = true;
    }

    fn on_delivery_complete(&mut self) -> Followup {
        self.in_play = false;
        if self.balls_left > 0 {
            Followup::RelaunchAfter(self.relaunch_delay)
        } else {
            Followup::Finished
        }
    }

    fn finished(&self) -> bool {
        self.balls_left == 0 && !self.in_play
    }
}

/// Multiplayer turn rotation: each player faces the same allotment of
/// balls; turn hand-offs get a longer countdown than in-turn relaunches.
#[derive(Debug, Clone)]
pub struct TurnRotation {
    players: u32,
    balls_per_player: u32,
    current_player: u32,
    balls_this_turn: u32,
    in_play: bool,
    /// Delay between balls within a turn
    pub ball_delay: f32,
    /// Countdown before the next player's first ball
    pub turn_delay: f32,
}

impl TurnRotation {
    pub fn new(players: u32, balls_per_player: u32) -> Self {
        Self {
            players: players.max(1),
            balls_per_player: balls_per_player.max(1),
            current_player: 0,
            balls_this_turn: 0,
            in_play: false,
            ball_delay: 3.0,
            turn_delay: 5.0,
        }
    }

    pub fn current_player(&self) -> u32 {
        self.current_player
    }
}

impl LaunchPolicy for TurnRotation {
    fn can_launch(&self) -> bool {
        self.current_player < self.players && !self.in_play
    }

    fn on_launch(&mut self) {
        self.in_play = true;
        self.balls_this_turn += 1;
    }

    fn on_delivery_complete(&mut self) -> Followup {
        self.in_play = false;
        if self.balls_this_turn < self.balls_per_player {
            return Followup::RelaunchAfter(self.ball_delay);
        }
        // Turn over: rotate to the next player
        self.current_player += 1;
        self.balls_this_turn = 0;
        if self.current_player < self.players {
            log::info!("turn hand-off to player {}", self.current_player + 1);
            Followup::RelaunchAfter(self.turn_delay)
        } else {
            Followup::Finished
        }
    }

    fn finished(&self) -> bool {
        self.current_player >= self.players
    }
}

/// Delivery type and speed used for launches in this session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeliverySettings {
    pub kind: DeliveryType,
    pub speed: f32,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            kind: DeliveryType::Normal,
            speed: 16.0,
        }
    }
}

/// A match state plus the policy that sequences its deliveries
pub struct Session {
    pub state: MatchState,
    pub settings: DeliverySettings,
    policy: Box<dyn LaunchPolicy>,
    pending_relaunch: Option<f32>,
    was_in_flight: bool,
}

impl Session {
    pub fn new(seed: u64, settings: DeliverySettings, policy: Box<dyn LaunchPolicy>) -> Self {
        Self {
            state: MatchState::new(seed),
            settings,
            policy,
            pending_relaunch: None,
            was_in_flight: false,
        }
    }

    /// Ask the gate, then launch. Returns true if a delivery started.
    pub fn request_launch(&mut self) -> bool {
        if !self.policy.can_launch() {
            return false;
        }
        if self.state.launch(self.settings.kind, self.settings.speed) {
            self.policy.on_launch();
            self.pending_relaunch = None;
            true
        } else {
            false
        }
    }

    /// Advance one frame: simulation, completion edge, relaunch timer.
    pub fn tick(&mut self, bat: Option<&BatRig>, dt: f32) {
        tick(&mut self.state, bat, dt);

        let in_flight = self.state.ball.in_flight();
        if self.was_in_flight && !in_flight {
            match self.policy.on_delivery_complete() {
                Followup::RelaunchAfter(delay) => self.pending_relaunch = Some(delay),
                Followup::Finished => log::info!("session complete"),
                Followup::None => {}
            }
        }
        self.was_in_flight = in_flight;

        if let Some(remaining) = &mut self.pending_relaunch {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.pending_relaunch = None;
                self.request_launch();
            }
        }
    }

    pub fn finished(&self) -> bool {
        self.policy.finished()
    }

    pub fn in_flight(&self) -> bool {
        self.state.ball.in_flight()
    }

    /// A relaunch countdown is running
    pub fn relaunch_pending(&self) -> bool {
        self.pending_relaunch.is_some()
    }
}
