//! Deterministic simulation module
//!
//! All delivery logic lives here. This module must be pure and deterministic:
//! - Host-driven frame stepping only (no internal timers or threads)
//! - Seeded RNG only (one stream per delivery)
//! - No rendering, audio, or transport dependencies
//!
//! A delivery flows through three owners: the planner produces an immutable
//! `DeliveryPlan`, the scripted stepper drives the ball along the planned
//! curves, and the free-body stepper integrates it to a terminal condition.
//! Side effects surface as `EffectEvent`s drained by the host each frame.

pub mod bat;
pub mod events;
pub mod physics;
pub mod plan;
pub mod profile;
pub mod scripted;
pub mod state;
pub mod tick;
pub mod zones;

pub use bat::{BatRig, StrikeRecord, reflect_velocity};
pub use events::{CameraCue, EffectEvent, ShotType, StopReason};
pub use plan::DeliveryPlan;
pub use profile::{DeliveryProfile, DeliveryType};
pub use state::{BallState, FlightPhase, MatchState, RngState};
pub use tick::tick;
pub use zones::{Aabb, BoundaryEllipse, FieldZones};
