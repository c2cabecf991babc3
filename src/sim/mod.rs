//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed per-tick processing order
//! - No rendering or platform dependencies
//!
//! Contact detection is injected: the host's broadphase (or the bundled
//! `spatial::detect_contacts`) hands `tick` the overlap pairs for the frame.

pub mod bolt;
pub mod encounter;
pub mod movement;
pub mod pool;
pub mod spatial;
pub mod state;
pub mod tick;

pub use bolt::{choose_direction, spawn_bolt};
pub use encounter::resolve_contacts;
pub use pool::{Pool, Slot};
pub use spatial::{Contact, detect_contacts, nearest_active_zombie};
pub use state::{
    Ally, Bolt, Cue, DeferredAction, MatchPhase, Outcome, PendingAction, Player, Shooter, World,
    Zombie,
};
pub use tick::{TickInput, tick};
