//! Curefire - a top-down survival simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, movement, encounters, match state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, tilemaps, audio, and input plumbing are the host's job. The
//! host feeds `sim::tick` with sampled input and detected contacts each
//! frame, reads entity positions and bolt power back out for drawing, and
//! drains presentation cues.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Coordinates are screen-style: +x right, +y down, so "up" is -y.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second at the fixed timestep
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Ticks between player shots (0.5 s)
    pub const PLAYER_FIRE_COOLDOWN_TICKS: u32 = 30;

    /// Zombie defaults
    pub const ZOMBIE_SPEED: f32 = 120.0;
    /// Within this distance the pull toward the player is full strength
    pub const ZOMBIE_ATTRACTION_RANGE: f32 = 300.0;
    pub const ZOMBIE_RADIUS: f32 = 16.0;
    pub const MAX_ZOMBIES: usize = 10;
    /// Zombies never spawn closer to the player than this
    pub const ZOMBIE_MIN_SPAWN_DISTANCE: f32 = 250.0;
    pub const ZOMBIE_MAX_SPAWN_DISTANCE: f32 = 600.0;

    /// Ally defaults
    pub const ALLY_SPEED: f32 = 160.0;
    /// Allies stop approaching the player inside this distance
    pub const ALLY_FOLLOW_DISTANCE: f32 = 80.0;
    /// Allies closer than this to each other push apart
    pub const ALLY_SEPARATION: f32 = 48.0;
    pub const ALLY_FIRE_RANGE: f32 = 350.0;
    /// Ticks between ally shots (1.5 s)
    pub const ALLY_FIRE_COOLDOWN_TICKS: u32 = 90;
    pub const ALLY_RADIUS: f32 = 16.0;
    pub const MAX_ALLIES: usize = 20;
    /// Speed an ally is shoved at when the player walks into it
    pub const ALLY_BUMP_IMPULSE: f32 = 250.0;
    /// Ticks until a bumped ally's velocity is damped to zero (200 ms)
    pub const ALLY_BUMP_DAMP_TICKS: u64 = 12;

    /// Bolt defaults
    pub const BOLT_SPEED: f32 = 400.0;
    /// Distance over which bolt power decays from 1 to 0
    pub const BOLT_MAX_RANGE: f32 = 400.0;
    pub const BOLT_RADIUS: f32 = 8.0;
    pub const MAX_BOLTS: usize = 10;

    /// Ticks of pre-match countdown (3 s)
    pub const COUNTDOWN_TICKS: u32 = 180;
    /// Delay before the terminal banner is shown after death (1 s)
    pub const TERMINAL_BANNER_DELAY_TICKS: u64 = 60;
}

/// Bearing from one point toward another, in radians.
///
/// Defined as 0 when the points coincide so callers never divide by zero.
#[inline]
pub fn bearing_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta == Vec2::ZERO {
        0.0
    } else {
        delta.y.atan2(delta.x)
    }
}

/// Unit vector for a bearing angle
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// The "straight up" bearing in screen coordinates (-y)
pub const UP_BEARING: f32 = -std::f32::consts::FRAC_PI_2;
