//! Match state and core simulation types
//!
//! One explicit `World` aggregate owns every entity pool, the match phase,
//! pending deferred actions, and the tick clock. No globals: every component
//! function takes the world (or a piece of it) as an argument.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use crate::consts::TICKS_PER_SECOND;
use crate::tuning::Tuning;

/// Match state machine
///
/// `Won` and `Lost` are terminal; only an explicit restart command returns
/// play to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the start command
    NotStarted,
    /// Pre-match countdown, entities frozen
    Countdown,
    /// Active play
    Running,
    /// All zombies converted or destroyed
    Won,
    /// Player was caught
    Lost,
}

/// Match outcome carried by the terminal banner cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Who fired a bolt (drives direction defaults)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Ally(usize),
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cleared exactly once per match by a zombie overlap
    pub alive: bool,
    /// Ticks until the next shot is allowed
    pub cooldown_ticks: u32,
}

impl Player {
    fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            alive: true,
            cooldown_ticks: 0,
        }
    }
}

/// A zombie, pulled toward the player every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Default for Zombie {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        }
    }
}

/// An ally: guards the player and fires bolts at nearby zombies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ally {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks until the next shot is allowed
    pub cooldown_ticks: u32,
}

impl Default for Ally {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            cooldown_ticks: 0,
        }
    }
}

/// A healing bolt in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bolt {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Spawn position, for distance-traveled tracking
    pub origin: Vec2,
    /// Remaining conversion potency in [0, 1]; also drives visual fade.
    /// Monotonically non-increasing; reaching 0 retires the bolt.
    pub power: f32,
    pub shooter: Shooter,
}

impl Default for Bolt {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            origin: Vec2::ZERO,
            power: 0.0,
            shooter: Shooter::Player,
        }
    }
}

/// Presentation requests the host drains each frame
///
/// The core never renders or plays audio; it only asks.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Play the death sound
    DeathTone,
    /// Show the end-of-match banner
    TerminalBanner(Outcome),
    /// Flash at a zombie-to-ally conversion
    ConversionFlash { pos: Vec2 },
    /// Flash where an ally and zombie destroyed each other
    DisintegrationFlash { pos: Vec2 },
    /// Soft thud when the player bumps an ally
    BumpThud,
}

/// A one-shot effect scheduled for a future tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Damp a bumped ally's velocity to zero; no-op if the slot was retired
    DampAlly(usize),
    /// Reveal the terminal banner after the transition-out delay
    TerminalBanner(Outcome),
}

/// Deferred action keyed by an absolute trigger tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAction {
    pub fire_at_tick: u64,
    pub action: DeferredAction,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Restart counter, folded into the seed so each match is reproducible
    pub restarts: u32,
    pub tuning: Tuning,
    pub phase: MatchPhase,
    /// Simulation tick counter (never resets, deferred actions key off it)
    pub time_ticks: u64,
    /// Ticks remaining in the pre-match countdown
    pub countdown_ticks: u32,
    /// Tick at which the current match entered `Running`
    pub match_start_tick: u64,
    /// Elapsed ticks captured at the moment a terminal state was entered
    pub frozen_elapsed_ticks: Option<u64>,
    pub player: Player,
    pub zombies: Pool<Zombie>,
    pub allies: Pool<Ally>,
    pub bolts: Pool<Bolt>,
    pub pending: Vec<PendingAction>,
    /// Presentation requests, drained by the host (not simulation state)
    #[serde(skip)]
    pub cues: Vec<Cue>,
}

impl World {
    /// Create a world and seed the first match
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self {
            seed,
            restarts: 0,
            phase: MatchPhase::NotStarted,
            time_ticks: 0,
            countdown_ticks: 0,
            match_start_tick: 0,
            frozen_elapsed_ticks: None,
            player: Player::new(),
            zombies: Pool::new(tuning.zombie.max_count, Zombie::default()),
            allies: Pool::new(tuning.ally.max_count, Ally::default()),
            bolts: Pool::new(tuning.bolt.max_count, Bolt::default()),
            pending: Vec::new(),
            cues: Vec::new(),
            tuning,
        };
        world.populate();
        world
    }

    /// Full match reset: reseed pools, clear timers, back to `NotStarted`
    pub fn reset(&mut self) {
        self.restarts += 1;
        self.phase = MatchPhase::NotStarted;
        self.countdown_ticks = 0;
        self.frozen_elapsed_ticks = None;
        self.player = Player::new();
        self.zombies.clear();
        self.allies.clear();
        self.bolts.clear();
        self.pending.clear();
        self.populate();
        log::info!("Match reset (restart #{})", self.restarts);
    }

    /// Place the initial zombie wave around the player
    fn populate(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.restarts as u64));
        let min_d = self.tuning.zombie.min_spawn_distance;
        let max_d = self.tuning.zombie.max_spawn_distance;
        let count = self.tuning.zombie.max_count;

        for _ in 0..count {
            let Some(idx) = self.zombies.acquire() else {
                break;
            };
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            let dist = rng.random_range(min_d..max_d);
            let pos = self.player.pos + crate::unit_from_angle(theta) * dist;
            if let Some(zombie) = self.zombies.get_mut(idx) {
                zombie.pos = pos;
                zombie.vel = Vec2::ZERO;
            }
        }
        log::info!("Spawned {} zombies", self.zombies.active_count());
    }

    /// Schedule a deferred one-shot effect
    pub fn schedule(&mut self, delay_ticks: u64, action: DeferredAction) {
        self.pending.push(PendingAction {
            fire_at_tick: self.time_ticks + delay_ticks,
            action,
        });
    }

    /// Elapsed match time in ticks, frozen at terminal-state entry
    pub fn elapsed_ticks(&self) -> u64 {
        if let Some(frozen) = self.frozen_elapsed_ticks {
            return frozen;
        }
        match self.phase {
            MatchPhase::Running => self.time_ticks - self.match_start_tick,
            _ => 0,
        }
    }

    /// Elapsed match time formatted as minutes:seconds
    pub fn elapsed_mmss(&self) -> String {
        let secs = self.elapsed_ticks() / TICKS_PER_SECOND;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// HUD readout for the presentation host
    pub fn hud_line(&self) -> String {
        format!(
            "TIME {}  ZOMBIES {}  ALLIES {}",
            self.elapsed_mmss(),
            self.zombies.active_count(),
            self.allies.active_count()
        )
    }

    pub fn push_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
