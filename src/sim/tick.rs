//! Fixed timestep simulation tick
//!
//! One explicit entry point advances the whole world. Per-tick order is
//! fixed: player movement, firing, bolt advance, zombie then ally steering,
//! integration, contact resolution, deferred actions, match-state
//! evaluation. Contacts come in from the host's broadphase (or
//! `spatial::detect_contacts` for the bundled driver), detected against
//! pre-tick positions.

use glam::Vec2;

use super::bolt;
use super::encounter;
use super::movement;
use super::spatial::{self, Contact};
use super::state::{Cue, DeferredAction, MatchPhase, Outcome, Shooter, World};
use crate::bearing_between;
use crate::consts::COUNTDOWN_TICKS;

/// Input commands for a single tick
///
/// Direction flags are level-triggered (held); `fire`, `start`, and
/// `restart` are edge-triggered and must be cleared by the driver after
/// each processed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire a healing bolt (just-pressed)
    pub fire: bool,
    /// Begin the match from `NotStarted` (just-pressed)
    pub start: bool,
    /// Restart from a terminal state (just-pressed)
    pub restart: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, contacts: &[Contact], dt: f32) {
    world.time_ticks += 1;

    match world.phase {
        MatchPhase::NotStarted => {
            if input.start {
                world.countdown_ticks = COUNTDOWN_TICKS;
                world.phase = MatchPhase::Countdown;
                log::info!("Countdown started");
            }
            return;
        }
        MatchPhase::Countdown => {
            world.countdown_ticks = world.countdown_ticks.saturating_sub(1);
            if world.countdown_ticks == 0 {
                world.phase = MatchPhase::Running;
                world.match_start_tick = world.time_ticks;
                log::info!("Match running");
            }
            return;
        }
        MatchPhase::Won | MatchPhase::Lost => {
            // Terminal: velocities forced to zero, movement/fire ignored,
            // elapsed time already frozen. Deferred banners still fire.
            freeze_all(world);
            encounter::fire_pending(world);
            if input.restart {
                world.reset();
            }
            return;
        }
        MatchPhase::Running => {}
    }

    // -- player movement --
    let player_speed = world.tuning.player.speed;
    if world.player.alive {
        world.player.vel =
            movement::player_velocity(input.up, input.down, input.left, input.right, player_speed);
    }
    world.player.cooldown_ticks = world.player.cooldown_ticks.saturating_sub(1);

    // -- player fire --
    if input.fire && world.player.alive && world.player.cooldown_ticks == 0 {
        let dir = bolt::choose_direction(world.player.pos, world.player.vel, &world.zombies);
        let spawned = bolt::spawn_bolt(
            &mut world.bolts,
            &world.tuning.bolt,
            world.player.pos,
            dir,
            Shooter::Player,
        );
        // Exhausted pool: no bolt, and the trigger isn't consumed
        if spawned.is_some() {
            world.player.cooldown_ticks = world.tuning.player.fire_cooldown_ticks;
        }
    }

    // -- ally fire --
    for (_, ally) in world.allies.iter_active_mut() {
        ally.cooldown_ticks = ally.cooldown_ticks.saturating_sub(1);
    }
    let mut shots: Vec<(usize, Vec2, f32)> = Vec::new();
    for (idx, ally) in world.allies.iter_active() {
        if ally.cooldown_ticks > 0 {
            continue;
        }
        if let Some((zi, dist)) = spatial::nearest_active_zombie(&world.zombies, ally.pos) {
            if dist <= world.tuning.ally.fire_range {
                if let Some(zombie) = world.zombies.get(zi) {
                    shots.push((idx, ally.pos, bearing_between(ally.pos, zombie.pos)));
                }
            }
        }
    }
    for (idx, origin, dir) in shots {
        let spawned = bolt::spawn_bolt(
            &mut world.bolts,
            &world.tuning.bolt,
            origin,
            dir,
            Shooter::Ally(idx),
        );
        if spawned.is_some() {
            let cooldown = world.tuning.ally.fire_cooldown_ticks;
            if let Some(ally) = world.allies.get_mut(idx) {
                ally.cooldown_ticks = cooldown;
            }
        }
    }

    // -- bolt advance & decay --
    bolt::tick_bolts(&mut world.bolts, &world.tuning.bolt, dt);

    // -- zombie steering --
    let player_pos = world.player.pos;
    let zombie_tuning = world.tuning.zombie.clone();
    for (_, zombie) in world.zombies.iter_active_mut() {
        zombie.vel = movement::zombie_velocity(zombie.pos, player_pos, &zombie_tuning);
    }

    // -- ally steering --
    // Allies mid-bump keep their impulse velocity until the damp fires.
    let bumped: Vec<usize> = world
        .pending
        .iter()
        .filter_map(|p| match p.action {
            DeferredAction::DampAlly(idx) => Some(idx),
            _ => None,
        })
        .collect();
    let ally_positions: Vec<(usize, Vec2)> =
        world.allies.iter_active().map(|(i, a)| (i, a.pos)).collect();
    let ally_tuning = world.tuning.ally.clone();
    for (idx, ally) in world.allies.iter_active_mut() {
        if bumped.contains(&idx) {
            continue;
        }
        ally.vel =
            movement::ally_velocity(ally.pos, player_pos, &ally_positions, idx, &ally_tuning);
    }

    // -- integration (walkers; bolts were integrated above) --
    world.player.pos += world.player.vel * dt;
    for (_, zombie) in world.zombies.iter_active_mut() {
        zombie.pos += zombie.vel * dt;
    }
    for (_, ally) in world.allies.iter_active_mut() {
        ally.pos += ally.vel * dt;
    }

    // -- contact resolution & deferred effects --
    encounter::resolve_contacts(world, contacts);
    encounter::fire_pending(world);

    // -- match-state evaluation --
    // Resolution may have entered Lost already; the phase check doubles as
    // the trigger-exactly-once guard for the win banner.
    if world.phase == MatchPhase::Running && world.zombies.active_count() == 0 {
        world.frozen_elapsed_ticks = Some(world.elapsed_ticks());
        world.phase = MatchPhase::Won;
        world.push_cue(Cue::TerminalBanner(Outcome::Won));
        log::info!("All zombies converted in {}", world.elapsed_mmss());
    }
}

fn freeze_all(world: &mut World) {
    world.player.vel = Vec2::ZERO;
    for (_, zombie) in world.zombies.iter_active_mut() {
        zombie.vel = Vec2::ZERO;
    }
    for (_, ally) in world.allies.iter_active_mut() {
        ally.vel = Vec2::ZERO;
    }
    for (_, bolt) in world.bolts.iter_active_mut() {
        bolt.vel = Vec2::ZERO;
    }
}
