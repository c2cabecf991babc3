//! Encounter resolution
//!
//! Reacts to contacts the broadphase detected; detection itself lives with
//! the host (or `spatial::detect_contacts` in the bundled driver). The
//! broadphase may report several overlaps for the same entity in one tick,
//! and detection happened before any reaction ran, so every reaction
//! re-checks the `active` flag immediately before mutating.
//!
//! Contacts are processed in a fixed priority order regardless of how the
//! host ordered them: conversions first, then disintegrations, then the
//! lethal player overlap, then cosmetic bumps. A zombie converted earlier
//! in the pass can therefore never kill the player later in the same tick.

use super::bolt;
use super::spatial::Contact;
use super::state::{Cue, DeferredAction, MatchPhase, Outcome, World};
use crate::consts::{ALLY_BUMP_DAMP_TICKS, TERMINAL_BANNER_DELAY_TICKS};
use crate::{bearing_between, unit_from_angle};

fn priority(contact: &Contact) -> u8 {
    match contact {
        Contact::BoltZombie { .. } => 0,
        Contact::AllyZombie { .. } => 1,
        Contact::PlayerZombie { .. } => 2,
        Contact::PlayerAlly { .. } => 3,
    }
}

/// Resolve one tick's worth of contacts in a single ordered pass
pub fn resolve_contacts(world: &mut World, contacts: &[Contact]) {
    let mut ordered: Vec<Contact> = contacts.to_vec();
    ordered.sort_by_key(priority);

    for contact in ordered {
        match contact {
            Contact::BoltZombie { bolt, zombie } => convert_zombie(world, bolt, zombie),
            Contact::AllyZombie { ally, zombie } => disintegrate(world, ally, zombie),
            Contact::PlayerZombie { zombie } => kill_player(world, zombie),
            Contact::PlayerAlly { ally } => bump_ally(world, ally),
        }
    }
}

/// Bolt hit a zombie: the zombie becomes an ally
///
/// Requires positive bolt power (a zero-power bolt is already retired, so
/// any live overlap qualifies). Converting an already-retired zombie or
/// spending an already-retired bolt is a silent no-op. If the ally pool is
/// full the zombie still converts; the ally just fails to appear.
fn convert_zombie(world: &mut World, bolt_idx: usize, zombie_idx: usize) {
    if !world.bolts.is_active(bolt_idx) || !world.zombies.is_active(zombie_idx) {
        return;
    }
    let Some(bolt) = world.bolts.get(bolt_idx) else {
        return;
    };
    if bolt.power <= 0.0 {
        return;
    }

    let Some(pos) = world.zombies.get(zombie_idx).map(|z| z.pos) else {
        return;
    };
    world.zombies.release(zombie_idx);
    bolt::retire(&mut world.bolts, bolt_idx);

    if let Some(ally_idx) = world.allies.acquire() {
        let cooldown = world.tuning.ally.fire_cooldown_ticks;
        if let Some(ally) = world.allies.get_mut(ally_idx) {
            ally.pos = pos;
            ally.vel = glam::Vec2::ZERO;
            ally.cooldown_ticks = cooldown;
        }
    } else {
        log::debug!("Ally pool exhausted, conversion produced no ally");
    }

    world.push_cue(Cue::ConversionFlash { pos });
    log::info!(
        "Zombie converted, {} remaining",
        world.zombies.active_count()
    );
}

/// Ally and zombie destroy each other
///
/// No conversion happens here; both slots go back to their pools and the
/// host gets a transient flash to draw.
fn disintegrate(world: &mut World, ally_idx: usize, zombie_idx: usize) {
    if !world.allies.is_active(ally_idx) || !world.zombies.is_active(zombie_idx) {
        return;
    }
    let ally_pos = world.allies.get(ally_idx).map(|a| a.pos);
    let zombie_pos = world.zombies.get(zombie_idx).map(|z| z.pos);

    world.allies.release(ally_idx);
    world.zombies.release(zombie_idx);

    if let (Some(a), Some(z)) = (ally_pos, zombie_pos) {
        world.push_cue(Cue::DisintegrationFlash { pos: (a + z) / 2.0 });
    }
}

/// Zombie caught the player: terminal for this match instance
///
/// Idempotent - once the player is dead or the match has left `Running`,
/// further overlaps are no-ops. Freezes the player and every zombie,
/// plays the death cue now, and schedules the terminal banner after the
/// transition-out delay.
fn kill_player(world: &mut World, zombie_idx: usize) {
    if !world.player.alive || world.phase != MatchPhase::Running {
        return;
    }
    if !world.zombies.is_active(zombie_idx) {
        return;
    }

    world.player.alive = false;
    world.player.vel = glam::Vec2::ZERO;
    for (_, zombie) in world.zombies.iter_active_mut() {
        zombie.vel = glam::Vec2::ZERO;
    }

    world.frozen_elapsed_ticks = Some(world.elapsed_ticks());
    world.phase = MatchPhase::Lost;
    world.push_cue(Cue::DeathTone);
    world.schedule(
        TERMINAL_BANNER_DELAY_TICKS,
        DeferredAction::TerminalBanner(Outcome::Lost),
    );
    log::info!("Player caught at {}", world.elapsed_mmss());
}

/// Player walked into an ally: shove it away, never lethal
///
/// The ally gets a fixed impulse along the player-to-ally bearing and a
/// deferred damp back to zero; the player's velocity is untouched.
fn bump_ally(world: &mut World, ally_idx: usize) {
    if world.phase != MatchPhase::Running {
        return;
    }
    let player_pos = world.player.pos;
    let impulse = world.tuning.ally.bump_impulse;
    let Some(ally) = world.allies.get_mut(ally_idx) else {
        return;
    };

    let theta = bearing_between(player_pos, ally.pos);
    ally.vel = unit_from_angle(theta) * impulse;

    world.schedule(ALLY_BUMP_DAMP_TICKS, DeferredAction::DampAlly(ally_idx));
    world.push_cue(Cue::BumpThud);
}

/// Fire any deferred actions whose trigger tick has arrived
///
/// Actions whose target entity was retired in the meantime are dropped
/// without effect.
pub fn fire_pending(world: &mut World) {
    let now = world.time_ticks;
    let due: Vec<DeferredAction> = {
        let mut due = Vec::new();
        world.pending.retain(|p| {
            if p.fire_at_tick <= now {
                due.push(p.action.clone());
                false
            } else {
                true
            }
        });
        due
    };

    for action in due {
        match action {
            DeferredAction::DampAlly(idx) => {
                if let Some(ally) = world.allies.get_mut(idx) {
                    ally.vel = glam::Vec2::ZERO;
                }
            }
            DeferredAction::TerminalBanner(outcome) => {
                world.push_cue(Cue::TerminalBanner(outcome));
            }
        }
    }
}
