//! Headless demo driver
//!
//! Runs a scripted match end to end: a simple bot kites away from the
//! nearest zombie and fires on cooldown until the match resolves. Useful
//! for exercising the full tick pipeline and for eyeballing balance from
//! the log output.
//!
//! Usage: `curefire [seed]` (defaults to seed 42).

use glam::Vec2;

use curefire::consts::{SIM_DT, TICKS_PER_SECOND};
use curefire::sim::{Cue, MatchPhase, TickInput, World, detect_contacts, tick};
use curefire::tuning::Tuning;

/// Safety cap so a stalemate match still terminates (5 minutes)
const MAX_TICKS: u64 = 300 * TICKS_PER_SECOND;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let tuning = Tuning::load_or_default("tuning.json");
    let mut world = World::new(seed, tuning);
    log::info!("Starting demo match with seed {seed}");

    let mut input = TickInput {
        start: true,
        ..TickInput::default()
    };

    while world.time_ticks < MAX_TICKS {
        steer_bot(&world, &mut input);

        let contacts = detect_contacts(&world);
        tick(&mut world, &input, &contacts, SIM_DT);

        // One-shot commands are consumed by the tick they were sampled for
        input.start = false;
        input.restart = false;

        report_cues(&mut world);
        if world.time_ticks % TICKS_PER_SECOND == 0 {
            log::debug!("{}", world.hud_line());
        }

        if matches!(world.phase, MatchPhase::Won | MatchPhase::Lost) {
            // Let deferred effects (banner reveal) play out before exiting
            let drain_until = world.time_ticks + 2 * TICKS_PER_SECOND;
            while world.time_ticks < drain_until {
                let contacts = detect_contacts(&world);
                tick(&mut world, &input, &contacts, SIM_DT);
                report_cues(&mut world);
            }
            break;
        }
    }

    log::info!(
        "Demo finished: {:?} after {} ({} zombies left, {} allies)",
        world.phase,
        world.elapsed_mmss(),
        world.zombies.active_count(),
        world.allies.active_count()
    );
    println!("{}", world.hud_line());
}

/// Kite away from the nearest zombie while firing on cooldown
fn steer_bot(world: &World, input: &mut TickInput) {
    input.up = false;
    input.down = false;
    input.left = false;
    input.right = false;
    input.fire = true;

    if world.phase != MatchPhase::Running {
        return;
    }

    let Some((idx, _)) = curefire::sim::nearest_active_zombie(&world.zombies, world.player.pos)
    else {
        return;
    };
    let Some(zombie) = world.zombies.get(idx) else {
        return;
    };

    // Move directly away from the threat
    let away: Vec2 = world.player.pos - zombie.pos;
    input.left = away.x < 0.0;
    input.right = away.x > 0.0;
    input.up = away.y < 0.0;
    input.down = away.y > 0.0;
}

fn report_cues(world: &mut World) {
    for cue in world.cues.drain(..) {
        match cue {
            Cue::DeathTone => log::info!("cue: death tone"),
            Cue::TerminalBanner(outcome) => log::info!("cue: banner {outcome:?}"),
            Cue::ConversionFlash { pos } => {
                log::info!("cue: conversion at ({:.0}, {:.0})", pos.x, pos.y)
            }
            Cue::DisintegrationFlash { pos } => {
                log::info!("cue: disintegration at ({:.0}, {:.0})", pos.x, pos.y)
            }
            Cue::BumpThud => log::info!("cue: bump"),
        }
    }
}
