//! Healing bolt lifecycle
//!
//! Bolts come from a fixed pool, fly straight at a fixed speed, and lose
//! power linearly with distance traveled. Power is a public read: the
//! encounter resolver gates conversion on it and the presentation host
//! samples it for transparency. A bolt at zero power is already retired.

use glam::Vec2;

use super::pool::Pool;
use super::state::{Bolt, Shooter, Zombie};
use crate::tuning::BoltTuning;
use crate::{UP_BEARING, bearing_between, unit_from_angle};

/// Pick a firing direction for a shooter
///
/// Priority: aim at the nearest live zombie, else follow the shooter's
/// movement heading, else fire straight up.
pub fn choose_direction(origin: Vec2, heading: Vec2, zombies: &Pool<Zombie>) -> f32 {
    if let Some((idx, _)) = super::spatial::nearest_active_zombie(zombies, origin) {
        if let Some(zombie) = zombies.get(idx) {
            return bearing_between(origin, zombie.pos);
        }
    }
    if heading != Vec2::ZERO {
        return heading.y.atan2(heading.x);
    }
    UP_BEARING
}

/// Fire a bolt from the pool
///
/// Returns the slot handle, or `None` when the pool is exhausted - the
/// shot simply doesn't happen, which callers must treat as "no entity
/// created", not an error.
pub fn spawn_bolt(
    bolts: &mut Pool<Bolt>,
    t: &BoltTuning,
    origin: Vec2,
    direction: f32,
    shooter: Shooter,
) -> Option<usize> {
    let idx = bolts.acquire()?;
    if let Some(bolt) = bolts.get_mut(idx) {
        bolt.pos = origin;
        bolt.origin = origin;
        bolt.vel = unit_from_angle(direction) * t.speed;
        bolt.power = 1.0;
        bolt.shooter = shooter;
    }
    Some(idx)
}

/// Advance all live bolts by one tick
///
/// Integrates position, recomputes `power = max(0, 1 - traveled/range)`,
/// and retires any bolt whose power reaches zero.
pub fn tick_bolts(bolts: &mut Pool<Bolt>, t: &BoltTuning, dt: f32) {
    let mut expired = Vec::new();
    for (idx, bolt) in bolts.iter_active_mut() {
        bolt.pos += bolt.vel * dt;
        let traveled = bolt.pos.distance(bolt.origin);
        bolt.power = (1.0 - traveled / t.max_range).max(0.0);
        if bolt.power <= 0.0 {
            expired.push(idx);
        }
    }
    for idx in expired {
        retire(bolts, idx);
    }
}

/// Return a bolt's slot to the pool
pub fn retire(bolts: &mut Pool<Bolt>, idx: usize) {
    bolts.release(idx);
}
