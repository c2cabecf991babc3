//! Spatial queries and the bundled contact detector
//!
//! Contact detection is an injected capability: the tick driver hands
//! `tick` a slice of contacts from whatever broadphase the host runs. The
//! naive circle-overlap detector here serves the bundled headless driver
//! and the tests; a host with its own physics can replace it wholesale.

use glam::Vec2;

use super::pool::Pool;
use super::state::{Ally, World, Zombie};

/// A detected overlap between two entity groups
///
/// Slot indices are only meaningful for the tick they were detected in;
/// the resolver re-checks liveness before reacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    BoltZombie { bolt: usize, zombie: usize },
    AllyZombie { ally: usize, zombie: usize },
    PlayerZombie { zombie: usize },
    PlayerAlly { ally: usize },
}

/// Nearest live zombie to a point, with its distance
pub fn nearest_active_zombie(zombies: &Pool<Zombie>, point: Vec2) -> Option<(usize, f32)> {
    zombies
        .iter_active()
        .map(|(i, z)| (i, z.pos.distance(point)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Nearest other live ally to a point, with its distance
pub fn nearest_other_ally(
    allies: &Pool<Ally>,
    self_idx: usize,
    point: Vec2,
) -> Option<(usize, f32)> {
    allies
        .iter_active()
        .filter(|(i, _)| *i != self_idx)
        .map(|(i, a)| (i, a.pos.distance(point)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

#[inline]
fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// Detect all current overlaps between entity groups
///
/// O(n*m) circle tests over the pools; fine at these capacities.
pub fn detect_contacts(world: &World) -> Vec<Contact> {
    let t = &world.tuning;
    let mut contacts = Vec::new();

    for (bi, bolt) in world.bolts.iter_active() {
        for (zi, zombie) in world.zombies.iter_active() {
            if circles_overlap(bolt.pos, t.bolt.radius, zombie.pos, t.zombie.radius) {
                contacts.push(Contact::BoltZombie {
                    bolt: bi,
                    zombie: zi,
                });
            }
        }
    }

    for (ai, ally) in world.allies.iter_active() {
        for (zi, zombie) in world.zombies.iter_active() {
            if circles_overlap(ally.pos, t.ally.radius, zombie.pos, t.zombie.radius) {
                contacts.push(Contact::AllyZombie {
                    ally: ai,
                    zombie: zi,
                });
            }
        }
    }

    if world.player.alive {
        for (zi, zombie) in world.zombies.iter_active() {
            if circles_overlap(world.player.pos, t.player.radius, zombie.pos, t.zombie.radius) {
                contacts.push(Contact::PlayerZombie { zombie: zi });
            }
        }
        for (ai, ally) in world.allies.iter_active() {
            if circles_overlap(world.player.pos, t.player.radius, ally.pos, t.ally.radius) {
                contacts.push(Contact::PlayerAlly { ally: ai });
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn empty_world() -> World {
        let mut world = World::new(1, Tuning::default());
        world.zombies.clear();
        world
    }

    #[test]
    fn test_nearest_zombie_picks_closest() {
        let mut w = empty_world();
        let a = w.zombies.acquire().unwrap();
        w.zombies.get_mut(a).unwrap().pos = Vec2::new(100.0, 0.0);
        let b = w.zombies.acquire().unwrap();
        w.zombies.get_mut(b).unwrap().pos = Vec2::new(30.0, 0.0);

        let (idx, dist) = nearest_active_zombie(&w.zombies, Vec2::ZERO).unwrap();
        assert_eq!(idx, b);
        assert!((dist - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_nearest_zombie_ignores_inactive() {
        let mut w = empty_world();
        let a = w.zombies.acquire().unwrap();
        w.zombies.get_mut(a).unwrap().pos = Vec2::new(10.0, 0.0);
        w.zombies.release(a);
        assert!(nearest_active_zombie(&w.zombies, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_nearest_other_ally_skips_self() {
        let mut w = empty_world();
        let a = w.allies.acquire().unwrap();
        w.allies.get_mut(a).unwrap().pos = Vec2::ZERO;
        assert!(nearest_other_ally(&w.allies, a, Vec2::ZERO).is_none());

        let b = w.allies.acquire().unwrap();
        w.allies.get_mut(b).unwrap().pos = Vec2::new(20.0, 0.0);
        let (idx, _) = nearest_other_ally(&w.allies, a, Vec2::ZERO).unwrap();
        assert_eq!(idx, b);
    }

    #[test]
    fn test_detect_player_zombie_overlap() {
        let mut w = empty_world();
        let z = w.zombies.acquire().unwrap();
        // Just inside the combined radii (16 + 16)
        w.zombies.get_mut(z).unwrap().pos = Vec2::new(30.0, 0.0);

        let contacts = detect_contacts(&w);
        assert!(contacts.contains(&Contact::PlayerZombie { zombie: z }));
    }

    #[test]
    fn test_no_overlap_beyond_radii() {
        let mut w = empty_world();
        let z = w.zombies.acquire().unwrap();
        w.zombies.get_mut(z).unwrap().pos = Vec2::new(33.0, 0.0);
        assert!(detect_contacts(&w).is_empty());
    }

    #[test]
    fn test_dead_player_produces_no_player_contacts() {
        let mut w = empty_world();
        let z = w.zombies.acquire().unwrap();
        w.zombies.get_mut(z).unwrap().pos = Vec2::ZERO;
        w.player.alive = false;
        assert!(detect_contacts(&w).is_empty());
    }
}
