//! Fixed-capacity entity pools
//!
//! Entities are never destroyed, only deactivated: a pool is a dense slot
//! array with an active bit, and "spawn" reuses the first inactive slot.
//! Acquisition fails silently (returns `None`) when every slot is live, so
//! active counts can never exceed capacity.

use serde::{Deserialize, Serialize};

/// One pool slot: the entity value plus its participation flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot<T> {
    /// Sole gate for simulation participation
    pub active: bool,
    /// Presentation hint, mirrors `active` except during transient effects
    pub visible: bool,
    pub value: T,
}

/// A fixed-capacity, reuse-by-deactivation arena for one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Clone> Pool<T> {
    /// Allocate `capacity` inactive slots seeded from a template value
    pub fn new(capacity: usize, template: T) -> Self {
        Self {
            slots: vec![
                Slot {
                    active: false,
                    visible: false,
                    value: template,
                };
                capacity
            ],
        }
    }
}

impl<T> Pool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Reuse the first free slot, marking it live. `None` when exhausted.
    pub fn acquire(&mut self) -> Option<usize> {
        let idx = self.slots.iter().position(|s| !s.active)?;
        self.slots[idx].active = true;
        self.slots[idx].visible = true;
        Some(idx)
    }

    /// Deactivate a slot, returning it to the pool. No-op if already free.
    pub fn release(&mut self, idx: usize) {
        if let Some(slot) = self.slots.get_mut(idx) {
            slot.active = false;
            slot.visible = false;
        }
    }

    /// Whether a slot index refers to a live entity
    pub fn is_active(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|s| s.active)
    }

    /// Whether the host should draw this slot
    pub fn is_visible(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|s| s.visible)
    }

    /// Override the draw hint without touching simulation participation
    /// (blink-out effects and the like)
    pub fn set_visible(&mut self, idx: usize, visible: bool) {
        if let Some(slot) = self.slots.get_mut(idx) {
            slot.visible = visible;
        }
    }

    /// Borrow a live entity. `None` for free or out-of-range slots.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots
            .get(idx)
            .filter(|s| s.active)
            .map(|s| &s.value)
    }

    /// Mutably borrow a live entity
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots
            .get_mut(idx)
            .filter(|s| s.active)
            .map(|s| &mut s.value)
    }

    /// Iterate live entities with their slot indices
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.value))
    }

    /// Mutably iterate live entities with their slot indices
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &mut s.value))
    }

    /// Number of live entities
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Deactivate every slot (match reset)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
            slot.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_up_to_capacity() {
        let mut pool: Pool<u32> = Pool::new(3, 0);
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        // Fourth request must fail silently
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_release_makes_slot_reusable() {
        let mut pool: Pool<u32> = Pool::new(2, 0);
        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        assert!(pool.acquire().is_none());

        pool.release(a);
        assert!(!pool.is_active(a));
        assert_eq!(pool.acquire(), Some(a));
    }

    #[test]
    fn test_release_is_idempotent_and_bounds_safe() {
        let mut pool: Pool<u32> = Pool::new(1, 0);
        let a = pool.acquire().unwrap();
        pool.release(a);
        pool.release(a);
        pool.release(99);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_get_skips_inactive() {
        let mut pool: Pool<u32> = Pool::new(2, 0);
        let a = pool.acquire().unwrap();
        *pool.get_mut(a).unwrap() = 7;
        assert_eq!(pool.get(a), Some(&7));

        pool.release(a);
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.get_mut(a), None);
    }

    #[test]
    fn test_visibility_is_independent_of_active() {
        let mut pool: Pool<u32> = Pool::new(1, 0);
        let a = pool.acquire().unwrap();
        assert!(pool.is_visible(a));

        pool.set_visible(a, false);
        assert!(!pool.is_visible(a));
        assert!(pool.is_active(a));

        // Reacquire after release restores the draw hint
        pool.release(a);
        assert_eq!(pool.acquire(), Some(a));
        assert!(pool.is_visible(a));
    }

    #[test]
    fn test_clear_deactivates_all() {
        let mut pool: Pool<u32> = Pool::new(4, 0);
        pool.acquire();
        pool.acquire();
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter_active().count(), 0);
    }
}
