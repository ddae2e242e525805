//! Playback unit pool
//!
//! Fixed-capacity pool of reusable sound units. Units are constructed
//! lazily up to the cap and recycled on release instead of dropped, so
//! steady-state playback allocates nothing.

use super::channel::Channel;
use super::unit::{PlaybackUnit, UnitId};

/// Pool of reusable sound playback units
pub struct UnitPool {
    idle: Vec<PlaybackUnit>,
    max_units: usize,
    constructed: usize,
    outstanding: usize,
    next_id: u32,
}

impl UnitPool {
    /// Create a pool with the given capacity, pre-warming one unit
    pub fn new(max_units: usize) -> Self {
        let mut pool = Self {
            idle: Vec::new(),
            max_units,
            constructed: 0,
            outstanding: 0,
            next_id: 0,
        };

        // One unit up front, the rest on demand
        if max_units > 0 {
            let unit = pool.construct();
            pool.idle.push(unit);
        }

        pool
    }

    fn construct(&mut self) -> PlaybackUnit {
        let unit = PlaybackUnit::new(UnitId::new(self.next_id), Channel::Sound, true);
        self.next_id += 1;
        self.constructed += 1;
        unit
    }

    /// Take a unit from the pool
    ///
    /// Prefers a recycled idle unit, constructs a fresh one while under the
    /// cap, and returns `None` once every unit is in flight.
    pub fn allocate(&mut self) -> Option<PlaybackUnit> {
        if let Some(unit) = self.idle.pop() {
            self.outstanding += 1;
            return Some(unit);
        }

        if self.constructed < self.max_units {
            let unit = self.construct();
            self.outstanding += 1;
            return Some(unit);
        }

        None
    }

    /// Return a unit to the pool for reuse
    ///
    /// The unit is reset first, so listeners and clip state from the
    /// finished request never leak into the next one.
    pub fn release(&mut self, mut unit: PlaybackUnit) {
        unit.reset();
        self.idle.push(unit);
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    /// Maximum number of units this pool will ever construct
    pub fn capacity(&self) -> usize {
        self.max_units
    }

    /// Number of units constructed so far
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Number of units currently in flight
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Number of idle units ready for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_prewarms_one_unit() {
        let pool = UnitPool::new(10);
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.constructed(), 1);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn test_allocate_up_to_capacity() {
        let mut pool = UnitPool::new(3);

        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        let c = pool.allocate().unwrap();
        assert_eq!(pool.outstanding(), 3);
        assert_eq!(pool.constructed(), 3);

        // Pool is exhausted, no unit beyond the cap
        assert!(pool.allocate().is_none());
        assert_eq!(pool.outstanding(), 3);

        pool.release(a);
        pool.release(b);
        pool.release(c);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.idle_count(), 3);
    }

    #[test]
    fn test_release_recycles_unit() {
        let mut pool = UnitPool::new(2);

        let mut unit = pool.allocate().unwrap();
        let id = unit.id();
        unit.arm("hit.mp3", false, 1.0);
        unit.set_on_finish(Box::new(|| {}));
        pool.release(unit);

        // Same unit comes back, scrubbed clean
        let unit = pool.allocate().unwrap();
        assert_eq!(unit.id(), id);
        assert!(unit.clip().is_none());
        assert_eq!(pool.constructed(), 1);
    }

    #[test]
    fn test_pool_units_are_sound_channel() {
        let mut pool = UnitPool::new(1);
        let unit = pool.allocate().unwrap();
        assert_eq!(unit.channel(), Channel::Sound);
        assert!(unit.is_pooled());
    }

    #[test]
    fn test_zero_capacity_pool() {
        let mut pool = UnitPool::new(0);
        assert_eq!(pool.constructed(), 0);
        assert!(pool.allocate().is_none());
    }

    #[test]
    fn test_unique_unit_ids() {
        let mut pool = UnitPool::new(4);
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        let c = pool.allocate().unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
    }
}
