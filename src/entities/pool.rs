/// Behavior a pool slot must expose so the pool can manage membership.
pub trait PoolSlot {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Fixed-capacity slot pool used for bullets and enemies.
///
/// A slot is either active or free, never both. `allocate` hands out the
/// first free slot in ascending order; the caller initializes and activates
/// it. Released slots keep their stale contents until the next allocation,
/// which is fine because every consumer checks `is_active` before reading.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: PoolSlot + Default> Pool<T> {
    /// Creates a pool with `capacity` free slots. The capacity never changes.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    /// Returns the index of the first free slot, or `None` when the pool is
    /// exhausted. Spawn requests that hit exhaustion are simply dropped;
    /// there is no queuing and no growth.
    pub fn allocate(&mut self) -> Option<usize> {
        self.slots.iter().position(|slot| !slot.is_active())
    }

    /// Marks a slot free again. Contents are left as-is.
    pub fn release(&mut self, index: usize) {
        self.slots[index].deactivate();
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn get(&self, index: usize) -> &T {
        &self.slots[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    /// Ascending slot order. Collision tie-breaks rely on this.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }
}
