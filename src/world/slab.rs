/// Fixed-capacity free list of buffer offsets, one per active chunk.
///
/// Only the control thread touches it, so there is no locking.
pub struct SlabAllocator {
    free_slots: Vec<u32>,
    capacity: u32,
}

impl SlabAllocator {
    pub fn new(capacity: u32) -> Self {
        SlabAllocator {
            // Reversed so offsets are handed out in ascending order
            free_slots: (0..capacity).rev().collect(),
            capacity,
        }
    }

    /// One slot per chunk of a cube with the given radius.
    pub fn for_update_distance(update_distance: i32) -> Self {
        let side = (2 * update_distance.max(0) + 1) as u32;
        Self::new(side * side * side)
    }

    pub fn allocate(&mut self) -> Option<u32> {
        self.free_slots.pop()
    }

    pub fn release(&mut self, offset: u32) {
        debug_assert!(offset < self.capacity, "offset {} out of range", offset);
        debug_assert!(
            !self.free_slots.contains(&offset),
            "offset {} released twice",
            offset
        );
        self.free_slots.push(offset);
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.free_slots.len()
    }

    pub fn in_use(&self) -> usize {
        self.capacity as usize - self.free_slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_matches_cube() {
        assert_eq!(SlabAllocator::for_update_distance(0).capacity(), 1);
        assert_eq!(SlabAllocator::for_update_distance(2).capacity(), 125);
    }

    #[test]
    fn test_exhaustion_and_reuse() {
        let mut slab = SlabAllocator::new(3);
        let a = slab.allocate().unwrap();
        let b = slab.allocate().unwrap();
        let c = slab.allocate().unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(slab.allocate(), None);
        assert_eq!(slab.in_use(), 3);

        slab.release(b);
        assert_eq!(slab.available(), 1);
        assert_eq!(slab.allocate(), Some(b));
    }
}
