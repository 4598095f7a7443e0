//! Slot pool holding every pair record, with stable indices
//!
//! All pairs of a [`Bimap`](crate::Bimap) live in one [`Arena`]; both
//! index trees link pairs together through [`SlotIndex`] handles rather
//! than pointers.  Freeing a slot bumps its generation counter, so a
//! stale handle into a reused slot can be detected.
use crate::node::Pair;

/// An index in the [`Arena`] slot pool
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct SlotIndex(usize);

#[derive(Debug)]
struct Slot<L, R> {
    generation: u64,
    pair: Option<Pair<L, R>>,
}

/// Growable pool of pair records
///
/// Slots freed by [`Arena::free`] are recycled by later calls to
/// [`Arena::alloc`].
#[derive(Debug)]
pub(crate) struct Arena<L, R> {
    slots: Vec<Slot<L, R>>,
    free: Vec<SlotIndex>,
}

impl<L, R> Default for Arena<L, R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<L, R> Arena<L, R> {
    /// Stores a new pair, reusing a free slot if one is available
    pub fn alloc(&mut self, left: L, right: R) -> SlotIndex {
        let pair = Pair::new(left, right);
        match self.free.pop() {
            Some(i) => {
                self.slots[i.0].pair = Some(pair);
                i
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    pair: Some(pair),
                });
                SlotIndex(self.slots.len() - 1)
            }
        }
    }

    /// Drops the pair in the given slot and recycles the slot.
    ///
    /// The slot's generation is bumped, invalidating every outstanding
    /// handle to it.
    pub fn free(&mut self, i: SlotIndex) {
        let slot = &mut self.slots[i.0];
        slot.pair = None;
        slot.generation += 1;
        self.free.push(i);
    }

    /// Current generation of the given slot
    pub fn generation(&self, i: SlotIndex) -> u64 {
        self.slots[i.0].generation
    }

    /// Checks whether the slot holds a live pair stored under the given
    /// generation
    pub fn is_live(&self, i: SlotIndex, generation: u64) -> bool {
        self.slots
            .get(i.0)
            .map_or(false, |s| s.pair.is_some() && s.generation == generation)
    }
}

impl<L, R> std::ops::Index<SlotIndex> for Arena<L, R> {
    type Output = Pair<L, R>;
    fn index(&self, i: SlotIndex) -> &Pair<L, R> {
        self.slots[i.0].pair.as_ref().expect("stale slot index")
    }
}

impl<L, R> std::ops::IndexMut<SlotIndex> for Arena<L, R> {
    fn index_mut(&mut self, i: SlotIndex) -> &mut Pair<L, R> {
        self.slots[i.0].pair.as_mut().expect("stale slot index")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_alloc_free_reuse() {
        let mut arena: Arena<i32, &str> = Arena::default();
        let a = arena.alloc(1, "a");
        let b = arena.alloc(2, "b");
        assert_ne!(a, b);
        assert_eq!(arena[a].left, 1);
        assert_eq!(arena[b].right, "b");

        let g = arena.generation(a);
        assert!(arena.is_live(a, g));
        arena.free(a);
        assert!(!arena.is_live(a, g));

        // The slot is recycled under a new generation
        let c = arena.alloc(3, "c");
        assert_eq!(c, a);
        assert!(!arena.is_live(a, g));
        assert!(arena.is_live(c, arena.generation(c)));
    }
}
