//! The bidirectional map and its cursor types
use std::fmt;

use crate::arena::{Arena, SlotIndex};
use crate::cmp::{Comparator, NaturalOrder};
use crate::error::Error;
use crate::node::{self, LeftSide, RightSide};
use crate::tree::Tree;

/// Position of a cursor: a slot plus the generation it was captured at,
/// or `None` for the one-past-the-end position
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct RawCursor(Option<(SlotIndex, u64)>);

impl RawCursor {
    const END: Self = RawCursor(None);
}

/// A cursor denoting one pair of a [`Bimap`], ordered by the left key
///
/// Cursors are plain `Copy` values and do not borrow the map;
/// dereferencing and navigation go through the map itself
/// ([`Bimap::get_left`], [`Bimap::next_left`], ...).  A cursor stays
/// usable until the pair it denotes is erased, regardless of unrelated
/// inserts and erases; once the pair is gone the map reports
/// [`Error::BadCursor`] instead of resolving it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LeftCursor(RawCursor);

/// A cursor denoting one pair of a [`Bimap`], ordered by the right key
///
/// See [`LeftCursor`] for the cursor contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RightCursor(RawCursor);

impl LeftCursor {
    /// Returns the right-side cursor denoting the same pair, in O(1)
    ///
    /// `flip` is its own inverse: `c.flip().flip() == c`.
    pub fn flip(self) -> RightCursor {
        RightCursor(self.0)
    }

    /// Checks whether this is the one-past-the-end cursor
    pub fn is_end(self) -> bool {
        self.0 .0.is_none()
    }
}

impl RightCursor {
    /// Returns the left-side cursor denoting the same pair, in O(1)
    ///
    /// `flip` is its own inverse: `c.flip().flip() == c`.
    pub fn flip(self) -> LeftCursor {
        LeftCursor(self.0)
    }

    /// Checks whether this is the one-past-the-end cursor
    pub fn is_end(self) -> bool {
        self.0 .0.is_none()
    }
}

/// A one-to-one mapping between two ordered key types, with
/// logarithmic lookup and ordered iteration from either side
///
/// Every stored pair `(left, right)` is unique on both sides: no two
/// pairs share an equivalent left key and no two share an equivalent
/// right key.  Each pair is stored once, in an internal arena, and
/// threaded through two treaps (one per side), so both orderings are
/// views of the same data.
///
/// ```
/// use treap_bimap::Bimap;
///
/// let mut map = Bimap::new();
/// map.insert(1, "a");
/// map.insert(2, "b");
/// assert_eq!(map.at_left(&1), Ok(&"a"));
/// assert_eq!(map.at_right(&"b"), Ok(&2));
///
/// // A duplicate on either side is rejected
/// assert!(map.insert(1, "c").is_end());
/// assert!(map.insert(3, "a").is_end());
/// assert_eq!(map.len(), 2);
/// ```
pub struct Bimap<L, R, CL = NaturalOrder, CR = NaturalOrder> {
    arena: Arena<L, R>,
    left: Tree<CL, LeftSide>,
    right: Tree<CR, RightSide>,
    len: usize,
}

impl<L, R> Bimap<L, R> {
    /// Builds an empty map ordered by [`Ord`] on both sides
    pub fn new() -> Self {
        Self::with_comparators(NaturalOrder, NaturalOrder)
    }
}

impl<L, R, CL: Default, CR: Default> Default for Bimap<L, R, CL, CR> {
    fn default() -> Self {
        Self::with_comparators(CL::default(), CR::default())
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR> {
    /// Builds an empty map with a caller-supplied strict weak order per
    /// side
    ///
    /// ```
    /// use treap_bimap::{Bimap, NaturalOrder};
    ///
    /// let mut map = Bimap::with_comparators(
    ///     |a: &i32, b: &i32| b.cmp(a), // descending on the left
    ///     NaturalOrder,
    /// );
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// let lefts: Vec<i32> = map.iter_left().map(|(l, _)| *l).collect();
    /// assert_eq!(lefts, vec![2, 1]);
    /// ```
    pub fn with_comparators(compare_left: CL, compare_right: CR) -> Self {
        Self {
            arena: Arena::default(),
            left: Tree::new(compare_left),
            right: Tree::new(compare_right),
            len: 0,
        }
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the map stores no pairs
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exchanges the full contents of two maps in O(1)
    ///
    /// Arenas, trees, comparators and sizes move wholesale; no pair is
    /// copied.  Cursors keep denoting the pair they denoted, which now
    /// lives in the other map.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Cursor at the smallest left key, or the end cursor if empty
    pub fn begin_left(&self) -> LeftCursor {
        let slot = self
            .left
            .root
            .map(|r| node::minimum::<LeftSide, L, R>(&self.arena, r));
        LeftCursor(self.raw(slot))
    }

    /// The one-past-the-end cursor on the left side
    pub fn end_left(&self) -> LeftCursor {
        LeftCursor(RawCursor::END)
    }

    /// Cursor at the smallest right key, or the end cursor if empty
    pub fn begin_right(&self) -> RightCursor {
        let slot = self
            .right
            .root
            .map(|r| node::minimum::<RightSide, L, R>(&self.arena, r));
        RightCursor(self.raw(slot))
    }

    /// The one-past-the-end cursor on the right side
    pub fn end_right(&self) -> RightCursor {
        RightCursor(RawCursor::END)
    }

    /// Left value of the pair the cursor denotes, or `None` for the end
    /// cursor and for cursors whose pair was erased
    pub fn get_left(&self, it: LeftCursor) -> Option<&L> {
        let slot = self.resolve(it.0).ok()?;
        Some(&self.arena[slot].left)
    }

    /// Right value of the pair the cursor denotes, or `None` for the
    /// end cursor and for cursors whose pair was erased
    pub fn get_right(&self, it: RightCursor) -> Option<&R> {
        let slot = self.resolve(it.0).ok()?;
        Some(&self.arena[slot].right)
    }

    /// Steps a left-side cursor to the next pair in left-key order
    ///
    /// Stepping past the maximum yields the end cursor.  Stepping the
    /// end cursor is an error, as is stepping a cursor whose pair was
    /// erased.
    pub fn next_left(&self, it: LeftCursor) -> Result<LeftCursor, Error> {
        let slot = self.resolve(it.0)?;
        let next = node::successor::<LeftSide, L, R>(&self.arena, slot);
        Ok(LeftCursor(self.raw(next)))
    }

    /// Steps a left-side cursor to the previous pair in left-key order
    ///
    /// Stepping back from the end cursor yields the maximum; stepping
    /// back from the minimum yields the end cursor.  Fails with
    /// [`Error::EmptyMap`] when stepping back from the end cursor of an
    /// empty map.
    pub fn prev_left(&self, it: LeftCursor) -> Result<LeftCursor, Error> {
        match it.0 .0 {
            None => {
                let root = self.left.root.ok_or(Error::EmptyMap)?;
                let max = node::maximum::<LeftSide, L, R>(&self.arena, root);
                Ok(LeftCursor(self.raw(Some(max))))
            }
            Some(_) => {
                let slot = self.resolve(it.0)?;
                let prev = node::predecessor::<LeftSide, L, R>(&self.arena, slot);
                Ok(LeftCursor(self.raw(prev)))
            }
        }
    }

    /// Steps a right-side cursor to the next pair in right-key order
    ///
    /// Same contract as [`Bimap::next_left`].
    pub fn next_right(&self, it: RightCursor) -> Result<RightCursor, Error> {
        let slot = self.resolve(it.0)?;
        let next = node::successor::<RightSide, L, R>(&self.arena, slot);
        Ok(RightCursor(self.raw(next)))
    }

    /// Steps a right-side cursor to the previous pair in right-key
    /// order
    ///
    /// Same contract as [`Bimap::prev_left`].
    pub fn prev_right(&self, it: RightCursor) -> Result<RightCursor, Error> {
        match it.0 .0 {
            None => {
                let root = self.right.root.ok_or(Error::EmptyMap)?;
                let max = node::maximum::<RightSide, L, R>(&self.arena, root);
                Ok(RightCursor(self.raw(Some(max))))
            }
            Some(_) => {
                let slot = self.resolve(it.0)?;
                let prev = node::predecessor::<RightSide, L, R>(&self.arena, slot);
                Ok(RightCursor(self.raw(prev)))
            }
        }
    }

    /// Erases the pair a left-side cursor denotes, from both sides
    ///
    /// Returns the cursor at the following pair in left-key order (or
    /// the end cursor).  Fails with [`Error::EndCursor`] for the end
    /// cursor and [`Error::BadCursor`] for a cursor whose pair is
    /// already gone.
    pub fn erase_left(&mut self, it: LeftCursor) -> Result<LeftCursor, Error> {
        let slot = self.resolve(it.0)?;
        let next = node::successor::<LeftSide, L, R>(&self.arena, slot);
        let next = LeftCursor(self.raw(next));
        self.erase_slot(slot);
        Ok(next)
    }

    /// Erases the pair a right-side cursor denotes, from both sides
    ///
    /// Same contract as [`Bimap::erase_left`], on the right ordering.
    pub fn erase_right(&mut self, it: RightCursor) -> Result<RightCursor, Error> {
        let slot = self.resolve(it.0)?;
        let next = node::successor::<RightSide, L, R>(&self.arena, slot);
        let next = RightCursor(self.raw(next));
        self.erase_slot(slot);
        Ok(next)
    }

    /// Erases every pair in `[first, last)` in left-key order and
    /// returns `last`
    ///
    /// Erasing earlier pairs never disturbs `last`.  A `last` that is
    /// not reachable from `first` is reported as [`Error::BadCursor`]
    /// once the walk falls off the end.
    pub fn erase_left_range(
        &mut self,
        first: LeftCursor,
        last: LeftCursor,
    ) -> Result<LeftCursor, Error> {
        let mut first = first;
        while first != last {
            if first.is_end() {
                return Err(Error::BadCursor);
            }
            first = self.erase_left(first)?;
        }
        Ok(last)
    }

    /// Erases every pair in `[first, last)` in right-key order and
    /// returns `last`
    ///
    /// Same contract as [`Bimap::erase_left_range`].
    pub fn erase_right_range(
        &mut self,
        first: RightCursor,
        last: RightCursor,
    ) -> Result<RightCursor, Error> {
        let mut first = first;
        while first != last {
            if first.is_end() {
                return Err(Error::BadCursor);
            }
            first = self.erase_right(first)?;
        }
        Ok(last)
    }

    /// Iterates over `(&left, &right)` pairs in left-key order
    pub fn iter_left(&self) -> IterLeft<'_, L, R, CL, CR> {
        IterLeft {
            map: self,
            slot: self
                .left
                .root
                .map(|r| node::minimum::<LeftSide, L, R>(&self.arena, r)),
            remaining: self.len,
        }
    }

    /// Iterates over `(&right, &left)` pairs in right-key order
    pub fn iter_right(&self) -> IterRight<'_, L, R, CL, CR> {
        IterRight {
            map: self,
            slot: self
                .right
                .root
                .map(|r| node::minimum::<RightSide, L, R>(&self.arena, r)),
            remaining: self.len,
        }
    }

    fn raw(&self, slot: Option<SlotIndex>) -> RawCursor {
        RawCursor(slot.map(|s| (s, self.arena.generation(s))))
    }

    fn resolve(&self, raw: RawCursor) -> Result<SlotIndex, Error> {
        let (slot, generation) = raw.0.ok_or(Error::EndCursor)?;
        if self.arena.is_live(slot, generation) {
            Ok(slot)
        } else {
            Err(Error::BadCursor)
        }
    }

    fn erase_slot(&mut self, slot: SlotIndex) {
        self.left.erase(&mut self.arena, slot);
        self.right.erase(&mut self.arena, slot);
        self.arena.free(slot);
        self.len -= 1;
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR>
where
    CL: Comparator<L>,
    CR: Comparator<R>,
{
    /// Inserts the pair `(left, right)` and returns the cursor at it
    ///
    /// If `left` is already present on the left side or `right` on the
    /// right side, nothing is inserted and the end cursor is returned.
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// let it = map.insert(1, "a");
    /// assert_eq!(map.get_left(it), Some(&1));
    /// assert_eq!(map.get_right(it.flip()), Some(&"a"));
    /// ```
    pub fn insert(&mut self, left: L, right: R) -> LeftCursor {
        if self.find_left_slot(&left).is_some() || self.find_right_slot(&right).is_some() {
            return self.end_left();
        }
        let slot = self.insert_unchecked(left, right);
        LeftCursor(self.raw(Some(slot)))
    }

    /// Cursor at the pair with the given left key, or the end cursor
    pub fn find_left(&self, key: &L) -> LeftCursor {
        LeftCursor(self.raw(self.find_left_slot(key)))
    }

    /// Cursor at the pair with the given right key, or the end cursor
    pub fn find_right(&self, key: &R) -> RightCursor {
        RightCursor(self.raw(self.find_right_slot(key)))
    }

    /// Right value paired with the given left key
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent.
    pub fn at_left(&self, key: &L) -> Result<&R, Error> {
        let slot = self.find_left_slot(key).ok_or(Error::KeyNotFound)?;
        Ok(&self.arena[slot].right)
    }

    /// Left value paired with the given right key
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent.
    pub fn at_right(&self, key: &R) -> Result<&L, Error> {
        let slot = self.find_right_slot(key).ok_or(Error::KeyNotFound)?;
        Ok(&self.arena[slot].left)
    }

    /// Right value paired with the given left key, inserting
    /// `(key, R::default())` if the key is absent
    ///
    /// If the default right value is already paired with some other
    /// left key, that pair is erased first, so the default value ends
    /// up reassigned to `key`.
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map: treap_bimap::Bimap<i32, String> = Bimap::new();
    /// map.insert(5, "five".to_string());
    /// assert_eq!(map.at_left_or_default(&5), "five");
    /// assert_eq!(map.at_left_or_default(&7), "");
    /// // 7 took the default; asking for 8 steals it from 7
    /// assert_eq!(map.at_left_or_default(&8), "");
    /// assert!(map.at_left(&7).is_err());
    /// ```
    pub fn at_left_or_default(&mut self, key: &L) -> &R
    where
        L: Clone,
        R: Default,
    {
        let slot = match self.find_left_slot(key) {
            Some(slot) => slot,
            None => {
                let def = R::default();
                if let Some(conflict) = self.find_right_slot(&def) {
                    self.erase_slot(conflict);
                }
                self.insert_unchecked(key.clone(), def)
            }
        };
        &self.arena[slot].right
    }

    /// Left value paired with the given right key, inserting
    /// `(L::default(), key)` if the key is absent
    ///
    /// Mirror image of [`Bimap::at_left_or_default`].
    pub fn at_right_or_default(&mut self, key: &R) -> &L
    where
        R: Clone,
        L: Default,
    {
        let slot = match self.find_right_slot(key) {
            Some(slot) => slot,
            None => {
                let def = L::default();
                if let Some(conflict) = self.find_left_slot(&def) {
                    self.erase_slot(conflict);
                }
                self.insert_unchecked(def, key.clone())
            }
        };
        &self.arena[slot].left
    }

    /// Erases the pair with the given left key, if present
    ///
    /// Returns whether a pair was erased.
    pub fn erase_left_key(&mut self, key: &L) -> bool {
        match self.find_left_slot(key) {
            Some(slot) => {
                self.erase_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Erases the pair with the given right key, if present
    ///
    /// Returns whether a pair was erased.
    pub fn erase_right_key(&mut self, key: &R) -> bool {
        match self.find_right_slot(key) {
            Some(slot) => {
                self.erase_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Cursor at the first pair whose left key is not less than `key`
    pub fn lower_bound_left(&self, key: &L) -> LeftCursor {
        LeftCursor(self.raw(self.left.lower_bound(&self.arena, key)))
    }

    /// Cursor at the first pair whose left key is strictly greater than
    /// `key`
    pub fn upper_bound_left(&self, key: &L) -> LeftCursor {
        let slot = match self.left.lower_bound(&self.arena, key) {
            Some(s) if self.left.cmp.equivalent(&self.arena[s].left, key) => {
                node::successor::<LeftSide, L, R>(&self.arena, s)
            }
            other => other,
        };
        LeftCursor(self.raw(slot))
    }

    /// Cursor at the first pair whose right key is not less than `key`
    pub fn lower_bound_right(&self, key: &R) -> RightCursor {
        RightCursor(self.raw(self.right.lower_bound(&self.arena, key)))
    }

    /// Cursor at the first pair whose right key is strictly greater
    /// than `key`
    pub fn upper_bound_right(&self, key: &R) -> RightCursor {
        let slot = match self.right.lower_bound(&self.arena, key) {
            Some(s) if self.right.cmp.equivalent(&self.arena[s].right, key) => {
                node::successor::<RightSide, L, R>(&self.arena, s)
            }
            other => other,
        };
        RightCursor(self.raw(slot))
    }

    fn find_left_slot(&self, key: &L) -> Option<SlotIndex> {
        let slot = self.left.lower_bound(&self.arena, key)?;
        if self.left.cmp.equivalent(&self.arena[slot].left, key) {
            Some(slot)
        } else {
            None
        }
    }

    fn find_right_slot(&self, key: &R) -> Option<SlotIndex> {
        let slot = self.right.lower_bound(&self.arena, key)?;
        if self.right.cmp.equivalent(&self.arena[slot].right, key) {
            Some(slot)
        } else {
            None
        }
    }

    /// Allocates and links a pair; both-side uniqueness must already be
    /// established
    fn insert_unchecked(&mut self, left: L, right: R) -> SlotIndex {
        let slot = self.arena.alloc(left, right);
        self.left.insert(&mut self.arena, slot);
        self.right.insert(&mut self.arena, slot);
        self.len += 1;
        slot
    }
}

/// Two maps are equal when they hold the same number of pairs and a
/// lock-step walk in left-key order finds every left key and every
/// right key equivalent under `self`'s comparators
impl<L, R, CL, CR> PartialEq for Bimap<L, R, CL, CR>
where
    CL: Comparator<L>,
    CR: Comparator<R>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter_left()
                .zip(other.iter_left())
                .all(|((la, ra), (lb, rb))| {
                    self.left.cmp.equivalent(la, lb) && self.right.cmp.equivalent(ra, rb)
                })
    }
}

/// Cloning reinserts every pair in left-key order into a fresh map
/// built from cloned comparators
impl<L, R, CL, CR> Clone for Bimap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Comparator<L> + Clone,
    CR: Comparator<R> + Clone,
{
    fn clone(&self) -> Self {
        let mut out = Self::with_comparators(self.left.cmp.clone(), self.right.cmp.clone());
        for (l, r) in self.iter_left() {
            out.insert(l.clone(), r.clone());
        }
        out
    }
}

impl<L: fmt::Debug, R: fmt::Debug, CL, CR> fmt::Debug for Bimap<L, R, CL, CR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

/// Borrowing iterator over a [`Bimap`] in left-key order
///
/// Built by [`Bimap::iter_left`].
pub struct IterLeft<'a, L, R, CL, CR> {
    map: &'a Bimap<L, R, CL, CR>,
    slot: Option<SlotIndex>,
    remaining: usize,
}

impl<'a, L, R, CL, CR> Iterator for IterLeft<'a, L, R, CL, CR> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slot?;
        let pair = &self.map.arena[slot];
        self.slot = node::successor::<LeftSide, L, R>(&self.map.arena, slot);
        self.remaining -= 1;
        Some((&pair.left, &pair.right))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> ExactSizeIterator for IterLeft<'_, L, R, CL, CR> {}

/// Borrowing iterator over a [`Bimap`] in right-key order
///
/// Built by [`Bimap::iter_right`].
pub struct IterRight<'a, L, R, CL, CR> {
    map: &'a Bimap<L, R, CL, CR>,
    slot: Option<SlotIndex>,
    remaining: usize,
}

impl<'a, L, R, CL, CR> Iterator for IterRight<'a, L, R, CL, CR> {
    type Item = (&'a R, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slot?;
        let pair = &self.map.arena[slot];
        self.slot = node::successor::<RightSide, L, R>(&self.map.arena, slot);
        self.remaining -= 1;
        Some((&pair.right, &pair.left))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> ExactSizeIterator for IterRight<'_, L, R, CL, CR> {}
