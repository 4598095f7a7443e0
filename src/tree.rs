//! The randomized search-tree engine shared by both indices
//!
//! A [`Tree`] is a treap over pairs in the shared arena, keyed by one
//! side of each pair.  Balance is expected-logarithmic and purely
//! probabilistic: every insert draws an independent random priority and
//! the tree is kept in max-heap order on priorities via split/merge,
//! so depth does not depend on key distribution or insertion order.
use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::arena::{Arena, SlotIndex};
use crate::cmp::Comparator;
use crate::node::{self, Side};

/// One index tree over the shared arena
///
/// The engine never checks for duplicate keys; inserting a key
/// equivalent to one already present is the orchestrator's contract to
/// prevent (via [`Tree::lower_bound`]).
#[derive(Debug)]
pub(crate) struct Tree<C, S> {
    pub root: Option<SlotIndex>,
    pub cmp: C,
    _side: PhantomData<S>,
}

impl<C, S> Tree<C, S> {
    pub fn new(cmp: C) -> Self {
        Self {
            root: None,
            cmp,
            _side: PhantomData,
        }
    }

    /// First node whose key is not less than `key`, or `None` if every
    /// stored key is smaller (or the tree is empty)
    pub fn lower_bound<L, R>(
        &self,
        arena: &Arena<L, R>,
        key: &<S as Side<L, R>>::Key,
    ) -> Option<SlotIndex>
    where
        S: Side<L, R>,
        C: Comparator<<S as Side<L, R>>::Key>,
    {
        let mut cur = self.root?;
        loop {
            let less = self.cmp.compare(S::key(&arena[cur]), key) == Ordering::Less;
            let links = S::links(&arena[cur]);
            let next = if less { links.right } else { links.left };
            match next {
                Some(n) => cur = n,
                None => break,
            }
        }
        // The leaf we stopped at is either the bound itself or the last
        // node below the key, whose successor is the bound.
        if self.cmp.compare(S::key(&arena[cur]), key) == Ordering::Less {
            node::successor::<S, L, R>(arena, cur)
        } else {
            Some(cur)
        }
    }

    /// Inserts a freshly allocated pair into this index.
    ///
    /// The pair's key on this side must not be equivalent to any key
    /// already in the tree.
    pub fn insert<L, R>(&mut self, arena: &mut Arena<L, R>, n: SlotIndex)
    where
        S: Side<L, R>,
        C: Comparator<<S as Side<L, R>>::Key>,
    {
        S::links_mut(&mut arena[n]).priority = rand::random();
        let (lo, hi) = self.split(arena, self.root, n);
        let hi = Self::merge(arena, Some(n), hi);
        self.root = Self::merge(arena, lo, hi);
        if let Some(r) = self.root {
            S::links_mut(&mut arena[r]).parent = None;
        }
    }

    /// Splices a node out of this index; the pair stays allocated.
    ///
    /// The node must currently be attached to this tree.
    pub fn erase<L, R>(&mut self, arena: &mut Arena<L, R>, n: SlotIndex)
    where
        S: Side<L, R>,
    {
        let links = *S::links(&arena[n]);
        let merged = Self::merge(arena, links.left, links.right);
        match links.parent {
            Some(p) => {
                if S::links(&arena[p]).left == Some(n) {
                    node::set_left::<S, L, R>(arena, p, merged);
                } else {
                    node::set_right::<S, L, R>(arena, p, merged);
                }
            }
            None => {
                self.root = merged;
                if let Some(m) = merged {
                    S::links_mut(&mut arena[m]).parent = None;
                }
            }
        }
    }

    /// Partitions `tree` into (keys strictly less than `at`'s key,
    /// keys greater or equal)
    fn split<L, R>(
        &self,
        arena: &mut Arena<L, R>,
        tree: Option<SlotIndex>,
        at: SlotIndex,
    ) -> (Option<SlotIndex>, Option<SlotIndex>)
    where
        S: Side<L, R>,
        C: Comparator<<S as Side<L, R>>::Key>,
    {
        let Some(n) = tree else {
            return (None, None);
        };
        let less = self.cmp.compare(S::key(&arena[n]), S::key(&arena[at])) == Ordering::Less;
        if less {
            let child = S::links(&arena[n]).right;
            let (a, b) = self.split(arena, child, at);
            node::set_right::<S, L, R>(arena, n, a);
            (Some(n), b)
        } else {
            let child = S::links(&arena[n]).left;
            let (a, b) = self.split(arena, child, at);
            node::set_left::<S, L, R>(arena, n, b);
            (a, Some(n))
        }
    }

    /// Joins two subtrees, assuming every key in `a` is less than every
    /// key in `b`; the higher-priority root wins
    fn merge<L, R>(
        arena: &mut Arena<L, R>,
        a: Option<SlotIndex>,
        b: Option<SlotIndex>,
    ) -> Option<SlotIndex>
    where
        S: Side<L, R>,
    {
        let (a, b) = match (a, b) {
            (None, t) | (t, None) => return t,
            (Some(a), Some(b)) => (a, b),
        };
        if S::links(&arena[a]).priority > S::links(&arena[b]).priority {
            let child = S::links(&arena[a]).right;
            let m = Self::merge(arena, child, Some(b));
            node::set_right::<S, L, R>(arena, a, m);
            Some(a)
        } else {
            let child = S::links(&arena[b]).left;
            let m = Self::merge(arena, Some(a), child);
            node::set_left::<S, L, R>(arena, b, m);
            Some(b)
        }
    }
}
