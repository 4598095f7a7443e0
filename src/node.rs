//! Pair records and their per-side tree linkage
//!
//! Each stored pair is simultaneously a node of the left-index tree and
//! a node of the right-index tree.  The two roles are kept in separate
//! [`Links`] blocks inside the [`Pair`], selected statically through the
//! [`Side`] trait.
use crate::arena::{Arena, SlotIndex};

/// Binary-tree linkage for one structural role of a pair record
///
/// Links are navigational only; the pair itself is owned by the arena.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Links {
    pub parent: Option<SlotIndex>,
    pub left: Option<SlotIndex>,
    pub right: Option<SlotIndex>,
    /// Heap key for treap balancing, drawn fresh on every insert
    pub priority: u64,
}

/// One stored pair: a left value, a right value, and one link block per
/// index tree
#[derive(Debug)]
pub(crate) struct Pair<L, R> {
    pub left: L,
    pub right: R,
    pub left_links: Links,
    pub right_links: Links,
}

impl<L, R> Pair<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            left_links: Links::default(),
            right_links: Links::default(),
        }
    }
}

/// Statically selects one embedded role of a [`Pair`]
///
/// Implemented by the two uninhabited tags [`LeftSide`] and
/// [`RightSide`]; the tree engine and traversal helpers are generic
/// over this trait, so role selection costs nothing at runtime.
pub(crate) trait Side<L, R> {
    /// Key type that this side's tree is ordered by
    type Key;
    fn key(pair: &Pair<L, R>) -> &Self::Key;
    fn links(pair: &Pair<L, R>) -> &Links;
    fn links_mut(pair: &mut Pair<L, R>) -> &mut Links;
}

/// Tag for the left-index role of a pair
#[derive(Debug)]
pub(crate) enum LeftSide {}

/// Tag for the right-index role of a pair
#[derive(Debug)]
pub(crate) enum RightSide {}

impl<L, R> Side<L, R> for LeftSide {
    type Key = L;
    fn key(pair: &Pair<L, R>) -> &L {
        &pair.left
    }
    fn links(pair: &Pair<L, R>) -> &Links {
        &pair.left_links
    }
    fn links_mut(pair: &mut Pair<L, R>) -> &mut Links {
        &mut pair.left_links
    }
}

impl<L, R> Side<L, R> for RightSide {
    type Key = R;
    fn key(pair: &Pair<L, R>) -> &R {
        &pair.right
    }
    fn links(pair: &Pair<L, R>) -> &Links {
        &pair.right_links
    }
    fn links_mut(pair: &mut Pair<L, R>) -> &mut Links {
        &mut pair.right_links
    }
}

/// Leftmost node of the subtree rooted at `n`
pub(crate) fn minimum<S, L, R>(arena: &Arena<L, R>, mut n: SlotIndex) -> SlotIndex
where
    S: Side<L, R>,
{
    while let Some(l) = S::links(&arena[n]).left {
        n = l;
    }
    n
}

/// Rightmost node of the subtree rooted at `n`
pub(crate) fn maximum<S, L, R>(arena: &Arena<L, R>, mut n: SlotIndex) -> SlotIndex
where
    S: Side<L, R>,
{
    while let Some(r) = S::links(&arena[n]).right {
        n = r;
    }
    n
}

/// In-order successor of `n`, or `None` past the maximum
pub(crate) fn successor<S, L, R>(arena: &Arena<L, R>, n: SlotIndex) -> Option<SlotIndex>
where
    S: Side<L, R>,
{
    if let Some(r) = S::links(&arena[n]).right {
        return Some(minimum::<S, L, R>(arena, r));
    }
    let mut low = n;
    let mut high = S::links(&arena[n]).parent;
    while let Some(h) = high {
        if S::links(&arena[h]).right != Some(low) {
            break;
        }
        low = h;
        high = S::links(&arena[h]).parent;
    }
    high
}

/// In-order predecessor of `n`, or `None` before the minimum
pub(crate) fn predecessor<S, L, R>(arena: &Arena<L, R>, n: SlotIndex) -> Option<SlotIndex>
where
    S: Side<L, R>,
{
    if let Some(l) = S::links(&arena[n]).left {
        return Some(maximum::<S, L, R>(arena, l));
    }
    let mut low = n;
    let mut high = S::links(&arena[n]).parent;
    while let Some(h) = high {
        if S::links(&arena[h]).left != Some(low) {
            break;
        }
        low = h;
        high = S::links(&arena[h]).parent;
    }
    high
}

/// Attaches `child` as the left child of `parent`, fixing the child's
/// parent link
pub(crate) fn set_left<S, L, R>(arena: &mut Arena<L, R>, parent: SlotIndex, child: Option<SlotIndex>)
where
    S: Side<L, R>,
{
    S::links_mut(&mut arena[parent]).left = child;
    if let Some(c) = child {
        S::links_mut(&mut arena[c]).parent = Some(parent);
    }
}

/// Attaches `child` as the right child of `parent`, fixing the child's
/// parent link
pub(crate) fn set_right<S, L, R>(arena: &mut Arena<L, R>, parent: SlotIndex, child: Option<SlotIndex>)
where
    S: Side<L, R>,
{
    S::links_mut(&mut arena[parent]).right = child;
    if let Some(c) = child {
        S::links_mut(&mut arena[c]).parent = Some(parent);
    }
}
