//! A bidirectional associative container: a one-to-one mapping between
//! two ordered key types, with logarithmic lookup and ordered iteration
//! from either side.
//!
//! Every pair lives once, in an arena-style slot pool, and is threaded
//! through two treaps (randomized balanced search trees), one ordered
//! by the left key and one by the right key.  Positions are denoted by
//! `Copy` cursors carrying a slot handle plus a generation tag, so a
//! cursor survives unrelated inserts and erases and a cursor whose pair
//! was erased is detected instead of dereferencing freed storage.
//!
//! ```
//! use treap_bimap::Bimap;
//!
//! let mut map = Bimap::new();
//! let it = map.insert(1, "a");
//! map.insert(2, "b");
//!
//! // Lookup from either side
//! assert_eq!(map.at_left(&1), Ok(&"a"));
//! assert_eq!(map.at_right(&"b"), Ok(&2));
//!
//! // A cursor flips to the opposite side in O(1)
//! assert_eq!(map.get_right(it.flip()), Some(&"a"));
//!
//! // Both orderings are views of the same pairs
//! let lefts: Vec<i32> = map.iter_left().map(|(l, _)| *l).collect();
//! assert_eq!(lefts, vec![1, 2]);
//! let rights: Vec<&str> = map.iter_right().map(|(r, _)| *r).collect();
//! assert_eq!(rights, vec!["a", "b"]);
//! ```
#![warn(missing_docs)]

mod arena;
mod bimap;
mod cmp;
mod error;
mod node;
mod tree;

pub use crate::bimap::{Bimap, IterLeft, IterRight, LeftCursor, RightCursor};
pub use crate::cmp::{Comparator, NaturalOrder};
pub use crate::error::Error;
