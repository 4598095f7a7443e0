//! Ordering predicates supplied per key side
use std::cmp::Ordering;

/// A strict weak ordering over keys of type `K`
///
/// Each side of a [`Bimap`](crate::Bimap) is ordered by its own
/// comparator, supplied at construction.  [`NaturalOrder`] delegates to
/// the key's [`Ord`] implementation and is the default; any
/// `Fn(&K, &K) -> Ordering` closure also works.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Checks two keys for equivalence under this ordering
    fn equivalent(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// The default comparator, delegating to the key's [`Ord`]
/// implementation
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparator<K> for F {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert!(NaturalOrder.equivalent(&3, &3));
    }

    #[test]
    fn test_closure_comparator() {
        let rev = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(rev.compare(&1, &2), Ordering::Greater);
        assert!(rev.equivalent(&4, &4));
    }
}
