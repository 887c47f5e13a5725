//! Comparator capability
//!
//! The heap never asks a value for its own ordering. It asks a [`Compare`]
//! implementation whether one value goes before another, so the same heap can
//! be a min-heap, a max-heap, or ordered by data living outside the values.

/// Strict weak ordering used to arrange the heap
///
/// `less(a, b)` returns true when `a` must be closer to the top than `b`.
pub trait Compare<T> {
    /// Returns true if `a` goes strictly before `b`
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders by `Ord`, smallest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinOrder;

impl<T: Ord> Compare<T> for MinOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Orders by `Ord`, largest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxOrder;

impl<T: Ord> Compare<T> for MaxOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_and_max_order() {
        assert!(MinOrder.less(&1, &2));
        assert!(!MinOrder.less(&2, &2));
        assert!(MaxOrder.less(&3, &2));
        assert!(!MaxOrder.less(&2, &3));
    }

    #[test]
    fn test_closure_comparator() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.less(&"ab", &"abc"));
        assert!(!by_len.less(&"abc", &"ab"));
    }
}
