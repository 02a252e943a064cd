use std::cmp::Ordering;

use derive_more::Constructor;

/// A total ordering relation over `T`. Implemented by any `Fn(&T, &T) -> Ordering` closure.
pub trait Order<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural order, smallest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ascending;

impl<T: Ord + ?Sized> Order<T> for Ascending {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Natural order, largest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descending;

impl<T: Ord + ?Sized> Order<T> for Descending {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

/// Compare projected keys instead of the elements themselves.
#[derive(Clone, Copy, Debug, Default, Constructor)]
pub struct ByKey<F, O> {
    key: F,
    order: O,
}

impl<T, K, F, O> Order<T> for ByKey<F, O>
where
    F: Fn(&T) -> K,
    O: Order<K>,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.order.compare(&(self.key)(a), &(self.key)(b))
    }
}

impl<T, F> Order<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
