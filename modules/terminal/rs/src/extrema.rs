use std::cmp::Ordering;

use seqpipe_core_rs::{Adaptor, Error, Result, Sequence, SequenceExt};

/// Leftmost item that compares `wanted` against every other item.
fn pick<T, C>(items: impl Iterator<Item = T>, mut compare: C, wanted: Ordering) -> Option<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    items.reduce(|best, next| {
        if compare(&next, &best) == wanted {
            next
        } else {
            best
        }
    })
}

fn extremum<S>(source: &S, wanted: Ordering) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Ord,
{
    itertools::process_results(source.try_elements(), |items| {
        pick(items, |a, b| a.cmp(b), wanted)
    })?
    .ok_or(Error::EmptySequence)
}

fn extremum_by_key<S, K, F>(source: &S, mut key: F, wanted: Ordering) -> Result<S::Item>
where
    S: Sequence,
    K: Ord,
    F: FnMut(&S::Item) -> K,
{
    itertools::process_results(source.try_elements(), |items| {
        let keyed = items.map(|item| (key(&item), item));
        pick(keyed, |a, b| a.0.cmp(&b.0), wanted).map(|(_, item)| item)
    })?
    .ok_or(Error::EmptySequence)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MinAdaptor;

impl<S> Adaptor<S> for MinAdaptor
where
    S: Sequence,
    S::Item: Ord,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        extremum(&source, Ordering::Less)
    }
}

/// Smallest element. Fails with [`Error::EmptySequence`] on an empty source.
pub fn min() -> MinAdaptor {
    MinAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MaxAdaptor;

impl<S> Adaptor<S> for MaxAdaptor
where
    S: Sequence,
    S::Item: Ord,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        extremum(&source, Ordering::Greater)
    }
}

/// Largest element. Fails with [`Error::EmptySequence`] on an empty source.
pub fn max() -> MaxAdaptor {
    MaxAdaptor
}

#[derive(Clone, Copy, Debug)]
pub struct MinByKeyAdaptor<F> {
    key: F,
}

impl<S, F, K> Adaptor<S> for MinByKeyAdaptor<F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> K,
    K: Ord,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        extremum_by_key(&source, self.key, Ordering::Less)
    }
}

/// Element with the smallest projected key, the leftmost one on ties.
pub fn min_by_key<F>(key: F) -> MinByKeyAdaptor<F> {
    MinByKeyAdaptor { key }
}

#[derive(Clone, Copy, Debug)]
pub struct MaxByKeyAdaptor<F> {
    key: F,
}

impl<S, F, K> Adaptor<S> for MaxByKeyAdaptor<F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> K,
    K: Ord,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        extremum_by_key(&source, self.key, Ordering::Greater)
    }
}

/// Element with the largest projected key, the leftmost one on ties.
pub fn max_by_key<F>(key: F) -> MaxByKeyAdaptor<F> {
    MaxByKeyAdaptor { key }
}
