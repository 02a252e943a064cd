//! Adaptors that std iterators already implement. They only translate a source sequence
//! into a std iterator chain and back, so they compose with the stateful views through the
//! same `pipe` protocol. Applying one does no work: the chain starts pulling from its source on
//! the first traversal.

use std::iter;
use std::marker::PhantomData;
use std::ops::Range;
use std::rc::Rc;

use crate::elements::{Elements, SequenceExt, SharedElements};
use crate::iter_sequence::IterSequence;
use crate::num::PrimInt;
use crate::pipe::Adaptor;
use crate::sequence::{BidirectionalSequence, Sequence};

type Shared<S> = SharedElements<S>;

#[derive(Clone, Copy, Debug)]
pub struct FilterAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for FilterAdaptor<P>
where
    S: Sequence,
    S::Item: Clone,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Output = IterSequence<iter::Filter<Shared<S>, P>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(source.into_shared_elements().filter(self.predicate))
    }
}

/// Keep the elements satisfying the predicate.
pub fn filter<P>(predicate: P) -> FilterAdaptor<P> {
    FilterAdaptor { predicate }
}

#[derive(Clone, Copy, Debug)]
pub struct MapAdaptor<F> {
    selector: F,
}

impl<S, F, B> Adaptor<S> for MapAdaptor<F>
where
    S: Sequence,
    S::Item: Clone,
    F: FnMut(S::Item) -> B + Clone,
    B: Clone,
{
    type Output = IterSequence<iter::Map<Shared<S>, F>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(source.into_shared_elements().map(self.selector))
    }
}

/// Project every element through the selector.
pub fn map<F>(selector: F) -> MapAdaptor<F> {
    MapAdaptor { selector }
}

#[derive(Debug)]
pub struct CastAdaptor<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> Clone for CastAdaptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CastAdaptor<T> {}

impl<S, T> Adaptor<S> for CastAdaptor<T>
where
    S: Sequence,
    S::Item: Clone + Into<T>,
    T: Clone,
{
    type Output = IterSequence<iter::Map<Shared<S>, fn(S::Item) -> T>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(
            source
                .into_shared_elements()
                .map(Into::into as fn(S::Item) -> T),
        )
    }
}

/// Convert every element into `T`.
pub fn cast<T>() -> CastAdaptor<T> {
    CastAdaptor {
        _target: PhantomData,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SkipAdaptor {
    count: usize,
}

impl<S> Adaptor<S> for SkipAdaptor
where
    S: Sequence,
    S::Item: Clone,
{
    type Output = IterSequence<iter::Skip<Shared<S>>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(source.into_shared_elements().skip(self.count))
    }
}

/// Drop the first `count` elements.
pub fn skip(count: usize) -> SkipAdaptor {
    SkipAdaptor { count }
}

#[derive(Clone, Copy, Debug)]
pub struct TakeAdaptor {
    count: usize,
}

impl<S> Adaptor<S> for TakeAdaptor
where
    S: Sequence,
    S::Item: Clone,
{
    type Output = IterSequence<iter::Take<Shared<S>>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(source.into_shared_elements().take(self.count))
    }
}

/// Keep at most the first `count` elements.
pub fn take(count: usize) -> TakeAdaptor {
    TakeAdaptor { count }
}

#[derive(Clone, Copy, Debug)]
pub struct SliceAdaptor {
    start: usize,
    count: usize,
}

impl<S> Adaptor<S> for SliceAdaptor
where
    S: Sequence,
    S::Item: Clone,
{
    type Output = IterSequence<iter::Take<iter::Skip<Shared<S>>>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(
            source
                .into_shared_elements()
                .skip(self.start)
                .take(self.count),
        )
    }
}

/// Keep `count` elements starting at position `start`.
pub fn slice(start: usize, count: usize) -> SliceAdaptor {
    SliceAdaptor { start, count }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReverseAdaptor;

impl<S> Adaptor<S> for ReverseAdaptor
where
    S: BidirectionalSequence,
    S::Item: Clone,
{
    type Output = IterSequence<iter::Rev<Shared<S>>>;

    fn apply(self, source: S) -> Self::Output {
        IterSequence::new(source.into_shared_elements().rev())
    }
}

/// Iterate a bidirectional source back to front.
pub fn reverse() -> ReverseAdaptor {
    ReverseAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JoinAdaptor;

type Flattened<S> = iter::FlatMap<
    Shared<S>,
    Elements<<S as Sequence>::Item>,
    fn(<S as Sequence>::Item) -> Elements<<S as Sequence>::Item>,
>;

impl<S> Adaptor<S> for JoinAdaptor
where
    S: Sequence,
    S::Item: Sequence + Clone,
    <S::Item as Sequence>::Item: Clone,
{
    type Output = IterSequence<Flattened<S>>;

    fn apply(self, source: S) -> Self::Output {
        let inner: fn(S::Item) -> Elements<S::Item> = SequenceExt::into_elements;
        IterSequence::new(source.into_shared_elements().flat_map(inner))
    }
}

/// Flatten a sequence of sequences.
pub fn join() -> JoinAdaptor {
    JoinAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsViewAdaptor;

impl<S: Sequence> Adaptor<S> for AsViewAdaptor {
    type Output = Rc<S>;

    fn apply(self, source: S) -> Rc<S> {
        Rc::new(source)
    }
}

/// Move an owned source behind a shared handle; clones of the handle can each be piped into
/// a separate pipeline without copying the elements.
pub fn as_view() -> AsViewAdaptor {
    AsViewAdaptor
}

/// A sequence without elements.
pub fn empty<T: Clone>() -> IterSequence<iter::Empty<T>> {
    IterSequence::new(iter::empty())
}

/// `count` consecutive integers starting at `start`.
pub fn range<Idx: PrimInt>(start: Idx, count: Idx) -> Range<Idx> {
    start..start.saturating_add(count)
}
