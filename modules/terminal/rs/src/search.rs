//! Positional lookups: first, last and element-at, each in a failing and an `Option` flavor.
//!
//! `last*` go through [`Sequence::last_cursor`] and [`Sequence::rfind_cursor`], so they walk
//! backward from the end whenever the source is bidirectional and fall back to a forward scan
//! otherwise.

use seqpipe_core_rs::{Adaptor, Error, Result, Sequence};

/// Forward scan for the first element satisfying the predicate.
fn find<S, P>(source: &S, mut predicate: P) -> Result<Option<S::Item>>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    let end = source.end();
    let mut cursor = source.begin();
    while cursor != end {
        let item = source.get(&cursor)?;
        if predicate(&item) {
            return Ok(Some(item));
        }
        source.advance(&mut cursor)?;
    }
    Ok(None)
}

fn get_at<S: Sequence>(source: &S, cursor: Option<S::Cursor>) -> Result<Option<S::Item>> {
    cursor.map(|cursor| source.get(&cursor)).transpose()
}

/// `Option` flavors only fail on a broken sequence. That is logged and reported as `None`.
fn or_default<T>(result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        log::error!("Sequence cursor failed during a lookup: {err}");
        None
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAdaptor;

impl<S: Sequence> Adaptor<S> for FirstAdaptor {
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        find(&source, |_| true)?.ok_or(Error::EmptySequence)
    }
}

/// The first element. Fails with [`Error::EmptySequence`] on an empty source.
pub fn first() -> FirstAdaptor {
    FirstAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOrDefaultAdaptor;

impl<S: Sequence> Adaptor<S> for FirstOrDefaultAdaptor {
    type Output = Option<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        or_default(find(&source, |_| true))
    }
}

pub fn first_or_default() -> FirstOrDefaultAdaptor {
    FirstOrDefaultAdaptor
}

#[derive(Clone, Copy, Debug)]
pub struct FirstWhereAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for FirstWhereAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        find(&source, self.predicate)?.ok_or(Error::ItemNotFound)
    }
}

/// The first element satisfying the predicate. Fails with [`Error::ItemNotFound`] when
/// nothing matches, including on an empty source.
pub fn first_where<P>(predicate: P) -> FirstWhereAdaptor<P> {
    FirstWhereAdaptor { predicate }
}

#[derive(Clone, Copy, Debug)]
pub struct FirstWhereOrDefaultAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for FirstWhereOrDefaultAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Option<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        or_default(find(&source, self.predicate))
    }
}

pub fn first_where_or_default<P>(predicate: P) -> FirstWhereOrDefaultAdaptor<P> {
    FirstWhereOrDefaultAdaptor { predicate }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LastAdaptor;

impl<S: Sequence> Adaptor<S> for LastAdaptor {
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        get_at(&source, source.last_cursor()?)?.ok_or(Error::EmptySequence)
    }
}

/// The last element. Fails with [`Error::EmptySequence`] on an empty source.
pub fn last() -> LastAdaptor {
    LastAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LastOrDefaultAdaptor;

impl<S: Sequence> Adaptor<S> for LastOrDefaultAdaptor {
    type Output = Option<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        or_default(
            source
                .last_cursor()
                .and_then(|cursor| get_at(&source, cursor)),
        )
    }
}

pub fn last_or_default() -> LastOrDefaultAdaptor {
    LastOrDefaultAdaptor
}

#[derive(Clone, Copy, Debug)]
pub struct LastWhereAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for LastWhereAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        let cursor = source.rfind_cursor(self.predicate)?;
        get_at(&source, cursor)?.ok_or(Error::ItemNotFound)
    }
}

/// The last element satisfying the predicate. Fails with [`Error::ItemNotFound`] when
/// nothing matches.
pub fn last_where<P>(predicate: P) -> LastWhereAdaptor<P> {
    LastWhereAdaptor { predicate }
}

#[derive(Clone, Copy, Debug)]
pub struct LastWhereOrDefaultAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for LastWhereOrDefaultAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Option<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        or_default(
            source
                .rfind_cursor(self.predicate)
                .and_then(|cursor| get_at(&source, cursor)),
        )
    }
}

pub fn last_where_or_default<P>(predicate: P) -> LastWhereOrDefaultAdaptor<P> {
    LastWhereOrDefaultAdaptor { predicate }
}

/// Cursor of the element at `position`, or the error describing why there is none.
fn cursor_at<S: Sequence>(source: &S, position: usize) -> Result<S::Cursor> {
    let mut cursor = source.begin();
    let length = source.advance_up_to(&mut cursor, position)?;
    if cursor != source.end() {
        return Ok(cursor);
    }
    match length {
        0 => Err(Error::EmptySequence),
        length => Err(Error::PositionOutOfRange { position, length }),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementAtAdaptor {
    position: usize,
}

impl<S: Sequence> Adaptor<S> for ElementAtAdaptor {
    type Output = Result<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        let cursor = cursor_at(&source, self.position)?;
        source.get(&cursor)
    }
}

/// The element at the zero-based `position`.
///
/// Fails with [`Error::EmptySequence`] on an empty source and with
/// [`Error::PositionOutOfRange`] when `position` is past the end of a non-empty one.
pub fn element_at(position: usize) -> ElementAtAdaptor {
    ElementAtAdaptor { position }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementAtOrDefaultAdaptor {
    position: usize,
}

impl<S: Sequence> Adaptor<S> for ElementAtOrDefaultAdaptor {
    type Output = Option<S::Item>;

    fn apply(self, source: S) -> Self::Output {
        match cursor_at(&source, self.position) {
            Ok(cursor) => or_default(source.get(&cursor).map(Some)),
            Err(Error::EmptySequence | Error::PositionOutOfRange { .. }) => None,
            Err(err) => or_default(Err(err)),
        }
    }
}

pub fn element_at_or_default(position: usize) -> ElementAtOrDefaultAdaptor {
    ElementAtOrDefaultAdaptor { position }
}
