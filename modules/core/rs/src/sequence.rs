use std::fmt::Debug;
use std::rc::Rc;

use impl_tools::autoimpl;

use crate::error::{Error, Result};

/// A multi-pass ordered sequence addressed through cursors.
///
/// Cursors are plain position markers that only mean something to the sequence that produced
/// them: every dereference and every step goes through the sequence, so a cursor can't be used
/// once its sequence is gone.
///
/// Implementations must uphold the following contract:
/// * `begin() == end()` iff the sequence is empty;
/// * repeatedly advancing `begin()` reaches `end()` after exactly `len` steps;
/// * `get`/`advance` on the `end()` cursor fail with [`Error::IterationOutOfRange`].
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>)]
pub trait Sequence {
    type Item;
    type Cursor: Clone + PartialEq + Debug;

    /// Cursor pointing at the first element (equal to `end()` for empty sequences).
    fn begin(&self) -> Self::Cursor;

    /// Past-the-end cursor.
    fn end(&self) -> Self::Cursor;

    /// Element under the cursor.
    fn get(&self, cursor: &Self::Cursor) -> Result<Self::Item>;

    /// Move the cursor one element forward.
    fn advance(&self, cursor: &mut Self::Cursor) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Advance the cursor by `n` elements or until the end of the sequence, whichever comes
    /// first. Returns the number of steps actually taken.
    fn advance_up_to(&self, cursor: &mut Self::Cursor, n: usize) -> Result<usize> {
        let end = self.end();
        let mut steps = 0;
        while steps < n && *cursor != end {
            self.advance(cursor)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Cursor of the last element, `None` for empty sequences.
    fn last_cursor(&self) -> Result<Option<Self::Cursor>> {
        self.last_cursor_in(&self.begin(), &self.end())
    }

    /// Cursor of the last element satisfying the predicate.
    fn rfind_cursor<P>(&self, predicate: P) -> Result<Option<Self::Cursor>>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.rfind_cursor_in(&self.begin(), &self.end(), predicate)
    }

    /// Cursor of the last element in `[from, to)`, `None` when the range is empty.
    ///
    /// Forward scan by default; bidirectional sequences step back from `to` instead.
    fn last_cursor_in(
        &self,
        from: &Self::Cursor,
        to: &Self::Cursor,
    ) -> Result<Option<Self::Cursor>> {
        let mut cursor = from.clone();
        let mut last = None;
        while cursor != *to {
            last = Some(cursor.clone());
            self.advance(&mut cursor)?;
        }
        Ok(last)
    }

    /// Cursor of the last element in `[from, to)` satisfying the predicate.
    ///
    /// Forward scan retaining the most recent match by default; bidirectional sequences walk
    /// backward from `to` and stop at the first hit.
    fn rfind_cursor_in<P>(
        &self,
        from: &Self::Cursor,
        to: &Self::Cursor,
        mut predicate: P,
    ) -> Result<Option<Self::Cursor>>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let mut cursor = from.clone();
        let mut found = None;
        while cursor != *to {
            if predicate(&self.get(&cursor)?) {
                found = Some(cursor.clone());
            }
            self.advance(&mut cursor)?;
        }
        Ok(found)
    }
}

/// A sequence whose cursors can also move backward.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>)]
pub trait BidirectionalSequence: Sequence {
    /// Move the cursor one element backward. Fails on `begin()`.
    fn retreat(&self, cursor: &mut Self::Cursor) -> Result<()>;

    /// Retreat the cursor by `n` elements or until the start of the sequence, whichever comes
    /// first. Returns the number of steps actually taken.
    fn retreat_up_to(&self, cursor: &mut Self::Cursor, n: usize) -> Result<usize> {
        let begin = self.begin();
        let mut steps = 0;
        while steps < n && *cursor != begin {
            self.retreat(cursor)?;
            steps += 1;
        }
        Ok(steps)
    }
}

/// A sequence that knows its length in O(1).
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>)]
pub trait SizedSequence: Sequence {
    fn size(&self) -> usize;
}

/// Number of steps from `begin()` to `end()`.
pub fn distance<S: Sequence + ?Sized>(seq: &S) -> Result<usize> {
    let mut cursor = seq.begin();
    seq.advance_up_to(&mut cursor, usize::MAX)
}

/// Backward counterpart of [`Sequence::last_cursor_in`] for bidirectional sequences.
pub fn last_cursor_backward<S: BidirectionalSequence + ?Sized>(
    seq: &S,
    from: &S::Cursor,
    to: &S::Cursor,
) -> Result<Option<S::Cursor>> {
    if to == from {
        return Ok(None);
    }
    let mut cursor = to.clone();
    seq.retreat(&mut cursor)?;
    Ok(Some(cursor))
}

/// Backward counterpart of [`Sequence::rfind_cursor_in`] for bidirectional sequences.
pub fn rfind_cursor_backward<S, P>(
    seq: &S,
    from: &S::Cursor,
    to: &S::Cursor,
    mut predicate: P,
) -> Result<Option<S::Cursor>>
where
    S: BidirectionalSequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut cursor = to.clone();
    while cursor != *from {
        seq.retreat(&mut cursor)?;
        if predicate(&seq.get(&cursor)?) {
            return Ok(Some(cursor));
        }
    }
    Ok(None)
}

/// Fails with [`Error::IterationOutOfRange`] when the cursor is already at the given bound.
#[inline]
pub fn ensure_not_at<C: PartialEq>(cursor: &C, bound: &C, reason: &'static str) -> Result<()> {
    if cursor == bound {
        Err(Error::out_of_range(reason))
    } else {
        Ok(())
    }
}
