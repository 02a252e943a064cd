use std::fmt::{Debug, Formatter};

use derive_getters::Dissolve;

use crate::error::{Error, Result};
use crate::sequence::{Sequence, SizedSequence};

/// A multi-pass [`Sequence`] over any clonable std iterator.
///
/// Every `begin()` restarts from a fresh clone of the iterator, so the iterator must be
/// restartable in that sense (slice iterators, ranges, adaptor chains over them, ...).
#[derive(Clone, Debug, Dissolve)]
pub struct IterSequence<I> {
    iter: I,
}

impl<I> IterSequence<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
        }
    }
}

/// Position inside an [`IterSequence`]: the remaining iterator plus the element it already
/// pulled. Exhausted cursors compare equal regardless of where they came from.
pub struct IterCursor<I: Iterator> {
    position: usize,
    current: Option<I::Item>,
    rest: I,
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            current: self.current.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<I: Iterator> IterCursor<I> {
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<I: Iterator> PartialEq for IterCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.current, &other.current) {
            (None, None) => true,
            (Some(_), Some(_)) => self.position == other.position,
            _ => false,
        }
    }
}

impl<I: Iterator> Debug for IterCursor<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterCursor")
            .field("position", &self.position)
            .field("exhausted", &self.current.is_none())
            .finish()
    }
}

impl<I> Sequence for IterSequence<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    type Item = I::Item;
    type Cursor = IterCursor<I>;

    fn begin(&self) -> Self::Cursor {
        let mut rest = self.iter.clone();
        let current = rest.next();
        IterCursor {
            position: 0,
            current,
            rest,
        }
    }

    fn end(&self) -> Self::Cursor {
        IterCursor {
            position: usize::MAX,
            current: None,
            rest: self.iter.clone(),
        }
    }

    fn get(&self, cursor: &Self::Cursor) -> Result<Self::Item> {
        cursor
            .current
            .clone()
            .ok_or_else(|| Error::out_of_range("cannot dereference an exhausted iterator"))
    }

    fn advance(&self, cursor: &mut Self::Cursor) -> Result<()> {
        if cursor.current.is_none() {
            return Err(Error::out_of_range("cannot advance an exhausted iterator"));
        }
        cursor.current = cursor.rest.next();
        cursor.position += 1;
        Ok(())
    }
}

impl<I> SizedSequence for IterSequence<I>
where
    I: ExactSizeIterator + Clone,
    I::Item: Clone,
{
    fn size(&self) -> usize {
        self.iter.len()
    }
}

crate::pipe_operator!(impl[I] IterSequence<I>);

#[cfg(test)]
mod tests {
    use eyre::Result;

    use super::*;
    use crate::elements::SequenceExt;

    #[test]
    fn test_iter_sequence_is_multi_pass() -> Result<()> {
        let data = [1, 2, 3, 4, 5, 6];
        let seq = IterSequence::new(data.iter().copied().filter(|x| x % 2 == 0));

        assert_eq!(seq.elements().collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(seq.elements().collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(seq.last_cursor()?.map(|c| c.position()), Some(2));
        Ok(())
    }

    #[test]
    fn test_iter_cursor_equality() -> Result<()> {
        let seq = IterSequence::new(0..2);
        let mut cursor = seq.begin();
        assert_ne!(cursor, seq.end());

        seq.advance(&mut cursor)?;
        seq.advance(&mut cursor)?;
        assert_eq!(cursor, seq.end());
        assert!(seq.get(&cursor).is_err());
        assert!(seq.advance(&mut cursor).is_err());
        Ok(())
    }

    #[test]
    fn test_sized_iter_sequence() {
        let seq = IterSequence::new(vec!["a", "b", "c"]);
        assert_eq!(seq.size(), 3);
        assert!(IterSequence::new(std::iter::empty::<u8>()).is_empty());
    }
}
