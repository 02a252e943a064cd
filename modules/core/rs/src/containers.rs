//! Sequence implementations for std containers and integer ranges.

use std::collections::VecDeque;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::num::{PrimInt, ToPrimitive};
use crate::sequence::{
    ensure_not_at, last_cursor_backward, rfind_cursor_backward, BidirectionalSequence, Sequence,
    SizedSequence,
};

/// Index-addressed containers: the cursor is the element index and `end()` is the length.
macro_rules! indexed_sequence {
    (impl[$($generics:tt)*] $container:ty, |$items:ident, $index:ident| $lookup:expr) => {
        impl<$($generics)*> Sequence for $container {
            type Item = T;
            type Cursor = usize;

            #[inline]
            fn begin(&self) -> usize {
                0
            }

            #[inline]
            fn end(&self) -> usize {
                self.len()
            }

            #[inline]
            fn get(&self, cursor: &usize) -> Result<T> {
                let ($items, $index) = (self, *cursor);
                match $lookup {
                    Some(item) => Ok(item.clone()),
                    None => Err(Error::out_of_range("cannot dereference past the end")),
                }
            }

            #[inline]
            fn advance(&self, cursor: &mut usize) -> Result<()> {
                if *cursor >= self.len() {
                    return Err(Error::out_of_range("cannot advance past the end"));
                }
                *cursor += 1;
                Ok(())
            }

            fn advance_up_to(&self, cursor: &mut usize, n: usize) -> Result<usize> {
                let steps = n.min(self.len().saturating_sub(*cursor));
                *cursor += steps;
                Ok(steps)
            }

            fn last_cursor_in(&self, from: &usize, to: &usize) -> Result<Option<usize>> {
                last_cursor_backward(self, from, to)
            }

            fn rfind_cursor_in<P>(
                &self,
                from: &usize,
                to: &usize,
                predicate: P,
            ) -> Result<Option<usize>>
            where
                P: FnMut(&T) -> bool,
            {
                rfind_cursor_backward(self, from, to, predicate)
            }
        }

        impl<$($generics)*> BidirectionalSequence for $container {
            #[inline]
            fn retreat(&self, cursor: &mut usize) -> Result<()> {
                ensure_not_at(cursor, &0, "cannot retreat before the start")?;
                *cursor -= 1;
                Ok(())
            }
        }

        impl<$($generics)*> SizedSequence for $container {
            #[inline]
            fn size(&self) -> usize {
                self.len()
            }
        }
    };
}

indexed_sequence!(impl[T: Clone] Vec<T>, |items, index| <[T]>::get(items, index));
indexed_sequence!(impl[T: Clone] [T], |items, index| <[T]>::get(items, index));
indexed_sequence!(impl[T: Clone, const N: usize] [T; N], |items, index| <[T]>::get(items, index));
indexed_sequence!(impl[T: Clone] VecDeque<T>, |items, index| VecDeque::get(items, index));

/// Half-open integer ranges. Cursors are the values themselves; a reversed range
/// (`start > end`) is treated as empty.
impl<Idx: PrimInt> Sequence for Range<Idx> {
    type Item = Idx;
    type Cursor = Idx;

    #[inline]
    fn begin(&self) -> Idx {
        self.start
    }

    #[inline]
    fn end(&self) -> Idx {
        self.end.max(self.start)
    }

    #[inline]
    fn get(&self, cursor: &Idx) -> Result<Idx> {
        if *cursor >= self.start && *cursor < self.end {
            Ok(*cursor)
        } else {
            Err(Error::out_of_range("cannot dereference outside of the range"))
        }
    }

    #[inline]
    fn advance(&self, cursor: &mut Idx) -> Result<()> {
        if *cursor >= Sequence::end(self) {
            return Err(Error::out_of_range("cannot advance past the end"));
        }
        *cursor = *cursor + Idx::one();
        Ok(())
    }

    fn last_cursor_in(&self, from: &Idx, to: &Idx) -> Result<Option<Idx>> {
        last_cursor_backward(self, from, to)
    }

    fn rfind_cursor_in<P>(&self, from: &Idx, to: &Idx, predicate: P) -> Result<Option<Idx>>
    where
        P: FnMut(&Idx) -> bool,
    {
        rfind_cursor_backward(self, from, to, predicate)
    }
}

impl<Idx: PrimInt> BidirectionalSequence for Range<Idx> {
    #[inline]
    fn retreat(&self, cursor: &mut Idx) -> Result<()> {
        ensure_not_at(cursor, &self.start, "cannot retreat before the start")?;
        *cursor = *cursor - Idx::one();
        Ok(())
    }
}

impl<Idx: PrimInt> SizedSequence for Range<Idx> {
    fn size(&self) -> usize {
        let end = Sequence::end(self);
        match (self.start.to_i128(), end.to_i128()) {
            (Some(start), Some(end)) => usize::try_from(end - start).unwrap_or(usize::MAX),
            // Only u128 bounds fall outside i128, and `end >= start` keeps the difference
            // non-negative there.
            _ => (end - self.start).to_usize().unwrap_or(usize::MAX),
        }
    }
}
