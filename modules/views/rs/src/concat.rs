use derive_getters::{Dissolve, Getters};

use seqpipe_core_rs::sequence::ensure_not_at;
use seqpipe_core_rs::{
    pipe_operator, Adaptor, BidirectionalSequence, Error, Result, Sequence, SizedSequence,
};

/// All elements of `first`, then all elements of `second`.
#[derive(Clone, Debug, PartialEq, Eq, Dissolve)]
pub struct ConcatView<A, B> {
    first: A,
    second: B,
}

impl<A, B> ConcatView<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

/// One cursor into each source plus the "in second sequence" flag.
///
/// The second cursor is `None` until the first source is exhausted, and again once the
/// second source is, so neither `begin` nor `end` of the view touch the second source.
#[derive(Clone, Debug, Getters, Dissolve)]
pub struct ConcatCursor<CA, CB> {
    first: CA,
    second: Option<CB>,
    in_second: bool,
}

impl<CA: PartialEq, CB: PartialEq> PartialEq for ConcatCursor<CA, CB> {
    fn eq(&self, other: &Self) -> bool {
        match (self.in_second, other.in_second) {
            (true, true) => self.second == other.second,
            (false, false) => self.first == other.first,
            _ => false,
        }
    }
}

impl<A, B> ConcatView<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    fn in_first(&self, first: A::Cursor) -> ConcatCursor<A::Cursor, B::Cursor> {
        ConcatCursor {
            first,
            second: None,
            in_second: false,
        }
    }

    /// `second` must not be the end of the second source.
    fn in_second(&self, second: B::Cursor) -> ConcatCursor<A::Cursor, B::Cursor> {
        ConcatCursor {
            first: self.first.end(),
            second: Some(second),
            in_second: true,
        }
    }

    fn exhausted(&self) -> ConcatCursor<A::Cursor, B::Cursor> {
        ConcatCursor {
            first: self.first.end(),
            second: None,
            in_second: true,
        }
    }

    fn enter_second(&self) -> ConcatCursor<A::Cursor, B::Cursor> {
        let second = self.second.begin();
        if second == self.second.end() {
            self.exhausted()
        } else {
            self.in_second(second)
        }
    }

    /// Last element of the first source, reached from the start of the second one.
    fn cross_back(&self) -> Result<ConcatCursor<A::Cursor, B::Cursor>>
    where
        A: BidirectionalSequence,
    {
        let mut first = self.first.end();
        ensure_not_at(&first, &self.first.begin(), "cannot retreat before the start")?;
        self.first.retreat(&mut first)?;
        Ok(self.in_first(first))
    }
}

impl<A, B> Sequence for ConcatView<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor = ConcatCursor<A::Cursor, B::Cursor>;

    fn begin(&self) -> Self::Cursor {
        let first = self.first.begin();
        if first == self.first.end() {
            self.enter_second()
        } else {
            self.in_first(first)
        }
    }

    fn end(&self) -> Self::Cursor {
        self.exhausted()
    }

    fn get(&self, cursor: &Self::Cursor) -> Result<A::Item> {
        match (&cursor.second, cursor.in_second) {
            (_, false) => self.first.get(&cursor.first),
            (Some(second), true) => self.second.get(second),
            (None, true) => Err(Error::out_of_range("cannot get value at end")),
        }
    }

    fn advance(&self, cursor: &mut Self::Cursor) -> Result<()> {
        if cursor.in_second {
            let Some(second) = cursor.second.as_mut() else {
                return Err(Error::out_of_range("cannot iterate out of end"));
            };
            self.second.advance(second)?;
            if *second == self.second.end() {
                cursor.second = None;
            }
            return Ok(());
        }

        self.first.advance(&mut cursor.first)?;
        if cursor.first == self.first.end() {
            *cursor = self.enter_second();
        }
        Ok(())
    }

    fn last_cursor(&self) -> Result<Option<Self::Cursor>> {
        if let Some(second) = self.second.last_cursor()? {
            return Ok(Some(self.in_second(second)));
        }
        Ok(self.first.last_cursor()?.map(|first| self.in_first(first)))
    }

    fn rfind_cursor<P>(&self, mut predicate: P) -> Result<Option<Self::Cursor>>
    where
        P: FnMut(&A::Item) -> bool,
    {
        if let Some(second) = self.second.rfind_cursor(&mut predicate)? {
            return Ok(Some(self.in_second(second)));
        }
        Ok(self
            .first
            .rfind_cursor(predicate)?
            .map(|first| self.in_first(first)))
    }
}

impl<A, B> BidirectionalSequence for ConcatView<A, B>
where
    A: BidirectionalSequence,
    B: BidirectionalSequence<Item = A::Item>,
{
    fn retreat(&self, cursor: &mut Self::Cursor) -> Result<()> {
        if !cursor.in_second {
            ensure_not_at(
                &cursor.first,
                &self.first.begin(),
                "cannot retreat before the start",
            )?;
            return self.first.retreat(&mut cursor.first);
        }

        let mut second = match &cursor.second {
            Some(second) => second.clone(),
            None => self.second.end(),
        };
        if second == self.second.begin() {
            // Crossing the boundary back into the first source.
            *cursor = self.cross_back()?;
            return Ok(());
        }
        self.second.retreat(&mut second)?;
        *cursor = self.in_second(second);
        Ok(())
    }
}

impl<A, B> SizedSequence for ConcatView<A, B>
where
    A: SizedSequence,
    B: SizedSequence<Item = A::Item>,
{
    fn size(&self) -> usize {
        self.first.size() + self.second.size()
    }
}

pipe_operator!(impl[A, B] ConcatView<A, B>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcatAdaptor<B> {
    other: B,
}

impl<A, B> Adaptor<A> for ConcatAdaptor<B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Output = ConcatView<A, B>;

    fn apply(self, source: A) -> Self::Output {
        ConcatView::new(source, self.other)
    }
}

/// Yield every element of the source, then every element of `other`.
pub fn concat<B: Sequence>(other: B) -> ConcatAdaptor<B> {
    ConcatAdaptor { other }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use itertools::Itertools;

    use seqpipe_core_rs::{IterSequence, Pipe, SequenceExt};

    use super::*;
    use crate::ordered::order;

    #[test]
    fn test_concat_two_vectors() {
        let view = vec![1, 2, 3].pipe(concat(vec![4, 5]));
        assert_eq!(view.elements().collect_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.size(), 5);
    }

    #[test]
    fn test_concat_with_empty_parts() {
        let empty = Vec::<i32>::new();
        let data = vec![7, 8];

        let cases = [
            ((&empty).pipe(concat(&data)), vec![7, 8]),
            ((&data).pipe(concat(&empty)), vec![7, 8]),
            ((&empty).pipe(concat(&empty)), vec![]),
        ];
        for (view, expected) in cases {
            assert_eq!(view.elements().collect_vec(), expected);
            assert_eq!(
                view.elements().rev().collect_vec(),
                expected.into_iter().rev().collect_vec()
            );
        }

        let view = (&empty).pipe(concat(&data));
        assert!(*view.begin().in_second());
        assert!((&empty).pipe(concat(&empty)).is_empty());
    }

    #[test]
    fn test_concat_mixed_sources() {
        let head = vec![1u32, 2];
        let view = (&head).pipe(concat(10..13u32)) | concat(IterSequence::new([20u32, 21]));
        assert_eq!(view.elements().collect_vec(), vec![1, 2, 10, 11, 12, 20, 21]);
    }

    #[test]
    fn test_concat_cursor_equality() {
        let cursor = |first, second, in_second| ConcatCursor {
            first,
            second,
            in_second,
        };
        let a = cursor(1, None, false);
        let b = cursor(1, Some(5), false);
        let c = cursor(9, Some(5), true);
        let d = cursor(1, Some(5), true);
        let e = cursor(1, None, true);

        assert_eq!(a, b);
        assert_eq!(c, d);
        assert_ne!(b, d);
        assert_ne!(d, e);
    }

    #[test]
    fn test_concat_defers_second_source() {
        let view = vec![1, 2, 3].pipe(concat(vec![9, 7, 8].pipe(order())));
        assert_eq!(view.elements().take(2).collect_vec(), vec![1, 2]);
        assert!(!view.second().is_materialized());

        assert_eq!(view.begin(), view.begin());
        assert_ne!(view.begin(), view.end());
        assert!(!view.second().is_materialized());

        assert_eq!(view.elements().collect_vec(), vec![1, 2, 3, 7, 8, 9]);
        assert!(view.second().is_materialized());
    }

    #[test]
    fn test_concat_backward_across_boundary() -> Result<()> {
        let view = vec!['a', 'b'].pipe(concat(vec!['c']));
        assert_eq!(view.elements().rev().collect::<String>(), "cba");

        let mut cursor = view.end();
        view.retreat(&mut cursor)?;
        view.retreat(&mut cursor)?;
        assert!(!cursor.in_second());
        assert_eq!(view.get(&cursor)?, 'b');

        view.retreat(&mut cursor)?;
        assert_eq!(cursor, view.begin());
        assert!(matches!(
            view.retreat(&mut cursor),
            Err(Error::IterationOutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_concat_end_cursor_fails() {
        let view = vec![1].pipe(concat(vec![2]));
        let mut cursor = view.end();
        assert!(view.get(&cursor).is_err());
        assert!(view.advance(&mut cursor).is_err());
    }

    #[test]
    fn test_concat_last_and_rfind() -> Result<()> {
        let view = vec![1, 6, 2].pipe(concat(vec![3, 4]));
        let last = view.last_cursor()?.expect("non-empty");
        assert_eq!(view.get(&last)?, 4);

        let found = view.rfind_cursor(|x| *x > 5)?.expect("match");
        assert!(!found.in_second());
        assert_eq!(view.get(&found)?, 6);

        let tail_empty = vec![1, 2].pipe(concat(Vec::new()));
        let last = tail_empty.last_cursor()?.expect("non-empty");
        assert_eq!(tail_empty.get(&last)?, 2);
        Ok(())
    }
}
