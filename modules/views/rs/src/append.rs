use derive_getters::{Dissolve, Getters};

use seqpipe_core_rs::sequence::ensure_not_at;
use seqpipe_core_rs::{
    pipe_operator, Adaptor, BidirectionalSequence, Error, Result, Sequence, SizedSequence,
};

/// Phase of an [`AppendCursor`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AppendPosition {
    /// Pointing at an element of the source sequence.
    InRange,
    /// Pointing at the appended value.
    InAppend,
    /// Past the appended value.
    InEnd,
}

/// All elements of the source followed by exactly one extra value.
#[derive(Clone, Debug, PartialEq, Eq, Dissolve)]
pub struct AppendView<S, T> {
    source: S,
    value: T,
}

impl<S, T> AppendView<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    pub fn new(source: S, value: T) -> Self {
        Self { source, value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Source cursor plus the phase tag. Two cursors are equal iff both parts are equal.
#[derive(Clone, Debug, PartialEq, Eq, Getters, Dissolve)]
pub struct AppendCursor<C> {
    inner: C,
    position: AppendPosition,
}

impl<S, T> Sequence for AppendView<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;
    type Cursor = AppendCursor<S::Cursor>;

    fn begin(&self) -> Self::Cursor {
        let inner = self.source.begin();
        let position = if inner == self.source.end() {
            AppendPosition::InAppend
        } else {
            AppendPosition::InRange
        };
        AppendCursor { inner, position }
    }

    fn end(&self) -> Self::Cursor {
        AppendCursor {
            inner: self.source.end(),
            position: AppendPosition::InEnd,
        }
    }

    fn get(&self, cursor: &Self::Cursor) -> Result<T> {
        match cursor.position {
            AppendPosition::InRange => self.source.get(&cursor.inner),
            AppendPosition::InAppend => Ok(self.value.clone()),
            AppendPosition::InEnd => Err(Error::out_of_range("cannot get value at end")),
        }
    }

    fn advance(&self, cursor: &mut Self::Cursor) -> Result<()> {
        match cursor.position {
            AppendPosition::InRange => {
                self.source.advance(&mut cursor.inner)?;
                if cursor.inner == self.source.end() {
                    cursor.position = AppendPosition::InAppend;
                }
            }
            AppendPosition::InAppend => cursor.position = AppendPosition::InEnd,
            AppendPosition::InEnd => return Err(Error::out_of_range("cannot iterate out of end")),
        }
        Ok(())
    }

    /// The appended value is always last.
    fn last_cursor(&self) -> Result<Option<Self::Cursor>> {
        Ok(Some(AppendCursor {
            inner: self.source.end(),
            position: AppendPosition::InAppend,
        }))
    }

    fn rfind_cursor<P>(&self, mut predicate: P) -> Result<Option<Self::Cursor>>
    where
        P: FnMut(&T) -> bool,
    {
        if predicate(&self.value) {
            return self.last_cursor();
        }
        let found = self.source.rfind_cursor(predicate)?;
        Ok(found.map(|inner| AppendCursor {
            inner,
            position: AppendPosition::InRange,
        }))
    }
}

impl<S, T> BidirectionalSequence for AppendView<S, T>
where
    S: BidirectionalSequence<Item = T>,
    T: Clone,
{
    fn retreat(&self, cursor: &mut Self::Cursor) -> Result<()> {
        match cursor.position {
            AppendPosition::InEnd => cursor.position = AppendPosition::InAppend,
            AppendPosition::InAppend => {
                ensure_not_at(
                    &self.source.begin(),
                    &self.source.end(),
                    "cannot retreat before the start",
                )?;
                cursor.inner = self.source.end();
                self.source.retreat(&mut cursor.inner)?;
                cursor.position = AppendPosition::InRange;
            }
            AppendPosition::InRange => {
                ensure_not_at(
                    &cursor.inner,
                    &self.source.begin(),
                    "cannot retreat before the start",
                )?;
                self.source.retreat(&mut cursor.inner)?;
            }
        }
        Ok(())
    }
}

impl<S, T> SizedSequence for AppendView<S, T>
where
    S: SizedSequence<Item = T>,
    T: Clone,
{
    fn size(&self) -> usize {
        self.source.size() + 1
    }
}

pipe_operator!(impl[S, T] AppendView<S, T>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppendAdaptor<T> {
    value: T,
}

impl<S, T> Adaptor<S> for AppendAdaptor<T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Output = AppendView<S, T>;

    fn apply(self, source: S) -> Self::Output {
        AppendView::new(source, self.value)
    }
}

/// Yield every element of the source, then `value`.
pub fn append<T>(value: T) -> AppendAdaptor<T> {
    AppendAdaptor { value }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use itertools::Itertools;

    use seqpipe_core_rs::{Pipe, SequenceExt};

    use super::*;

    #[test]
    fn test_append_yields_source_then_value() {
        let view = vec![1, 2].pipe(append(0));
        assert_eq!(view.elements().collect_vec(), vec![1, 2, 0]);
        assert_eq!(view.size(), 3);
    }

    #[test]
    fn test_append_to_empty_source() {
        let view = Vec::<i32>::new().pipe(append(7));
        assert_eq!(view.begin().position(), &AppendPosition::InAppend);
        assert_eq!(view.elements().collect_vec(), vec![7]);
    }

    #[test]
    fn test_append_state_machine() -> Result<()> {
        let source = vec!['a'];
        let view = (&source).pipe(append('z'));

        let mut cursor = view.begin();
        assert_eq!(cursor.position(), &AppendPosition::InRange);
        assert_eq!(view.get(&cursor)?, 'a');

        view.advance(&mut cursor)?;
        assert_eq!(cursor.position(), &AppendPosition::InAppend);
        assert_eq!(view.get(&cursor)?, 'z');

        view.advance(&mut cursor)?;
        assert_eq!(cursor, view.end());

        assert!(matches!(
            view.get(&cursor),
            Err(Error::IterationOutOfRange { .. })
        ));
        assert!(matches!(
            view.advance(&mut cursor),
            Err(Error::IterationOutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_append_backward_traversal() -> Result<()> {
        let view = vec![1, 2, 3].pipe(append(4));
        assert_eq!(view.elements().rev().collect_vec(), vec![4, 3, 2, 1]);

        let mut cursor = view.begin();
        assert!(view.retreat(&mut cursor).is_err());

        let empty = Vec::<i32>::new().pipe(append(4));
        let mut cursor = empty.end();
        empty.retreat(&mut cursor)?;
        assert_eq!(cursor, empty.begin());
        assert!(empty.retreat(&mut cursor).is_err());
        Ok(())
    }

    #[test]
    fn test_append_composes_with_itself() {
        let view = vec![1].pipe(append(2)) | append(3);
        assert_eq!(view.elements().collect_vec(), vec![1, 2, 3]);
        assert_eq!(view.last_cursor().ok().flatten().map(|c| view.get(&c).ok()), Some(Some(3)));
        assert_eq!(view.dissolve().1, 3);
    }

    #[test]
    fn test_append_rfind() -> Result<()> {
        let view = vec![5, 8, 1].pipe(append(2));
        let found = view.rfind_cursor(|x| *x > 4)?.expect("match");
        assert_eq!(found.position(), &AppendPosition::InRange);
        assert_eq!(view.get(&found)?, 8);
        assert_eq!(view.rfind_cursor(|x| *x == 2)?, view.last_cursor()?);
        assert_eq!(view.rfind_cursor(|x| *x > 100)?, None);
        Ok(())
    }
}
