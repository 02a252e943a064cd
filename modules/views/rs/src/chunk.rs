use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use seqpipe_core_rs::sequence::{distance, ensure_not_at};
use seqpipe_core_rs::{
    pipe_operator, Adaptor, BidirectionalSequence, Error, Result, Sequence, SizedSequence,
};

/// Consecutive, non-overlapping chunks of `size` elements. The last chunk may be shorter.
///
/// The source lives behind an `Rc` shared with every produced [`Chunk`], so chunks are
/// sub-ranges of the source rather than copies of it.
pub struct ChunkView<S> {
    source: Rc<S>,
    size: usize,
}

impl<S: Sequence> ChunkView<S> {
    pub fn new(source: S, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid_argument("chunk size cannot be 0"));
        }
        Ok(Self {
            source: Rc::new(source),
            size,
        })
    }

    /// Requested number of elements per chunk.
    pub fn chunk_size(&self) -> usize {
        self.size
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Clone for ChunkView<S> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            size: self.size,
        }
    }
}

impl<S: Debug> Debug for ChunkView<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkView")
            .field("source", &self.source)
            .field("size", &self.size)
            .finish()
    }
}

/// Boundaries `[from, to)` of the current chunk. Equality only looks at `from`.
#[derive(Clone, Debug)]
pub struct ChunkCursor<C> {
    from: C,
    to: C,
}

impl<C: PartialEq> PartialEq for ChunkCursor<C> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
    }
}

impl<S: Sequence> Sequence for ChunkView<S> {
    type Item = Chunk<S>;
    type Cursor = ChunkCursor<S::Cursor>;

    fn begin(&self) -> Self::Cursor {
        let from = self.source.begin();
        let mut to = from.clone();
        // Only a broken source fails a bounded advance. The first chunk then ends where it
        // stopped and the next `advance` reports the failure.
        if let Err(err) = self.source.advance_up_to(&mut to, self.size) {
            log::error!("Chunk source cursor failed while bounding the first chunk: {err}");
        }
        ChunkCursor { from, to }
    }

    fn end(&self) -> Self::Cursor {
        let end = self.source.end();
        ChunkCursor {
            from: end.clone(),
            to: end,
        }
    }

    fn get(&self, cursor: &Self::Cursor) -> Result<Chunk<S>> {
        ensure_not_at(&cursor.from, &self.source.end(), "cannot get a chunk at end")?;
        Ok(Chunk {
            source: Rc::clone(&self.source),
            from: cursor.from.clone(),
            to: cursor.to.clone(),
        })
    }

    fn advance(&self, cursor: &mut Self::Cursor) -> Result<()> {
        ensure_not_at(&cursor.from, &self.source.end(), "cannot iterate out of end")?;
        cursor.from = cursor.to.clone();
        self.source.advance_up_to(&mut cursor.to, self.size)?;
        Ok(())
    }
}

impl<S: BidirectionalSequence> BidirectionalSequence for ChunkView<S> {
    fn retreat(&self, cursor: &mut Self::Cursor) -> Result<()> {
        let begin = self.source.begin();
        ensure_not_at(&cursor.from, &begin, "cannot retreat before the first chunk")?;

        // Every chunk but the last starts at a multiple of `size`, so only the trailing chunk
        // can be shorter than `size`.
        let step = if cursor.from == self.source.end() {
            match distance(&*self.source)? % self.size {
                0 => self.size,
                remainder => remainder,
            }
        } else {
            self.size
        };

        cursor.to = cursor.from.clone();
        self.source.retreat_up_to(&mut cursor.from, step)?;
        Ok(())
    }
}

impl<S: SizedSequence> SizedSequence for ChunkView<S> {
    fn size(&self) -> usize {
        self.source.size().div_ceil(self.size)
    }
}

pipe_operator!(impl[S: Sequence] ChunkView<S>);

/// A lazy sub-range `[from, to)` of a chunked source.
pub struct Chunk<S: Sequence> {
    source: Rc<S>,
    from: S::Cursor,
    to: S::Cursor,
}

impl<S: Sequence> Clone for Chunk<S> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

impl<S: Sequence> Debug for Chunk<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl<S: Sequence> Sequence for Chunk<S> {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn begin(&self) -> S::Cursor {
        self.from.clone()
    }

    fn end(&self) -> S::Cursor {
        self.to.clone()
    }

    fn get(&self, cursor: &S::Cursor) -> Result<S::Item> {
        ensure_not_at(cursor, &self.to, "cannot get value at the end of a chunk")?;
        self.source.get(cursor)
    }

    fn advance(&self, cursor: &mut S::Cursor) -> Result<()> {
        ensure_not_at(cursor, &self.to, "cannot iterate out of the end of a chunk")?;
        self.source.advance(cursor)
    }

    fn last_cursor_in(&self, from: &S::Cursor, to: &S::Cursor) -> Result<Option<S::Cursor>> {
        self.source.last_cursor_in(from, to)
    }

    fn rfind_cursor_in<P>(
        &self,
        from: &S::Cursor,
        to: &S::Cursor,
        predicate: P,
    ) -> Result<Option<S::Cursor>>
    where
        P: FnMut(&S::Item) -> bool,
    {
        self.source.rfind_cursor_in(from, to, predicate)
    }
}

impl<S: BidirectionalSequence> BidirectionalSequence for Chunk<S> {
    fn retreat(&self, cursor: &mut S::Cursor) -> Result<()> {
        ensure_not_at(cursor, &self.from, "cannot retreat before the start of a chunk")?;
        self.source.retreat(cursor)
    }
}

pipe_operator!(impl[S: Sequence] Chunk<S>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkAdaptor {
    size: usize,
}

impl<S: Sequence> Adaptor<S> for ChunkAdaptor {
    type Output = Result<ChunkView<S>>;

    fn apply(self, source: S) -> Self::Output {
        ChunkView::new(source, self.size)
    }
}

/// Split the source into chunks of `size` elements. Applying it with `size == 0` fails with
/// [`Error::InvalidArgument`].
pub fn chunk(size: usize) -> ChunkAdaptor {
    ChunkAdaptor { size }
}
