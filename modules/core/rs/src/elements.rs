use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::sequence::{BidirectionalSequence, Sequence};

/// A std iterator over the elements of a [`Sequence`], driven by a front and a back cursor.
///
/// Cursor failures before the two cursors meet can only come from a broken `Sequence`
/// implementation. They are logged and end the iteration.
pub struct Elements<S: Sequence> {
    seq: S,
    front: S::Cursor,
    back: S::Cursor,
}

impl<S: Sequence> Elements<S> {
    pub fn new(seq: S) -> Self {
        let front = seq.begin();
        let back = seq.end();
        Self { seq, front, back }
    }

    /// The underlying sequence.
    pub fn sequence(&self) -> &S {
        &self.seq
    }

    fn stop(&mut self, err: crate::Error) {
        log::error!("Sequence cursor failed before reaching the end: {err}");
        self.front = self.back.clone();
    }
}

impl<S: Sequence + Clone> Clone for Elements<S> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<S: Sequence> Debug for Elements<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elements")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

impl<S: Sequence> Iterator for Elements<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let item = match self.seq.get(&self.front) {
            Ok(item) => item,
            Err(err) => {
                self.stop(err);
                return None;
            }
        };
        if let Err(err) = self.seq.advance(&mut self.front) {
            self.stop(err);
        }
        Some(item)
    }
}

impl<S: BidirectionalSequence> DoubleEndedIterator for Elements<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        if let Err(err) = self.seq.retreat(&mut self.back) {
            self.stop(err);
            return None;
        }
        match self.seq.get(&self.back) {
            Ok(item) => Some(item),
            Err(err) => {
                self.stop(err);
                None
            }
        }
    }
}

/// [`Elements`] over a shared sequence that asks the sequence for its cursors only on the first
/// step, so building an iterator chain on top of it does no work upstream.
pub struct SharedElements<S: Sequence> {
    seq: Rc<S>,
    started: Option<Elements<Rc<S>>>,
}

impl<S: Sequence> SharedElements<S> {
    pub fn new(seq: Rc<S>) -> Self {
        Self { seq, started: None }
    }

    /// Whether the cursors were already requested.
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    fn started(&mut self) -> &mut Elements<Rc<S>> {
        let seq = &self.seq;
        self.started.get_or_insert_with(|| Elements::new(Rc::clone(seq)))
    }
}

impl<S: Sequence> Clone for SharedElements<S> {
    fn clone(&self) -> Self {
        Self {
            seq: Rc::clone(&self.seq),
            started: self.started.clone(),
        }
    }
}

impl<S: Sequence> Debug for SharedElements<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedElements")
            .field("started", &self.started)
            .finish()
    }
}

impl<S: Sequence> Iterator for SharedElements<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.started().next()
    }
}

impl<S: BidirectionalSequence> DoubleEndedIterator for SharedElements<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.started().next_back()
    }
}

/// A forward iterator that reports cursor failures instead of swallowing them: it yields the
/// error once and then stops.
pub struct TryElements<S: Sequence> {
    seq: S,
    cursor: Option<S::Cursor>,
    end: S::Cursor,
}

impl<S: Sequence> Iterator for TryElements<S> {
    type Item = crate::Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        if *cursor == self.end {
            self.cursor = None;
            return None;
        }

        let step = self
            .seq
            .get(cursor)
            .and_then(|item| self.seq.advance(cursor).map(|()| item));
        if step.is_err() {
            self.cursor = None;
        }
        Some(step)
    }
}

/// Iterator conversions available on every sequence.
pub trait SequenceExt: Sequence {
    /// Iterate over the elements, borrowing the sequence.
    fn elements(&self) -> Elements<&Self> {
        Elements::new(self)
    }

    /// Iterate over the elements, taking ownership of the sequence.
    fn into_elements(self) -> Elements<Self>
    where
        Self: Sized,
    {
        Elements::new(self)
    }

    /// Iterate over the elements of a shared sequence. The iterator is cheap to clone and
    /// doesn't touch the sequence until it is stepped.
    fn into_shared_elements(self) -> SharedElements<Self>
    where
        Self: Sized,
    {
        SharedElements::new(Rc::new(self))
    }

    /// Iterate over `Result`s of the elements, borrowing the sequence.
    fn try_elements(&self) -> TryElements<&Self> {
        TryElements {
            seq: self,
            cursor: Some(self.begin()),
            end: self.end(),
        }
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}
