use std::cell::OnceCell;
use std::fmt::{Debug, Formatter};

use itertools::Itertools;

use seqpipe_core_rs::sequence::{last_cursor_backward, rfind_cursor_backward};
use seqpipe_core_rs::{
    pipe_operator, Adaptor, BidirectionalSequence, Error, Result, Sequence, SequenceExt,
    SizedSequence,
};

use crate::order::{Ascending, ByKey, Descending, Order};

/// A deferred sort of the source.
///
/// Nothing happens at construction. The first call to `begin`, `end` or `size` drains the
/// source into an owned buffer and sorts it once; every later traversal of the same instance
/// reuses that buffer. The buffer itself is never handed out, elements are cloned out of it.
pub struct OrderedView<S: Sequence, O> {
    source: S,
    order: O,
    buffer: OnceCell<Vec<S::Item>>,
}

impl<S, O> OrderedView<S, O>
where
    S: Sequence,
    S::Item: Clone,
    O: Order<S::Item>,
{
    pub fn new(source: S, order: O) -> Self {
        Self {
            source,
            order,
            buffer: OnceCell::new(),
        }
    }

    /// Whether the source was already drained and sorted.
    pub fn is_materialized(&self) -> bool {
        self.buffer.get().is_some()
    }

    pub fn dissolve(self) -> (S, O) {
        (self.source, self.order)
    }

    fn materialized(&self) -> &[S::Item] {
        self.buffer.get_or_init(|| {
            let sorted = self
                .source
                .elements()
                .sorted_by(|a, b| self.order.compare(a, b))
                .collect_vec();
            log::debug!("Materialized an ordered view with {} elements", sorted.len());
            sorted
        })
    }
}

impl<S, O> Clone for OrderedView<S, O>
where
    S: Sequence + Clone,
    S::Item: Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            order: self.order.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl<S: Sequence + Debug, O> Debug for OrderedView<S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedView")
            .field("source", &self.source)
            .field("materialized", &self.buffer.get().map(Vec::len))
            .finish()
    }
}

impl<S, O> Sequence for OrderedView<S, O>
where
    S: Sequence,
    S::Item: Clone,
    O: Order<S::Item>,
{
    type Item = S::Item;
    type Cursor = usize;

    fn begin(&self) -> usize {
        self.materialized();
        0
    }

    fn end(&self) -> usize {
        self.materialized().len()
    }

    fn get(&self, cursor: &usize) -> Result<S::Item> {
        self.materialized()
            .get(*cursor)
            .cloned()
            .ok_or(Error::out_of_range("cannot get value at end"))
    }

    fn advance(&self, cursor: &mut usize) -> Result<()> {
        if *cursor >= self.end() {
            return Err(Error::out_of_range("cannot iterate out of end"));
        }
        *cursor += 1;
        Ok(())
    }

    fn last_cursor_in(&self, from: &usize, to: &usize) -> Result<Option<usize>> {
        last_cursor_backward(self, from, to)
    }

    fn rfind_cursor_in<P>(&self, from: &usize, to: &usize, predicate: P) -> Result<Option<usize>>
    where
        P: FnMut(&S::Item) -> bool,
    {
        rfind_cursor_backward(self, from, to, predicate)
    }
}

impl<S, O> BidirectionalSequence for OrderedView<S, O>
where
    S: Sequence,
    S::Item: Clone,
    O: Order<S::Item>,
{
    fn retreat(&self, cursor: &mut usize) -> Result<()> {
        if *cursor == 0 {
            return Err(Error::out_of_range("cannot retreat before the start"));
        }
        *cursor -= 1;
        Ok(())
    }
}

impl<S, O> SizedSequence for OrderedView<S, O>
where
    S: Sequence,
    S::Item: Clone,
    O: Order<S::Item>,
{
    fn size(&self) -> usize {
        self.materialized().len()
    }
}

pipe_operator!(impl[S: Sequence, O] OrderedView<S, O>);

#[derive(Clone, Copy, Debug, Default)]
pub struct OrderAdaptor<O> {
    order: O,
}

impl<S, O> Adaptor<S> for OrderAdaptor<O>
where
    S: Sequence,
    S::Item: Clone,
    O: Order<S::Item>,
{
    type Output = OrderedView<S, O>;

    fn apply(self, source: S) -> Self::Output {
        OrderedView::new(source, self.order)
    }
}

/// Sort in ascending natural order.
pub fn order() -> OrderAdaptor<Ascending> {
    OrderAdaptor { order: Ascending }
}

/// Sort in descending natural order.
pub fn order_descending() -> OrderAdaptor<Descending> {
    OrderAdaptor { order: Descending }
}

/// Sort by the projected key, smallest key first.
pub fn order_by<F>(key: F) -> OrderAdaptor<ByKey<F, Ascending>> {
    OrderAdaptor {
        order: ByKey::new(key, Ascending),
    }
}

/// Sort by the projected key, largest key first.
pub fn order_by_descending<F>(key: F) -> OrderAdaptor<ByKey<F, Descending>> {
    OrderAdaptor {
        order: ByKey::new(key, Descending),
    }
}

/// Sort with an arbitrary ordering relation.
pub fn order_with<O>(order: O) -> OrderAdaptor<O> {
    OrderAdaptor { order }
}
