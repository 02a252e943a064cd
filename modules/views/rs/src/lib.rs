//! Stateful lazy views: append, chunk, concat and deferred ordering.
//!
//! Every view is itself a [`Sequence`](seqpipe_core_rs::Sequence), so views compose with
//! views and with the pass-through adaptors of the core module.

pub use append::{append, AppendAdaptor, AppendCursor, AppendPosition, AppendView};
pub use chunk::{chunk, Chunk, ChunkAdaptor, ChunkCursor, ChunkView};
pub use concat::{concat, ConcatAdaptor, ConcatCursor, ConcatView};
pub use order::{Ascending, ByKey, Descending, Order};
pub use ordered::{
    order, order_by, order_by_descending, order_descending, order_with, OrderAdaptor,
    OrderedView,
};

mod append;
mod chunk;
mod concat;
mod order;
mod ordered;
