//! Lazy sequence views and eager terminal operators composed through a single pipe protocol.
//!
//! ```ignore
//! use seqpipe_rs::prelude::*;
//!
//! let top = vec![3, 9, 1, 7]
//!     .pipe(filter(|x: &i32| *x > 2))
//!     .pipe(order_descending())
//!     .pipe(first())?;
//! ```

pub use seqpipe_core_rs as sequences;
pub use seqpipe_terminal_rs as terminal;
pub use seqpipe_views_rs as views;

pub use seqpipe_core_rs::{Error, Result};

pub mod prelude {
    pub use seqpipe_core_rs::passthrough::*;
    pub use seqpipe_core_rs::{
        then, Adaptor, BidirectionalSequence, Pipe, Sequence, SequenceExt, SizedSequence,
    };
    pub use seqpipe_terminal_rs::{
        aggregate, aggregate_with_seed, all, any, average, contains, count, element_at,
        element_at_or_default, first, first_or_default, first_where, first_where_or_default,
        last, last_or_default, last_where, last_where_or_default, max, max_by_key, min,
        min_by_key, to, to_array, to_map, to_map_pairs, to_vec, Mapping, Overwrite,
    };
    pub use seqpipe_views_rs::{
        append, chunk, concat, order, order_by, order_by_descending, order_descending,
        order_with, Order,
    };
}
