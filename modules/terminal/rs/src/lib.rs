//! Eager terminal operators.
//!
//! Each operator is an [`Adaptor`](seqpipe_core_rs::Adaptor) that drives the traversal of its
//! source immediately when applied. Operators with a failure mode return
//! [`Result`](seqpipe_core_rs::Result); the `*_or_default` family returns `Option` instead.

pub use convert::{
    to, to_array, to_map, to_map_pairs, to_vec, Mapping, Overwrite, ToAdaptor, ToArrayAdaptor,
    ToMapAdaptor, ToMapPairsAdaptor,
};
pub use extrema::{
    max, max_by_key, min, min_by_key, MaxAdaptor, MaxByKeyAdaptor, MinAdaptor, MinByKeyAdaptor,
};
pub use fold::{
    aggregate, aggregate_with_seed, average, count, AggregateAdaptor, AggregateWithSeedAdaptor,
    AverageAdaptor, CountAdaptor,
};
pub use quantifiers::{all, any, contains, AllAdaptor, AnyAdaptor, ContainsAdaptor};
pub use search::{
    element_at, element_at_or_default, first, first_or_default, first_where,
    first_where_or_default, last, last_or_default, last_where, last_where_or_default,
    ElementAtAdaptor, ElementAtOrDefaultAdaptor, FirstAdaptor, FirstOrDefaultAdaptor,
    FirstWhereAdaptor, FirstWhereOrDefaultAdaptor, LastAdaptor, LastOrDefaultAdaptor,
    LastWhereAdaptor, LastWhereOrDefaultAdaptor,
};

mod convert;
mod extrema;
mod fold;
mod quantifiers;
mod search;
