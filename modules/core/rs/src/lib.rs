//! Sequence abstraction and composition protocol shared by every `seqpipe` module.
//!
//! A [`Sequence`] is a multi-pass source addressed through cursors. Views wrap sequences and
//! are sequences themselves; terminal operators consume them. Both are [`Adaptor`]s applied
//! through [`Pipe::pipe`].

pub use elements::{Elements, SequenceExt, SharedElements, TryElements};
pub use error::{Error, Result};
pub use iter_sequence::{IterCursor, IterSequence};
pub use pipe::{then, Adaptor, Pipe, Then};
pub use sequence::{BidirectionalSequence, Sequence, SizedSequence};

mod containers;
mod elements;
mod error;
mod iter_sequence;
pub mod num;
pub mod passthrough;
mod pipe;
pub mod sequence;
