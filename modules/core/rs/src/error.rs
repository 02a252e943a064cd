use derive_more::{Display, Error};

/// Failures reported by sequences, views and terminal operators.
///
/// All of them surface synchronously at the call that triggers them. Callers that want
/// non-failing semantics should use the `*_or_default` operators instead of matching on
/// these variants.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// A construction-time parameter violates a precondition (e.g. a chunk size of zero).
    #[display("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// An operator that needs at least one element was given none.
    #[display("sequence is empty")]
    EmptySequence,

    /// A predicate-qualified search found no matching element.
    #[display("no element satisfies the predicate")]
    ItemNotFound,

    /// A cursor was dereferenced, advanced or retreated past its logical bounds.
    #[display("iteration out of range: {reason}")]
    IterationOutOfRange { reason: &'static str },

    /// A positional lookup asked for an element beyond the end of a non-empty sequence.
    #[display("position {position} is out of range for a sequence of length {length}")]
    PositionOutOfRange { position: usize, length: usize },

    /// Two elements projected onto the same key while building a mapping.
    #[display("duplicate key in the target mapping")]
    DuplicateKey,
}

impl Error {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn out_of_range(reason: &'static str) -> Self {
        Error::IterationOutOfRange { reason }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::invalid_argument("chunk size must be positive").to_string(),
            "invalid argument: chunk size must be positive"
        );
        assert_eq!(
            Error::PositionOutOfRange {
                position: 7,
                length: 3
            }
            .to_string(),
            "position 7 is out of range for a sequence of length 3"
        );
        assert_eq!(Error::EmptySequence.to_string(), "sequence is empty");
    }

    #[test]
    fn test_error_converts_into_report() {
        fn fails() -> eyre::Result<()> {
            Err(Error::ItemNotFound)?;
            Ok(())
        }

        let report = fails().unwrap_err();
        assert_eq!(
            report.downcast_ref::<Error>(),
            Some(&Error::ItemNotFound)
        );
    }
}
