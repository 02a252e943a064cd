use seqpipe_core_rs::num::{Numeric, ToPrimitive};
use seqpipe_core_rs::sequence::distance;
use seqpipe_core_rs::{Adaptor, Error, Result, Sequence, SequenceExt};

#[derive(Clone, Copy, Debug)]
pub struct AggregateAdaptor<F> {
    func: F,
}

impl<S, F> Adaptor<S> for AggregateAdaptor<F>
where
    S: Sequence,
    S::Item: Default,
    F: FnMut(S::Item, S::Item) -> S::Item,
{
    type Output = S::Item;

    fn apply(self, source: S) -> S::Item {
        source.into_elements().fold(S::Item::default(), self.func)
    }
}

/// Fold the elements starting from the default value of the element type.
pub fn aggregate<F>(func: F) -> AggregateAdaptor<F> {
    AggregateAdaptor { func }
}

#[derive(Clone, Copy, Debug)]
pub struct AggregateWithSeedAdaptor<A, F> {
    seed: A,
    func: F,
}

impl<S, A, F> Adaptor<S> for AggregateWithSeedAdaptor<A, F>
where
    S: Sequence,
    F: FnMut(A, S::Item) -> A,
{
    type Output = A;

    fn apply(self, source: S) -> A {
        source.into_elements().fold(self.seed, self.func)
    }
}

/// Fold the elements into an accumulator of any type, starting from `seed`.
pub fn aggregate_with_seed<A, F>(seed: A, func: F) -> AggregateWithSeedAdaptor<A, F> {
    AggregateWithSeedAdaptor { seed, func }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CountAdaptor;

impl<S: Sequence> Adaptor<S> for CountAdaptor {
    type Output = usize;

    fn apply(self, source: S) -> usize {
        source.into_elements().count()
    }
}

/// Number of elements.
pub fn count() -> CountAdaptor {
    CountAdaptor
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AverageAdaptor;

impl<S> Adaptor<S> for AverageAdaptor
where
    S: Sequence,
    S::Item: Numeric,
{
    type Output = Result<f64>;

    fn apply(self, source: S) -> Result<f64> {
        let mut sum = 0.0;
        for item in source.try_elements() {
            let item = item?;
            sum += item.to_f64().ok_or_else(|| {
                Error::invalid_argument(format!("{item:?} can't be represented as f64"))
            })?;
        }

        match distance(&source)? {
            0 => Err(Error::EmptySequence),
            length => Ok(sum / length as f64),
        }
    }
}

/// Arithmetic mean of the elements.
///
/// Takes two passes over the source (sum, then length), so the source must be restartable.
/// Fails with [`Error::EmptySequence`] on an empty source.
pub fn average() -> AverageAdaptor {
    AverageAdaptor
}
