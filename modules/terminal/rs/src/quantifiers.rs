use seqpipe_core_rs::{Adaptor, Sequence, SequenceExt};

#[derive(Clone, Copy, Debug)]
pub struct AllAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for AllAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = bool;

    fn apply(mut self, source: S) -> bool {
        source.into_elements().all(|item| (self.predicate)(&item))
    }
}

/// Whether every element satisfies the predicate. True for an empty source.
pub fn all<P>(predicate: P) -> AllAdaptor<P> {
    AllAdaptor { predicate }
}

#[derive(Clone, Copy, Debug)]
pub struct AnyAdaptor<P> {
    predicate: P,
}

impl<S, P> Adaptor<S> for AnyAdaptor<P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = bool;

    fn apply(mut self, source: S) -> bool {
        source.into_elements().any(|item| (self.predicate)(&item))
    }
}

/// Whether at least one element satisfies the predicate. False for an empty source.
pub fn any<P>(predicate: P) -> AnyAdaptor<P> {
    AnyAdaptor { predicate }
}

#[derive(Clone, Copy, Debug)]
pub struct ContainsAdaptor<T> {
    value: T,
}

impl<S, T> Adaptor<S> for ContainsAdaptor<T>
where
    S: Sequence,
    S::Item: PartialEq<T>,
{
    type Output = bool;

    fn apply(self, source: S) -> bool {
        source.into_elements().any(|item| item == self.value)
    }
}

/// Whether any element equals `value`.
pub fn contains<T>(value: T) -> ContainsAdaptor<T> {
    ContainsAdaptor { value }
}

#[cfg(test)]
mod tests {
    use seqpipe_core_rs::passthrough::range;
    use seqpipe_core_rs::Pipe;

    use super::*;

    #[test]
    fn test_all_any() {
        let numbers = vec![2, 4, 6, 7];
        assert!(!(&numbers).pipe(all(|x: &i32| x % 2 == 0)));
        assert!((&numbers).pipe(any(|x: &i32| x % 2 == 1)));
        assert!((&numbers).pipe(all(|x: &i32| *x > 0)));

        assert!(Vec::<i32>::new().pipe(all(|_: &i32| false)));
        assert!(!Vec::<i32>::new().pipe(any(|_: &i32| true)));
    }

    #[test]
    fn test_any_short_circuits() {
        let mut seen = 0;
        assert!(range(0, 100).pipe(any(|x: &i32| {
            seen += 1;
            *x == 3
        })));
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_contains() {
        let names = vec![String::from("Jake"), String::from("Emily")];
        assert!((&names).pipe(contains("Emily")));
        assert!(!(&names).pipe(contains("Alexander")));
        assert!(range(10u8, 5).pipe(contains(14u8)));
    }
}
