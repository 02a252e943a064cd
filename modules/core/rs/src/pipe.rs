//! The composition protocol: `source.pipe(adaptor)`.
//!
//! An adaptor is an immutable bundle of parameters plus a single evaluation rule. Lazy
//! adaptors return a new view, eager (terminal) adaptors run immediately and return a value;
//! both are applied the same way, so pipelines read left-to-right.

use derive_getters::Dissolve;
use derive_more::Constructor;

/// A single transformation step applicable to a source of type `S`.
pub trait Adaptor<S> {
    type Output;

    fn apply(self, source: S) -> Self::Output;
}

/// Method-call form of the composition protocol, available on every type.
pub trait Pipe: Sized {
    #[inline]
    fn pipe<A: Adaptor<Self>>(self, adaptor: A) -> A::Output {
        adaptor.apply(self)
    }
}

impl<T> Pipe for T {}

/// Two adaptors applied one after another. Created via [`then`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Constructor, Dissolve)]
pub struct Then<First, Second> {
    first: First,
    second: Second,
}

impl<S, First, Second> Adaptor<S> for Then<First, Second>
where
    First: Adaptor<S>,
    Second: Adaptor<First::Output>,
{
    type Output = Second::Output;

    #[inline]
    fn apply(self, source: S) -> Self::Output {
        self.second.apply(self.first.apply(source))
    }
}

/// Compose two adaptors into one that applies `first`, then `second`.
pub fn then<First, Second>(first: First, second: Second) -> Then<First, Second> {
    Then::new(first, second)
}

/// Implement `source | adaptor` for a sequence type defined in this workspace.
///
/// ```ignore
/// pipe_operator!(impl[S, T] AppendView<S, T>);
/// ```
#[macro_export]
macro_rules! pipe_operator {
    (impl[$($generics:tt)*] $target:ty) => {
        impl<$($generics)*, __Adaptor> ::std::ops::BitOr<__Adaptor> for $target
        where
            __Adaptor: $crate::Adaptor<$target>,
        {
            type Output = <__Adaptor as $crate::Adaptor<$target>>::Output;

            #[inline]
            fn bitor(self, adaptor: __Adaptor) -> Self::Output {
                $crate::Adaptor::apply(adaptor, self)
            }
        }
    };
}
