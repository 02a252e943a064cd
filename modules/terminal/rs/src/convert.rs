use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use derive_more::{Deref, DerefMut, From};

use seqpipe_core_rs::{Adaptor, Error, Result, Sequence, SequenceExt};

/// A key/value container that conversions can fill.
pub trait Mapping<K, V>: Default {
    /// Insert a new entry. Fails with [`Error::DuplicateKey`] when the key is already taken,
    /// leaving the existing entry untouched.
    fn insert_new(&mut self, key: K, value: V) -> Result<()>;

    /// Insert an entry, replacing whatever was stored under the key.
    fn insert_or_replace(&mut self, key: K, value: V);
}

impl<K, V, H> Mapping<K, V> for HashMap<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher + Default,
{
    fn insert_new(&mut self, key: K, value: V) -> Result<()> {
        match self.entry(key) {
            hash_map::Entry::Occupied(_) => Err(Error::DuplicateKey),
            hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    fn insert_or_replace(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Ord, V> Mapping<K, V> for BTreeMap<K, V> {
    fn insert_new(&mut self, key: K, value: V) -> Result<()> {
        match self.entry(key) {
            btree_map::Entry::Occupied(_) => Err(Error::DuplicateKey),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    fn insert_or_replace(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Wraps a mapping so that colliding keys overwrite earlier entries instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, From)]
pub struct Overwrite<M>(pub M);

impl<M> Overwrite<M> {
    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<K, V, M: Mapping<K, V>> Mapping<K, V> for Overwrite<M> {
    fn insert_new(&mut self, key: K, value: V) -> Result<()> {
        self.0.insert_or_replace(key, value);
        Ok(())
    }

    fn insert_or_replace(&mut self, key: K, value: V) {
        self.0.insert_or_replace(key, value);
    }
}

pub struct ToAdaptor<C> {
    _target: PhantomData<fn() -> C>,
}

impl<C> Clone for ToAdaptor<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ToAdaptor<C> {}

impl<S, C> Adaptor<S> for ToAdaptor<C>
where
    S: Sequence,
    C: FromIterator<S::Item>,
{
    type Output = C;

    fn apply(self, source: S) -> C {
        source.into_elements().collect()
    }
}

/// Collect the elements into any `FromIterator` container.
pub fn to<C>() -> ToAdaptor<C> {
    ToAdaptor {
        _target: PhantomData,
    }
}

/// Collect the elements into a `Vec`.
pub fn to_vec<T>() -> ToAdaptor<Vec<T>> {
    to()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ToArrayAdaptor<const N: usize>;

impl<S, const N: usize> Adaptor<S> for ToArrayAdaptor<N>
where
    S: Sequence,
{
    type Output = Result<[S::Item; N]>;

    fn apply(self, source: S) -> Self::Output {
        let items = source.try_elements().collect::<Result<Vec<_>>>()?;
        items.try_into().map_err(|items: Vec<_>| {
            Error::invalid_argument(format!(
                "expected exactly {N} elements, the sequence has {}",
                items.len()
            ))
        })
    }
}

/// Collect exactly `N` elements into an array. Any other length is an
/// [`Error::InvalidArgument`].
pub fn to_array<const N: usize>() -> ToArrayAdaptor<N> {
    ToArrayAdaptor
}

pub struct ToMapAdaptor<M, KF, VF> {
    key: KF,
    value: VF,
    _target: PhantomData<fn() -> M>,
}

impl<M, KF: Clone, VF: Clone> Clone for ToMapAdaptor<M, KF, VF> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            _target: PhantomData,
        }
    }
}

impl<S, M, KF, VF, K, V> Adaptor<S> for ToMapAdaptor<M, KF, VF>
where
    S: Sequence,
    M: Mapping<K, V>,
    KF: FnMut(&S::Item) -> K,
    VF: FnMut(S::Item) -> V,
{
    type Output = Result<M>;

    fn apply(mut self, source: S) -> Result<M> {
        let mut mapping = M::default();
        for item in source.try_elements() {
            let item = item?;
            let key = (self.key)(&item);
            mapping.insert_new(key, (self.value)(item))?;
        }
        Ok(mapping)
    }
}

/// Build a mapping from a key projection and a value projection of every element.
///
/// The target type is picked by the caller. `HashMap` and `BTreeMap` fail with
/// [`Error::DuplicateKey`] on the first colliding key; wrap them in [`Overwrite`] to keep the
/// last value instead.
pub fn to_map<M, KF, VF>(key: KF, value: VF) -> ToMapAdaptor<M, KF, VF> {
    ToMapAdaptor {
        key,
        value,
        _target: PhantomData,
    }
}

pub struct ToMapPairsAdaptor<M, F> {
    selector: F,
    _target: PhantomData<fn() -> M>,
}

impl<M, F: Clone> Clone for ToMapPairsAdaptor<M, F> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            _target: PhantomData,
        }
    }
}

impl<S, M, F, K, V> Adaptor<S> for ToMapPairsAdaptor<M, F>
where
    S: Sequence,
    M: Mapping<K, V>,
    F: FnMut(S::Item) -> (K, V),
{
    type Output = Result<M>;

    fn apply(mut self, source: S) -> Result<M> {
        let mut mapping = M::default();
        for item in source.try_elements() {
            let (key, value) = (self.selector)(item?);
            mapping.insert_new(key, value)?;
        }
        Ok(mapping)
    }
}

/// Build a mapping from `(key, value)` pairs produced by the selector. Collisions are handled
/// as in [`to_map`].
pub fn to_map_pairs<M, F>(selector: F) -> ToMapPairsAdaptor<M, F> {
    ToMapPairsAdaptor {
        selector,
        _target: PhantomData,
    }
}
