use core::any::TypeId;
use core::fmt::{self, Debug};

use crate::hash::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypePair

/// An ordered pair of [`TypeId`]s, usually `(source, target)`.
///
/// The order matters: `TypePair::of::<A, B>()` and `TypePair::of::<B, A>()`
/// are different keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypePair {
    pub source: TypeId,
    pub target: TypeId,
}

impl TypePair {
    /// Creates a pair from two type ids.
    #[inline]
    pub const fn new(source: TypeId, target: TypeId) -> Self {
        Self { source, target }
    }

    /// Creates a pair from two types.
    #[inline]
    pub fn of<S: ?Sized + 'static, T: ?Sized + 'static>() -> Self {
        Self::new(TypeId::of::<S>(), TypeId::of::<T>())
    }
}

// -----------------------------------------------------------------------------
// TypePairMap

/// A map keyed by [`TypePair`].
///
/// Unlike [`TypeIdMap`](crate::TypeIdMap), a pair writes two integers into
/// the hasher, so the fixed `foldhash` state is used instead of the no-op one.
///
/// # Examples
///
/// ```
/// use bm_utils::{TypePair, TypePairMap};
///
/// let mut map = TypePairMap::new();
/// map.insert(TypePair::of::<u8, u16>(), "widen");
///
/// assert_eq!(map.get(&TypePair::of::<u8, u16>()), Some(&"widen"));
/// assert_eq!(map.get(&TypePair::of::<u16, u8>()), None);
/// ```
pub struct TypePairMap<V>(HashMap<TypePair, V>);

impl<V> TypePairMap<V> {
    /// Creates an empty `TypePairMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(crate::hash::FixedHashState))
    }

    /// Returns a reference to the value corresponding to the pair.
    #[inline]
    pub fn get(&self, pair: &TypePair) -> Option<&V> {
        self.0.get(pair)
    }

    /// Inserts a key-value pair into the map, returning the previous value.
    #[inline]
    pub fn insert(&mut self, pair: TypePair, value: V) -> Option<V> {
        self.0.insert(pair, value)
    }

    /// Returns the existing value for `pair`, or inserts the result of `f`.
    ///
    /// The closure `f` is only called if the key is not present, so an
    /// entry that is already there always wins.
    #[inline]
    pub fn get_or_insert(&mut self, pair: TypePair, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(pair) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns `true` if the map contains a value for the pair.
    #[inline]
    pub fn contains(&self, pair: &TypePair) -> bool {
        self.0.contains_key(pair)
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for TypePairMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypePairMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests
