//! The Type Converter Registry.
//!
//! Converters are plain functions from a declared source type `S` to a
//! declared target type `T`. Both types are taken from the generic signature
//! once, at registration, and never inspected again.
//!
//! After [`ConverterRegistry::new`], the registry is an immutable index of
//! converters grouped by their exact declared source type.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use bm_reflect::{PropertyType, TypeDesc, Value};
use bm_utils::TypeIdMap;

use crate::is_assignable;

// -----------------------------------------------------------------------------
// TypeConverter

/// A conversion from `S` to `T`.
///
/// Implemented for every `Fn(S) -> T`. A converter declaring a nullable
/// target, `Fn(S) -> Option<T>`, resolves the property to absent by returning
/// `None`.
///
/// # Examples
///
/// ```
/// use bm_convert::TypeConverter;
///
/// fn to_len(s: String) -> usize {
///     s.len()
/// }
///
/// assert_eq!(TypeConverter::convert(&to_len, String::from("abc")), 3);
/// ```
pub trait TypeConverter<S, T>: Send + Sync + 'static {
    fn convert(&self, source: S) -> T;
}

impl<S, T, F> TypeConverter<S, T> for F
where
    F: Fn(S) -> T + Send + Sync + 'static,
{
    #[inline]
    fn convert(&self, source: S) -> T {
        self(source)
    }
}

// -----------------------------------------------------------------------------
// ResolvedConverter

type ConvertFn = dyn Fn(Value) -> Option<Value> + Send + Sync;

/// A type-erased converter with its declared source and target types.
pub struct ResolvedConverter {
    source: &'static TypeDesc,
    target: &'static TypeDesc,
    func: Box<ConvertFn>,
}

impl ResolvedConverter {
    /// Erases `converter`, recording `S` and `T` as its declared types.
    pub fn new<S, T, C>(converter: C) -> Self
    where
        S: PropertyType,
        T: PropertyType,
        C: TypeConverter<S, T>,
    {
        Self {
            source: S::type_desc(),
            target: T::type_desc(),
            func: Box::new(move |value| match S::from_value(value) {
                Ok(source) => converter.convert(source).into_value(),
                Err(_) => None,
            }),
        }
    }

    #[inline]
    pub fn source(&self) -> &'static TypeDesc {
        self.source
    }

    #[inline]
    pub fn target(&self) -> &'static TypeDesc {
        self.target
    }

    /// Applies the converter.
    ///
    /// Returns `None` if the value is not assignable to the declared source
    /// type, or if the converter produced absence.
    #[inline]
    pub fn apply(&self, value: Value) -> Option<Value> {
        (self.func)(value)
    }
}

impl fmt::Debug for ResolvedConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResolvedConverter({} -> {})", self.source.path(), self.target.path())
    }
}

// -----------------------------------------------------------------------------
// ConverterRegistry

struct Registered {
    order: usize,
    converter: ResolvedConverter,
}

struct ConverterGroup {
    source: &'static TypeDesc,
    converters: Vec<Registered>,
}

/// Immutable index of converters, grouped by exact declared source type.
///
/// Groups keep the order of their first registration, and converters keep
/// their registration order within a group. Duplicate and overlapping
/// registrations are accepted; [`lookup`](Self::lookup) decides precedence.
pub struct ConverterRegistry {
    groups: Vec<ConverterGroup>,
    index: TypeIdMap<usize>,
    len: usize,
}

impl ConverterRegistry {
    /// Builds the index. `converters` is in registration order.
    pub fn new(converters: impl IntoIterator<Item = ResolvedConverter>) -> Self {
        let mut groups: Vec<ConverterGroup> = Vec::new();
        let mut index = TypeIdMap::new();
        let mut len = 0;

        for (order, converter) in converters.into_iter().enumerate() {
            let source = converter.source;
            let idx = *index.get_or_insert(source.id(), || {
                groups.push(ConverterGroup {
                    source,
                    converters: Vec::new(),
                });
                groups.len() - 1
            });
            groups[idx].converters.push(Registered { order, converter });
            len += 1;
        }

        Self { groups, index, len }
    }

    /// An empty registry.
    pub const fn empty() -> Self {
        Self {
            groups: Vec::new(),
            index: TypeIdMap::new(),
            len: 0,
        }
    }

    /// Finds the converter to use for a value of runtime type `runtime` and a
    /// property declared as `target`.
    ///
    /// Candidates are the converters whose declared source type `runtime` is
    /// assignable to and whose declared target type is assignable to `target`.
    /// The earliest registered candidate wins.
    pub fn lookup(&self, runtime: &TypeDesc, target: &TypeDesc) -> Option<&ResolvedConverter> {
        self.groups
            .iter()
            .filter(|group| is_assignable(runtime, group.source))
            .flat_map(|group| group.converters.iter())
            .filter(|entry| is_assignable(entry.converter.target, target))
            .min_by_key(|entry| entry.order)
            .map(|entry| &entry.converter)
    }

    /// The converters declared with exactly `source` as source type, in
    /// registration order.
    pub fn converters_for(&self, source: &TypeDesc) -> impl Iterator<Item = &ResolvedConverter> {
        self.index
            .get(&source.id())
            .into_iter()
            .flat_map(|&idx| self.groups[idx].converters.iter())
            .map(|entry| &entry.converter)
    }

    /// The number of source groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut all: Vec<&Registered> = self.groups.iter().flat_map(|g| g.converters.iter()).collect();
        all.sort_by_key(|entry| entry.order);
        f.debug_list()
            .entries(all.into_iter().map(|entry| &entry.converter))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConverterRegistry, ResolvedConverter};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use bm_reflect::{Describe, Opaque, Value};

    #[derive(Clone, Opaque)]
    #[bean(extends(Base))]
    struct Derived(i32);

    #[derive(Clone, Opaque)]
    struct Base(i32);

    impl From<Derived> for Base {
        fn from(d: Derived) -> Self {
            Base(d.0)
        }
    }

    fn registry() -> ConverterRegistry {
        ConverterRegistry::new(alloc::vec![
            ResolvedConverter::new(|b: Base| b.0.to_string()),
            ResolvedConverter::new(|d: Derived| d.0 as i64),
            ResolvedConverter::new(|d: Derived| alloc::format!("derived {}", d.0)),
            ResolvedConverter::new(|b: Base| b.0 as i64 * 100),
        ])
    }

    #[test]
    fn grouped_by_exact_source() {
        let registry = registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.group_count(), 2);
        let targets: Vec<_> = registry
            .converters_for(Base::type_desc())
            .map(|c| c.target().path())
            .collect();
        assert_eq!(targets, ["alloc::string::String", "i64"]);
    }

    #[test]
    fn earliest_registration_wins() {
        let registry = registry();

        // Both `Base -> String` (first) and `Derived -> String` (third) match.
        let conv = registry.lookup(Derived::type_desc(), String::type_desc()).unwrap();
        assert!(conv.source().is::<Base>());
        let out = conv.apply(Value::new(Derived(5))).unwrap();
        assert_eq!(out.take::<String>().unwrap(), "5");

        // `Derived -> i64` (second) precedes `Base -> i64` (fourth).
        let conv = registry.lookup(Derived::type_desc(), i64::type_desc()).unwrap();
        assert!(conv.source().is::<Derived>());

        // A `Base` value only matches the `Base` group.
        let conv = registry.lookup(Base::type_desc(), i64::type_desc()).unwrap();
        let out = conv.apply(Value::new(Base(2))).unwrap();
        assert_eq!(out.take::<i64>().ok(), Some(200));
    }

    #[test]
    fn target_must_be_assignable() {
        let registry = registry();
        assert!(registry.lookup(Base::type_desc(), i32::type_desc()).is_none());
        assert!(registry.lookup(Base::type_desc(), <Option<i64>>::type_desc()).is_some());
        assert!(registry.lookup(i32::type_desc(), String::type_desc()).is_none());
    }

    #[test]
    fn nullable_target_and_mismatched_input() {
        let conv = ResolvedConverter::new(|s: String| s.parse::<i32>().ok());
        assert!(conv.target().is::<Option<i32>>());
        assert!(conv.apply(Value::new(String::from("x"))).is_none());
        assert_eq!(
            conv.apply(Value::new(String::from("12"))).and_then(|v| v.take::<i32>().ok()),
            Some(12)
        );
        assert!(conv.apply(Value::new(1_u8)).is_none());
    }
}
