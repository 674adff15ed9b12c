//! Runtime type descriptors.
//!
//! Every type that can appear as a property, or as the value of one, has a
//! `'static` [`TypeDesc`]. Descriptors are created lazily, once per type, and
//! stored in the cells of [`impls`](crate::impls).
//!
//! A descriptor records what the mapping engine needs to decide whether a value
//! may be stored in a property without conversion:
//!
//! - its identity ([`TypeId`]) and printable path,
//! - its [`TypeKind`]: an atomic value, a bean, a wrapper around another type,
//!   or the dynamic top type [`Value`],
//! - the supertypes it declares, each with an upcast function,
//! - an optional zero value, used when a non-nullable property is cleared.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::Value;
use crate::bean::BeanInfo;

// -----------------------------------------------------------------------------
// Describe

/// A type with a static [`TypeDesc`].
///
/// Implemented by the derive macros, by the primitive types in
/// [`impls`](crate::impls), by `Option<T>` and `Box<T>`, and by [`Value`].
///
/// # Examples
///
/// ```
/// use bm_reflect::{Describe, TypeKind};
///
/// assert_eq!(<i32 as Describe>::type_desc().path(), "i32");
/// assert!(matches!(<Option<i32>>::type_desc().kind(), TypeKind::Wrapper { .. }));
/// assert_eq!(<Option<i32>>::type_desc().bare().path(), "i32");
/// ```
pub trait Describe: Send + Sync + 'static {
    /// Returns the descriptor of `Self`.
    fn type_desc() -> &'static TypeDesc;
}

// -----------------------------------------------------------------------------
// TypeKind

/// Wrappers that do not change the identity of the wrapped value.
///
/// `T`, `Option<T>` and `Box<T>` are mutually assignable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    /// `Option<T>`, the nullable form of `T`.
    Option,
    /// `Box<T>`.
    Box,
}

/// The shape of a described type.
#[derive(Clone, Copy)]
pub enum TypeKind {
    /// An atomic value: primitives, strings, enums, newtypes.
    Opaque,
    /// A type with named properties.
    Bean(fn() -> &'static BeanInfo),
    /// A wrapper around another described type.
    Wrapper {
        wrapper: WrapperKind,
        inner: fn() -> &'static TypeDesc,
    },
    /// The top type [`Value`]: any value can be stored in it.
    Dynamic,
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque => f.write_str("Opaque"),
            Self::Bean(info) => f
                .debug_tuple("Bean")
                .field(&info().type_desc().path())
                .finish(),
            Self::Wrapper { wrapper, inner } => f
                .debug_struct("Wrapper")
                .field("wrapper", wrapper)
                .field("inner", &inner().path())
                .finish(),
            Self::Dynamic => f.write_str("Dynamic"),
        }
    }
}

// -----------------------------------------------------------------------------
// Supertype

/// A supertype declared by a type, with the conversion that turns a value of
/// the subtype into a value of the supertype.
///
/// Declared through `#[bean(extends(...))]`, which requires `From<Sub>` on the
/// supertype.
#[derive(Clone, Copy)]
pub struct Supertype {
    desc: fn() -> &'static TypeDesc,
    upcast: fn(Value) -> Result<Value, Value>,
}

impl Supertype {
    /// Declare `T` as a supertype of `S`, upcasting through `From<S>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bm_reflect::{Describe, Supertype};
    ///
    /// let sup = Supertype::of::<u8, u16>();
    /// assert_eq!(sup.type_desc().path(), "u16");
    /// ```
    pub fn of<S, T>() -> Self
    where
        S: crate::Reflect,
        T: Describe + crate::Reflect + From<S>,
    {
        fn upcast<S: crate::Reflect, T: crate::Reflect + From<S>>(
            value: Value,
        ) -> Result<Value, Value> {
            value.take::<S>().map(|sub| Value::new(T::from(sub)))
        }

        Self {
            desc: T::type_desc,
            upcast: upcast::<S, T>,
        }
    }

    /// Returns the descriptor of the supertype.
    #[inline]
    pub fn type_desc(&self) -> &'static TypeDesc {
        (self.desc)()
    }

    /// Converts a value of the subtype into the supertype.
    ///
    /// Returns `Err(value)` unchanged if the value is not of the subtype.
    #[inline]
    pub fn upcast(&self, value: Value) -> Result<Value, Value> {
        (self.upcast)(value)
    }
}

impl fmt::Debug for Supertype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Supertype")
            .field(&self.type_desc().path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeDesc

/// Static description of a type.
///
/// See the [module documentation](self).
pub struct TypeDesc {
    id: TypeId,
    path: Cow<'static, str>,
    ident: Cow<'static, str>,
    kind: TypeKind,
    supertypes: Box<[Supertype]>,
    zero: Option<fn() -> Value>,
}

impl TypeDesc {
    /// Creates a descriptor for `T` without supertypes or zero value.
    pub fn new<T: ?Sized + 'static>(
        path: impl Into<Cow<'static, str>>,
        ident: impl Into<Cow<'static, str>>,
        kind: TypeKind,
    ) -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: path.into(),
            ident: ident.into(),
            kind,
            supertypes: Box::new([]),
            zero: None,
        }
    }

    /// Sets the declared supertypes.
    pub fn with_supertypes(mut self, supertypes: impl Into<Box<[Supertype]>>) -> Self {
        self.supertypes = supertypes.into();
        self
    }

    /// Sets the constructor of the zero value.
    pub fn with_zero(mut self, zero: fn() -> Value) -> Self {
        self.zero = Some(zero);
        self
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The full path, e.g. `core::option::Option<i32>`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The short name, e.g. `Option`.
    #[inline]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn supertypes(&self) -> &[Supertype] {
        &self.supertypes
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, TypeKind::Dynamic)
    }

    /// Returns the bean metadata if this describes a bean.
    #[inline]
    pub fn bean_info(&self) -> Option<&'static BeanInfo> {
        match self.kind {
            TypeKind::Bean(info) => Some(info()),
            _ => None,
        }
    }

    /// Strips every wrapper layer.
    ///
    /// `Option<Box<i32>>` and `i32` have the same bare type.
    pub fn bare(&self) -> &TypeDesc {
        let mut desc = self;
        while let TypeKind::Wrapper { inner, .. } = desc.kind {
            desc = inner();
        }
        desc
    }

    /// Returns `true` if any wrapper layer is an `Option`.
    pub fn is_nullable(&self) -> bool {
        let mut desc = self;
        while let TypeKind::Wrapper { wrapper, inner } = desc.kind {
            if wrapper == WrapperKind::Option {
                return true;
            }
            desc = inner();
        }
        false
    }

    /// Creates the zero value, if the type has one.
    #[inline]
    pub fn zero_value(&self) -> Option<Value> {
        self.zero.map(|zero| zero())
    }

    /// Returns `true` if `target` is reachable from `self` through declared
    /// supertypes, following any number of steps.
    ///
    /// Reflexive. Cycles in the declarations are tolerated.
    pub fn reaches(&self, target: TypeId) -> bool {
        self.supertype_path(target).is_some()
    }

    /// Returns the chain of supertype steps leading from `self` to `target`.
    ///
    /// The chain is empty if `self` is `target`.
    pub fn supertype_path(&self, target: TypeId) -> Option<Vec<&Supertype>> {
        fn visit<'a>(
            desc: &'a TypeDesc,
            target: TypeId,
            visited: &mut Vec<TypeId>,
            path: &mut Vec<&'a Supertype>,
        ) -> bool {
            if desc.id == target {
                return true;
            }
            if visited.contains(&desc.id) {
                return false;
            }
            visited.push(desc.id);
            for sup in desc.supertypes.iter() {
                path.push(sup);
                if visit(sup.type_desc(), target, visited, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        visit(self, target, &mut Vec::new(), &mut path).then_some(path)
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("supertypes", &self.supertypes)
            .field("zero", &self.zero.is_some())
            .finish()
    }
}

impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}
