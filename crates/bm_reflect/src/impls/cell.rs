//! Containers for static storage of descriptors.
//!
//! This is usually used to implement [`Describe`](crate::Describe) and
//! [`Introspect`](crate::Introspect).
//!
//! ## NonGenericTypeCell
//!
//! For non generic types. Internally an [`OnceLock<T>`], almost no additional expenses.
//!
//! ## GenericTypeCell
//!
//! If the type is generic, the `static CELL` inside the function is shared by every
//! instantiation. Therefore, the inner of this container is a [`TypeIdMap<T>`] wrapped
//! in [`RwLock`], and each stored value is leaked to obtain a `'static` reference.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use bm_utils::TypeIdMap;

use crate::bean::BeanInfo;
use crate::desc::TypeDesc;

mod sealed {
    use crate::bean::BeanInfo;
    use crate::desc::TypeDesc;

    pub trait StaticMeta: Send + Sync + 'static {}

    impl StaticMeta for TypeDesc {}
    impl StaticMeta for BeanInfo {}
}

use sealed::StaticMeta;

/// Container for static storage of non-generic type metadata.
pub struct NonGenericTypeCell<T: StaticMeta>(OnceLock<T>);

/// Stores the [`TypeDesc`] of a non-generic type.
///
/// ## Example
///
/// ```
/// use bm_reflect::{Describe, TypeDesc, TypeKind};
/// use bm_reflect::impls::NonGenericTypeDescCell;
///
/// struct Meters;
///
/// impl Describe for Meters {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
///         CELL.get_or_init(|| TypeDesc::new::<Self>("units::Meters", "Meters", TypeKind::Opaque))
///     }
/// }
///
/// assert!(core::ptr::eq(Meters::type_desc(), Meters::type_desc()));
/// ```
pub type NonGenericTypeDescCell = NonGenericTypeCell<TypeDesc>;

/// Stores the [`BeanInfo`] of a non-generic bean.
pub type NonGenericBeanInfoCell = NonGenericTypeCell<BeanInfo>;

impl<T: StaticMeta> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the value stored in the cell, initializing it
    /// with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of type metadata with generics.
pub struct GenericTypeCell<T: StaticMeta>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeDesc`] of each instantiation of a generic type.
///
/// ## Example
///
/// ```
/// use bm_reflect::{Describe, TypeDesc, TypeKind};
/// use bm_reflect::impls::GenericTypeDescCell;
/// use std::marker::PhantomData;
///
/// struct Tagged<T>(PhantomData<T>);
///
/// impl<T: Describe> Describe for Tagged<T> {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             let path = format!("test::Tagged<{}>", T::type_desc().path());
///             TypeDesc::new::<Self>(path, "Tagged", TypeKind::Opaque)
///         })
///     }
/// }
///
/// assert_eq!(<Tagged<i32>>::type_desc().path(), "test::Tagged<i32>");
/// assert_eq!(<Tagged<u8>>::type_desc().path(), "test::Tagged<u8>");
/// ```
pub type GenericTypeDescCell = GenericTypeCell<TypeDesc>;

/// Stores the [`BeanInfo`] of each instantiation of a generic bean.
pub type GenericBeanInfoCell = GenericTypeCell<BeanInfo>;

impl<T: StaticMeta> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for type `G`, generating it with `f` if there
    /// is no entry yet.
    ///
    /// If two threads race, both may run `f` but the first inserted value wins.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
