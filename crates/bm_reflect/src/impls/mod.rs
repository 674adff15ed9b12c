//! Provide some utilities for implementing the reflection traits.
//!
//! - [`NonGenericTypeDescCell`], [`GenericTypeDescCell`]: used to implement
//!   [`Describe`](crate::Describe).
//! - [`NonGenericBeanInfoCell`], [`GenericBeanInfoCell`]: used to implement
//!   [`Introspect`](crate::Introspect).
//! - [`assign`]: the body of a generated property setter.
//!
//! ## Implemented Menu
//!
//! - `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`, `()`
//! - `String`, `core::time::Duration`
//! - `Option<T>`, `Box<T>` as wrappers
//! - [`Value`] as the dynamic top type
//! - `bigdecimal::BigDecimal` ("bigdecimal" feature)

use crate::{AssignError, PropertyType, Value};

// -----------------------------------------------------------------------------
// Opaque impl macro

/// Implements `Describe`, `Reflect` and `PropertyType` for an atomic type
/// with `Clone`, `Debug` and `Default`. The default value is the zero value.
macro_rules! impl_opaque {
    ($($ty:ty => $path:literal as $ident:literal),* $(,)?) => {$(
        impl $crate::Describe for $ty {
            fn type_desc() -> &'static $crate::TypeDesc {
                static CELL: $crate::impls::NonGenericTypeDescCell =
                    $crate::impls::NonGenericTypeDescCell::new();
                CELL.get_or_init(|| {
                    $crate::TypeDesc::new::<$ty>($path, $ident, $crate::TypeKind::Opaque)
                        .with_zero(|| $crate::Value::new(<$ty as ::core::default::Default>::default()))
                })
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_type_desc(&self) -> &'static $crate::TypeDesc {
                <$ty as $crate::Describe>::type_desc()
            }

            #[inline]
            fn clone_value(&self) -> $crate::Value {
                $crate::Value::new(::core::clone::Clone::clone(self))
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::PropertyType for $ty {
            #[inline]
            fn to_value(&self) -> ::core::option::Option<$crate::Value> {
                ::core::option::Option::Some($crate::Reflect::clone_value(self))
            }

            #[inline]
            fn into_value(self) -> ::core::option::Option<$crate::Value> {
                ::core::option::Option::Some($crate::Value::new(self))
            }

            #[inline]
            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::Value> {
                value.coerce::<$ty>()
            }
        }
    )*};
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod primitives;
mod wrappers;

#[cfg(feature = "bigdecimal")]
mod bigdecimal;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericBeanInfoCell, GenericTypeDescCell};
pub use cell::{GenericTypeCell, NonGenericTypeCell};
pub use cell::{NonGenericBeanInfoCell, NonGenericTypeDescCell};

/// Writes `value` into a field declared as `T`.
///
/// - `Some(value)` is accepted if its runtime type is the bare type of `T` or
///   one of its declared subtypes.
/// - `None` writes [`PropertyType::null`], which fails for non-nullable types
///   without a zero value.
///
/// The field is left unchanged on error.
///
/// # Examples
///
/// ```
/// use bm_reflect::{impls, AssignError, Value};
///
/// let mut age: Option<i32> = None;
/// impls::assign(&mut age, Some(Value::new(34_i32))).unwrap();
/// assert_eq!(age, Some(34));
///
/// let err = impls::assign(&mut age, Some(Value::new(1.5_f64))).unwrap_err();
/// assert!(matches!(err, AssignError::Incompatible { .. }));
/// assert_eq!(age, Some(34));
/// ```
pub fn assign<T: PropertyType>(slot: &mut T, value: Option<Value>) -> Result<(), AssignError> {
    *slot = match value {
        Some(value) => T::from_value(value).map_err(|value| AssignError::Incompatible {
            expected: T::type_desc().path(),
            found: value.reflect_type_desc().path(),
        })?,
        None => T::null().ok_or(AssignError::NotNullable {
            ty: T::type_desc().path(),
        })?,
    };
    Ok(())
}
