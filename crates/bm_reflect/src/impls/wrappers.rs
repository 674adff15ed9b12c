use alloc::boxed::Box;
use alloc::format;

use crate::desc::{Describe, TypeDesc, TypeKind, WrapperKind};
use crate::impls::{GenericTypeDescCell, NonGenericTypeDescCell};
use crate::{PropertyType, Value};

// -----------------------------------------------------------------------------
// Option<T>

impl<T: Describe> Describe for Option<T> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| {
            let path = format!("core::option::Option<{}>", T::type_desc().path());
            let kind = TypeKind::Wrapper {
                wrapper: WrapperKind::Option,
                inner: T::type_desc,
            };
            TypeDesc::new::<Self>(path, "Option", kind)
        })
    }
}

impl<T: PropertyType> PropertyType for Option<T> {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    #[inline]
    fn into_value(self) -> Option<Value> {
        self.and_then(T::into_value)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Some)
    }

    #[inline]
    fn null() -> Option<Self> {
        Some(None)
    }
}

// -----------------------------------------------------------------------------
// Box<T>

impl<T: Describe> Describe for Box<T> {
    fn type_desc() -> &'static TypeDesc {
        static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| {
            let path = format!("alloc::boxed::Box<{}>", T::type_desc().path());
            let kind = TypeKind::Wrapper {
                wrapper: WrapperKind::Box,
                inner: T::type_desc,
            };
            TypeDesc::new::<Self>(path, "Box", kind)
        })
    }
}

impl<T: PropertyType> PropertyType for Box<T> {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        T::to_value(self)
    }

    #[inline]
    fn into_value(self) -> Option<Value> {
        T::into_value(*self)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Box::new)
    }

    #[inline]
    fn null() -> Option<Self> {
        T::null().map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Value

impl Describe for Value {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| TypeDesc::new::<Self>("bm_reflect::Value", "Value", TypeKind::Dynamic))
    }
}

impl PropertyType for Value {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }

    #[inline]
    fn into_value(self) -> Option<Value> {
        Some(self)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}
