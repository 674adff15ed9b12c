use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::desc::TypeDesc;

// -----------------------------------------------------------------------------
// Reflect

/// A concrete value that can be held by a [`Value`].
///
/// Implemented for opaque types and for beans declared with
/// `#[bean(clone)]`. Wrappers (`Option<T>`, `Box<T>`) never implement it: a
/// runtime value always has a bare type.
pub trait Reflect: Any + Send + Sync {
    /// Returns the descriptor of the underlying type.
    fn reflect_type_desc(&self) -> &'static TypeDesc;

    /// Clones the value into a new [`Value`].
    fn clone_value(&self) -> Value;

    /// Debug formatter. Prints the type path unless the type opted in with
    /// `#[bean(debug)]`.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_desc().path())
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Value

/// An owned, type-erased property value.
///
/// `Value` is also the dynamic top type: a property declared as `Value`
/// accepts a value of any type.
///
/// # Examples
///
/// ```
/// use bm_reflect::Value;
///
/// let value = Value::new(34_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.reflect_type_desc().path(), "i32");
/// assert_eq!(value.take::<i32>().ok(), Some(34));
/// ```
pub struct Value(Box<dyn Reflect>);

impl Value {
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Box::new(value))
    }

    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(value)
    }

    #[inline]
    pub fn into_boxed(self) -> Box<dyn Reflect> {
        self.0
    }

    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        &*self.0
    }

    /// Returns the descriptor of the runtime type.
    #[inline]
    pub fn reflect_type_desc(&self) -> &'static TypeDesc {
        self.0.reflect_type_desc()
    }

    /// Returns the [`TypeId`] of the runtime type.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        <dyn Any>::type_id(&*self.0)
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(&*self.0)
    }

    /// Unboxes the value as `T`, returning `Err(self)` on a type mismatch.
    pub fn take<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self.0;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Unboxes the value as `T`, upcasting through declared supertypes if the
    /// runtime type is a subtype of `T`.
    ///
    /// Returns `Err(self)` if `T` is not reachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use bm_reflect::{Opaque, Value};
    ///
    /// #[derive(Clone, Opaque)]
    /// #[bean(extends(Shape))]
    /// struct Square(f64);
    ///
    /// #[derive(Clone, Opaque)]
    /// struct Shape { area: f64 }
    ///
    /// impl From<Square> for Shape {
    ///     fn from(sq: Square) -> Self {
    ///         Shape { area: sq.0 * sq.0 }
    ///     }
    /// }
    ///
    /// let shape: Shape = Value::new(Square(3.0)).coerce().ok().unwrap();
    /// assert_eq!(shape.area, 9.0);
    /// ```
    pub fn coerce<T: Any>(self) -> Result<T, Self> {
        let target = TypeId::of::<T>();
        if self.ty_id() == target {
            return self.take();
        }

        let Some(steps) = self.reflect_type_desc().supertype_path(target) else {
            return Err(self);
        };

        let mut value = self;
        for step in steps {
            value = step.upcast(value)?;
        }
        value.take()
    }
}

impl Clone for Value {
    #[inline]
    fn clone(&self) -> Self {
        self.0.clone_value()
    }
}

impl fmt::Debug for Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::Describe;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn take_mismatch_returns_value() {
        let value = Value::new(String::from("Peter"));
        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "Peter");
    }

    #[test]
    fn clone_is_deep() {
        let value = Value::new(String::from("a"));
        let copy = value.clone();
        assert_eq!(copy.downcast_ref::<String>().unwrap(), "a");
        assert_eq!(value.ty_id(), copy.ty_id());
    }

    #[test]
    fn debug_uses_reflect_debug() {
        assert_eq!(format!("{:?}", Value::new(7_u8)), "7");
    }

    #[test]
    fn runtime_and_declared_descriptors() {
        let value = Value::new(7_u8);
        assert!(value.reflect_type_desc().is::<u8>());
        assert!(Value::type_desc().is_dynamic());
        assert!(!value.reflect_type_desc().is_dynamic());
    }

    #[test]
    fn coerce_without_supertype_fails() {
        assert!(Value::new(1_u8).coerce::<u16>().is_err());
    }
}
