use crate::Value;
use crate::desc::Describe;

/// A type that can be declared as the type of a property.
///
/// This is the declared-type side of a property: it knows how to read a
/// [`Value`] out of a field, how to accept one into a field, and what "absent"
/// means for the field.
///
/// - Opaque types and cloneable beans read as `Some(value)` and accept values
///   of their own type or of any declared subtype.
/// - `Option<T>` reads `None` as absence and accepts absence as `None`.
/// - `Box<T>` behaves like `T`.
/// - [`Value`] accepts anything.
///
/// # Examples
///
/// ```
/// use bm_reflect::{PropertyType, Value};
///
/// assert!(<Option<i32>>::to_value(&None).is_none());
/// assert_eq!(<Option<i32>>::null(), Some(None));
/// assert_eq!(<i32>::null(), Some(0));
///
/// let v = <Option<i32>>::from_value(Value::new(7_i32)).ok();
/// assert_eq!(v, Some(Some(7)));
/// ```
pub trait PropertyType: Describe + Sized {
    /// Reads the field as a value, `None` meaning absent.
    fn to_value(&self) -> Option<Value>;

    /// Consumes the field into a value, `None` meaning absent.
    fn into_value(self) -> Option<Value>;

    /// Accepts a value into the field type.
    ///
    /// Returns `Err(value)` if the runtime type is neither the bare declared
    /// type nor one of its subtypes.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// The field content representing absence.
    ///
    /// Defaults to the zero value of the descriptor, if any.
    fn null() -> Option<Self> {
        Self::type_desc()
            .zero_value()
            .and_then(|zero| Self::from_value(zero).ok())
    }
}
