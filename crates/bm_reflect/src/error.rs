use thiserror::Error;

/// Refusal of a property setter to accept a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AssignError {
    /// The value's runtime type is not assignable to the field.
    #[error("cannot assign a value of type `{found}` to a property of type `{expected}`")]
    Incompatible {
        expected: &'static str,
        found: &'static str,
    },
    /// The field can not represent absence.
    #[error("property of type `{ty}` cannot be cleared")]
    NotNullable { ty: &'static str },
    /// The setter was called with an instance of another bean type.
    #[error("the setter was called on an instance of another type")]
    BeanMismatch,
}

/// Failure to create an empty instance of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InstantiateError {
    /// The bean has no default constructor, see `#[bean(default)]`.
    #[error("`{ty}` has no default constructor")]
    NoDefault { ty: &'static str },
    /// The type has no properties and cannot be a mapping target.
    #[error("`{ty}` is not a bean")]
    NotABean { ty: &'static str },
}
