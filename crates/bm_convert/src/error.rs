use core::fmt;

use bm_reflect::InstantiateError;
use thiserror::Error;

/// Which argument of a copy was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Source,
    Target,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// An error returned by [`Mapper`](crate::Mapper) operations.
///
/// Properties that cannot be mapped are never an error: they are left absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The source or target bean is absent. Nothing was copied.
    #[error("the {0} bean is absent")]
    NullArgument(Argument),
    /// The target type could not be instantiated. Nothing was copied.
    #[error("cannot instantiate the target: {0}")]
    Instantiation(#[from] InstantiateError),
    /// The instance provider returned a bean of another type.
    #[error("expected an instance of `{expected}`, the instance provider returned `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
