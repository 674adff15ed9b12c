#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derive macros emit `::bm_reflect::...` paths, and the crate uses its own
// derives in tests, so `bm_reflect` must also name this crate from inside.
extern crate self as bm_reflect;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod property;
mod value;

pub mod bean;
pub mod desc;
pub mod impls;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use bm_reflect_derive as derive;
pub use bm_reflect_derive::{Bean, Opaque};

pub use bean::{Bean, BeanInfo, Introspect, PropertyInfo};
pub use desc::{Describe, Supertype, TypeDesc, TypeKind, WrapperKind};
pub use error::{AssignError, InstantiateError};
pub use property::PropertyType;
pub use value::{Reflect, Value};
