//! Bean metadata: the Property Introspector.
//!
//! A bean is a struct with named properties. `#[derive(Bean)]` implements
//! [`Introspect`] for it, and through a blanket impl the object-safe [`Bean`]
//! trait the mapping engine works with.

// -----------------------------------------------------------------------------
// Modules

mod info;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use info::{BeanInfo, PropertyInfo};
pub use traits::{Bean, Introspect};
