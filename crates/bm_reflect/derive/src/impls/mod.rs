// -----------------------------------------------------------------------------
// Modules

mod bean_kind;
mod opaque_kind;

mod trait_describe;
mod trait_introspect;
mod trait_reflect;

// -----------------------------------------------------------------------------
// Internal API

use trait_describe::impl_trait_describe;
use trait_introspect::impl_trait_introspect;
use trait_reflect::impl_trait_reflect;

pub(crate) use bean_kind::impl_bean;
pub(crate) use opaque_kind::impl_opaque;
