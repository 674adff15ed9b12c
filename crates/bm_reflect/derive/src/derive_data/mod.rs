//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean_meta;
mod bean_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use bean_meta::BeanMeta;
pub(crate) use bean_struct::{BeanField, BeanStruct};
