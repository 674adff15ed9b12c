#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod assignable;
mod bean_converter;
mod bean_utils;
mod error;
mod mapper;
mod provider;
mod registry;
mod resolver;

pub mod plan;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use assignable::is_assignable;
pub use bean_converter::{BeanConverter, BeanConverterBuilder};
pub use bean_utils::BeanUtils;
pub use error::{Argument, ConvertError};
pub use mapper::Mapper;
pub use plan::{CopyPlan, PlanCache, PropertyPair};
pub use provider::{DefaultConstructor, InstanceProvider};
pub use registry::{ConverterRegistry, ResolvedConverter, TypeConverter};
pub use resolver::resolve;
