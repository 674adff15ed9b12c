#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use bm_convert as convert;
pub use bm_reflect as reflect;
pub use bm_utils as utils;

pub use bm_convert::{BeanConverter, BeanConverterBuilder, BeanUtils, ConvertError, Mapper};
pub use bm_reflect::{Bean, Introspect, Opaque, Value};
