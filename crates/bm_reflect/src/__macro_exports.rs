//! Items referenced by the code that `bm_reflect_derive` generates.

pub mod alloc_utils {
    pub use ::alloc::{
        borrow::{Cow, ToOwned},
        boxed::Box,
        format,
        string::{String, ToString},
        vec::Vec,
    };
}
