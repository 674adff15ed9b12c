use alloc::boxed::Box;

use bm_reflect::{Bean, BeanInfo, InstantiateError};

/// The Default-Instance Provider: creates the empty target of a conversion.
///
/// Implemented for [`DefaultConstructor`] and for any
/// `Fn(&'static BeanInfo) -> Result<Box<dyn Bean>, InstantiateError>`.
pub trait InstanceProvider: Send + Sync {
    fn new_instance(&self, info: &'static BeanInfo) -> Result<Box<dyn Bean>, InstantiateError>;
}

/// Instantiates through the constructor generated by `#[bean(default)]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConstructor;

impl InstanceProvider for DefaultConstructor {
    #[inline]
    fn new_instance(&self, info: &'static BeanInfo) -> Result<Box<dyn Bean>, InstantiateError> {
        info.instantiate()
    }
}

impl<F> InstanceProvider for F
where
    F: Fn(&'static BeanInfo) -> Result<Box<dyn Bean>, InstantiateError> + Send + Sync,
{
    #[inline]
    fn new_instance(&self, info: &'static BeanInfo) -> Result<Box<dyn Bean>, InstantiateError> {
        self(info)
    }
}
