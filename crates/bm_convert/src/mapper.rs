use alloc::boxed::Box;
use core::any::Any;

use bm_reflect::{Bean, InstantiateError, Introspect, TypeDesc};

use crate::{Argument, ConvertError, InstanceProvider};

/// Operations shared by [`BeanConverter`](crate::BeanConverter) and
/// [`BeanUtils`](crate::BeanUtils).
///
/// # Absence
///
/// A property that cannot be mapped (no assignable type, no converter) does
/// not make the copy fail. It is left absent on the target: `None` for
/// `Option` fields, the zero value for the others, unchanged when the field
/// type has no zero value.
///
/// Nothing is reported to the caller. A `log::trace!` record is emitted for
/// each such property; it is only visible when the application installs a
/// logger with trace level enabled.
pub trait Mapper {
    /// Copies every same-named property of `source` into `target`.
    ///
    /// The source is never modified.
    fn copy_properties(&self, source: &dyn Bean, target: &mut dyn Bean);

    /// The provider used by [`convert_to`](Self::convert_to).
    fn instance_provider(&self) -> &dyn InstanceProvider;

    /// [`copy_properties`](Self::copy_properties) with absent arguments allowed.
    ///
    /// Fails with [`ConvertError::NullArgument`] before touching any property
    /// if either argument is `None`.
    fn try_copy_properties(
        &self,
        source: Option<&dyn Bean>,
        target: Option<&mut dyn Bean>,
    ) -> Result<(), ConvertError> {
        let source = source.ok_or(ConvertError::NullArgument(Argument::Source))?;
        let target = target.ok_or(ConvertError::NullArgument(Argument::Target))?;
        self.copy_properties(source, target);
        Ok(())
    }

    /// Creates an empty instance of `target` and copies `source` into it.
    ///
    /// Fails with [`ConvertError::Instantiation`] before copying anything if
    /// `target` is not a bean or has no default constructor.
    fn convert_to(
        &self,
        source: &dyn Bean,
        target: &'static TypeDesc,
    ) -> Result<Box<dyn Bean>, ConvertError> {
        let info = target
            .bean_info()
            .ok_or(InstantiateError::NotABean { ty: target.path() })?;

        let mut instance = self.instance_provider().new_instance(info)?;

        let found = instance.type_desc();
        if found.id() != target.id() {
            return Err(ConvertError::TypeMismatch {
                expected: target.path(),
                found: found.path(),
            });
        }

        self.copy_properties(source, &mut *instance);
        Ok(instance)
    }

    /// Typed form of [`convert_to`](Self::convert_to).
    fn convert<T: Introspect>(&self, source: &dyn Bean) -> Result<T, ConvertError>
    where
        Self: Sized,
    {
        let instance = self.convert_to(source, T::type_desc())?;
        let found = instance.type_desc().path();
        let any: Box<dyn Any> = instance;
        any.downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ConvertError::TypeMismatch {
                expected: T::type_desc().path(),
                found,
            })
    }
}
