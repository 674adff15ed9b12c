//! The Compatibility Resolver.

use bm_reflect::{TypeDesc, Value};

use crate::{ConverterRegistry, is_assignable};

/// Decides what to store in a property declared as `target` for the source
/// value `value`.
///
/// 1. Absence resolves to absence.
/// 2. A value whose runtime type is assignable to `target` is returned as is.
/// 3. Otherwise the first matching converter of `registry` is applied, see
///    [`ConverterRegistry::lookup`].
/// 4. Without a matching converter the result is absence. This is not an
///    error: callers rely on partial mapping.
///
/// # Examples
///
/// ```
/// use bm_convert::{ConverterRegistry, ResolvedConverter, resolve};
/// use bm_reflect::{Describe, Value};
///
/// let registry = ConverterRegistry::new([ResolvedConverter::new(|x: i32| x as i64)]);
///
/// let same = resolve(Some(Value::new(1_i32)), <Option<i32>>::type_desc(), &registry);
/// assert_eq!(same.unwrap().take::<i32>().ok(), Some(1));
///
/// let widened = resolve(Some(Value::new(1_i32)), i64::type_desc(), &registry);
/// assert_eq!(widened.unwrap().take::<i64>().ok(), Some(1));
///
/// assert!(resolve(Some(Value::new(1_i32)), String::type_desc(), &registry).is_none());
/// assert!(resolve(None, i64::type_desc(), &registry).is_none());
/// ```
pub fn resolve(value: Option<Value>, target: &TypeDesc, registry: &ConverterRegistry) -> Option<Value> {
    let value = value?;
    let runtime = value.reflect_type_desc();

    if is_assignable(runtime, target) {
        return Some(value);
    }

    match registry.lookup(runtime, target) {
        Some(converter) => converter.apply(value),
        None => {
            log::trace!(
                "no converter from `{}` to `{}`, resolving to absent",
                runtime.path(),
                target.path()
            );
            None
        }
    }
}
