use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use bm_utils::hash::HashMap;

use crate::bean::Bean;
use crate::desc::{Describe, TypeDesc};
use crate::{AssignError, InstantiateError, PropertyType, Value};

// -----------------------------------------------------------------------------
// PropertyInfo

/// A named, typed, readable and writable property of a bean.
///
/// The getter clones the field out, the source bean is never modified.
#[derive(Clone, Copy)]
pub struct PropertyInfo {
    name: &'static str,
    ty: fn() -> &'static TypeDesc,
    getter: fn(&dyn Any) -> Option<Value>,
    setter: fn(&mut dyn Any, Option<Value>) -> Result<(), AssignError>,
}

impl PropertyInfo {
    /// Creates a property declared with type `T`.
    ///
    /// Both accessors receive the bean as `&dyn Any` and are expected to
    /// downcast it to the owning type; see [`impls::assign`](crate::impls::assign)
    /// for the usual setter body.
    pub fn new<T: PropertyType>(
        name: &'static str,
        getter: fn(&dyn Any) -> Option<Value>,
        setter: fn(&mut dyn Any, Option<Value>) -> Result<(), AssignError>,
    ) -> Self {
        Self {
            name,
            ty: T::type_desc,
            getter,
            setter,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the property.
    #[inline]
    pub fn type_desc(&self) -> &'static TypeDesc {
        (self.ty)()
    }

    /// Reads the property, `None` meaning absent.
    #[inline]
    pub fn get(&self, bean: &dyn Bean) -> Option<Value> {
        (self.getter)(bean)
    }

    /// Writes the property, `None` meaning absent.
    #[inline]
    pub fn set(&self, bean: &mut dyn Bean, value: Option<Value>) -> Result<(), AssignError> {
        (self.setter)(bean, value)
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("ty", &self.type_desc().path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// The ordered properties of a bean and its optional default constructor.
///
/// # Examples
///
/// ```
/// use bm_reflect::{Bean, Introspect};
///
/// #[derive(Default, Bean)]
/// #[bean(default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let info = Point::bean_info();
/// assert_eq!(info.type_desc().ident(), "Point");
/// assert_eq!(info.index_of("y"), Some(1));
///
/// let point = info.instantiate().unwrap();
/// let x = info.property("x").unwrap().get(&*point).unwrap();
/// assert_eq!(x.take::<i32>().ok(), Some(0));
/// ```
pub struct BeanInfo {
    desc: fn() -> &'static TypeDesc,
    properties: Box<[PropertyInfo]>,
    index: HashMap<&'static str, usize>,
    constructor: Option<fn() -> Box<dyn Bean>>,
}

impl BeanInfo {
    /// Creates the metadata of bean `T`.
    ///
    /// If two properties share a name, the first one wins the by-name lookup.
    pub fn new<T: Describe>(properties: &[PropertyInfo]) -> Self {
        let mut index = HashMap::with_capacity_and_hasher(properties.len(), Default::default());
        for (idx, prop) in properties.iter().enumerate() {
            index.entry(prop.name).or_insert(idx);
        }

        Self {
            desc: T::type_desc,
            properties: properties.into(),
            index,
            constructor: None,
        }
    }

    /// Sets the default constructor.
    pub fn with_constructor(mut self, constructor: fn() -> Box<dyn Bean>) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[inline]
    pub fn type_desc(&self) -> &'static TypeDesc {
        (self.desc)()
    }

    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.index.get(name).map(|&idx| &self.properties[idx])
    }

    #[inline]
    pub fn property_at(&self, index: usize) -> Option<&PropertyInfo> {
        self.properties.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Iterates the properties in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PropertyInfo> {
        self.properties.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Creates an empty instance with the default constructor.
    pub fn instantiate(&self) -> Result<Box<dyn Bean>, InstantiateError> {
        match self.constructor {
            Some(constructor) => Ok(constructor()),
            None => Err(InstantiateError::NoDefault {
                ty: self.type_desc().path(),
            }),
        }
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("ty", &self.type_desc().path())
            .field("properties", &self.properties)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bean, InstantiateError, Introspect, PropertyType, Value};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Bean)]
    struct Record {
        id: u64,
        #[bean(rename = "label")]
        name: Option<String>,
        #[bean(skip)]
        #[expect(dead_code, reason = "skipped by the derive")]
        scratch: Vec<u8>,
    }

    #[test]
    fn properties_in_declaration_order() {
        let info = Record::bean_info();
        let names: Vec<_> = info.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["id", "label"]);
        assert!(info.property("name").is_none());
        assert!(info.property("scratch").is_none());
        assert!(info.property("label").unwrap().type_desc().is_nullable());
    }

    #[test]
    fn getters_and_setters() {
        let mut record = Record {
            id: 3,
            name: Some(String::from("x")),
            scratch: Vec::new(),
        };
        let info = Record::bean_info();
        let label = info.property("label").unwrap();

        let value = label.get(&record).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "x");

        label.set(&mut record, None).unwrap();
        assert_eq!(record.name, None);

        let id = info.property("id").unwrap();
        id.set(&mut record, Some(Value::new(9_u64))).unwrap();
        assert_eq!(record.id, 9);

        // Clearing a primitive writes its zero value.
        id.set(&mut record, None).unwrap();
        assert_eq!(record.id, 0);

        assert!(id.set(&mut record, Some(Value::new(1_i8))).is_err());
        assert_eq!(record.id, 0);
        assert_eq!(<u64>::null(), Some(0));
    }

    #[test]
    fn no_default_constructor() {
        let err = Record::bean_info().instantiate().err().unwrap();
        assert!(matches!(err, InstantiateError::NoDefault { .. }));
    }
}
