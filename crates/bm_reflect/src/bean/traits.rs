use core::any::Any;
use core::fmt;

use crate::Value;
use crate::bean::BeanInfo;
use crate::desc::{Describe, TypeDesc};

/// Static access to the [`BeanInfo`] of a type.
///
/// Implemented by `#[derive(Bean)]`.
pub trait Introspect: Describe {
    fn bean_info() -> &'static BeanInfo;
}

/// Object-safe view of a bean.
///
/// Implemented for every [`Introspect`] type; source and target instances are
/// handed to the mapping engine as `&dyn Bean` and `&mut dyn Bean`.
pub trait Bean: Any + Send + Sync {
    fn reflect_bean_info(&self) -> &'static BeanInfo;
}

impl<T: Introspect> Bean for T {
    #[inline]
    fn reflect_bean_info(&self) -> &'static BeanInfo {
        T::bean_info()
    }
}

impl dyn Bean {
    /// Returns the descriptor of the underlying type.
    #[inline]
    pub fn type_desc(&self) -> &'static TypeDesc {
        self.reflect_bean_info().type_desc()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Reads a property by name. `None` if the property is absent or unknown.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.reflect_bean_info().property(name)?.get(self)
    }
}

impl fmt::Debug for dyn Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.reflect_bean_info();
        let mut out = f.debug_struct(info.type_desc().ident());
        for prop in info.iter() {
            out.field(prop.name(), &prop.get(self));
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bean, Describe, Introspect, PropertyType, TypeKind, Value};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use core::any::TypeId;

    #[derive(Clone, Debug, Default, PartialEq, Bean)]
    #[bean(default, clone, debug)]
    struct Address {
        city: Option<String>,
    }

    #[derive(Default, Bean)]
    #[bean(default)]
    struct Customer {
        id: u32,
        address: Option<Address>,
    }

    #[derive(Bean)]
    struct Pair<A, B> {
        left: A,
        right: Option<B>,
    }

    #[test]
    fn nested_bean_is_a_value() {
        let address = Address {
            city: Some(String::from("Oslo")),
        };
        let value = address.to_value().unwrap();
        assert!(value.is::<Address>());
        assert_eq!(Address::from_value(value).ok(), Some(address));
        assert!(matches!(Address::type_desc().kind(), TypeKind::Bean(_)));
    }

    #[test]
    fn bean_zero_value_is_default() {
        assert_eq!(Address::null(), Some(Address::default()));
    }

    #[test]
    fn dyn_bean_access() {
        let customer = Customer {
            id: 7,
            address: None,
        };
        let bean: &dyn Bean = &customer;
        assert!(bean.is::<Customer>());
        assert_eq!(bean.type_desc().ident(), "Customer");
        assert_eq!(bean.get("id").and_then(|v| v.take::<u32>().ok()), Some(7));
        assert!(bean.get("address").is_none());
        assert!(bean.get("missing").is_none());
        assert_eq!(format!("{bean:?}"), "Customer { id: Some(7), address: None }");
    }

    #[test]
    fn instantiate_default() {
        let bean = Customer::bean_info().instantiate().unwrap();
        let customer = bean.downcast_ref::<Customer>().unwrap();
        assert_eq!(customer.id, 0);
    }

    #[test]
    fn generic_bean() {
        let info = <Pair<i32, String>>::bean_info();
        assert_eq!(info.len(), 2);
        assert!(info.property("left").unwrap().type_desc().is::<i32>());
        assert!(info.property("right").unwrap().type_desc().is::<Option<String>>());
        assert!(<Pair<i32, String>>::type_desc().path().ends_with("Pair<i32, alloc::string::String>"));
        assert_ne!(
            <Pair<u8, u8>>::bean_info().type_desc().id(),
            TypeId::of::<Pair<i32, String>>()
        );

        let mut pair: Box<Pair<u8, u8>> = Box::new(Pair {
            left: 1,
            right: Some(2),
        });
        let info = <Pair<u8, u8>>::bean_info();
        info.property("right")
            .unwrap()
            .set(&mut *pair, Some(Value::new(9_u8)))
            .unwrap();
        assert_eq!(pair.right, Some(9));
        assert_eq!(pair.left, 1);
    }
}
