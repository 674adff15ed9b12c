use bm_reflect::TypeDesc;

/// Returns `true` if a value of type `from` may be stored in a property of
/// type `to` without conversion.
///
/// The rules, applied in order:
///
/// 1. Every type is assignable to itself.
/// 2. Wrappers are transparent: `T`, `Option<T>` and `Box<T>` (nested in any
///    order) are mutually assignable.
/// 3. Every type is assignable to the dynamic top type [`Value`](bm_reflect::Value).
/// 4. A type is assignable to every supertype it declares, transitively.
///
/// Numeric widening is not assignability; `i32` to `i64` needs a converter.
///
/// # Examples
///
/// ```
/// use bm_convert::is_assignable;
/// use bm_reflect::{Describe, Value};
///
/// assert!(is_assignable(i32::type_desc(), <Option<i32>>::type_desc()));
/// assert!(is_assignable(<Option<i32>>::type_desc(), i32::type_desc()));
/// assert!(is_assignable(String::type_desc(), Value::type_desc()));
/// assert!(!is_assignable(i32::type_desc(), i64::type_desc()));
/// ```
pub fn is_assignable(from: &TypeDesc, to: &TypeDesc) -> bool {
    if from.id() == to.id() {
        return true;
    }

    let (from, to) = (from.bare(), to.bare());
    from.id() == to.id() || to.is_dynamic() || from.reaches(to.id())
}

#[cfg(test)]
mod tests {
    use super::is_assignable;
    use alloc::boxed::Box;
    use alloc::string::String;
    use bm_reflect::{Describe, Opaque, TypeDesc, Value};

    #[derive(Clone, Opaque)]
    #[bean(extends(Vehicle))]
    struct Car;

    #[derive(Clone, Opaque)]
    #[bean(extends(Asset))]
    struct Vehicle;

    #[derive(Clone, Opaque)]
    struct Asset;

    impl From<Car> for Vehicle {
        fn from(_: Car) -> Self {
            Vehicle
        }
    }

    impl From<Vehicle> for Asset {
        fn from(_: Vehicle) -> Self {
            Asset
        }
    }

    fn check(from: &TypeDesc, to: &TypeDesc, expected: bool) {
        assert_eq!(
            is_assignable(from, to),
            expected,
            "`{}` -> `{}`",
            from.path(),
            to.path()
        );
    }

    #[test]
    fn reflexive() {
        check(i32::type_desc(), i32::type_desc(), true);
        check(String::type_desc(), String::type_desc(), true);
        check(Car::type_desc(), Car::type_desc(), true);
        check(Value::type_desc(), Value::type_desc(), true);
    }

    #[test]
    fn wrapper_equivalence() {
        let bare = i32::type_desc();
        let wrapped = [
            <Option<i32>>::type_desc(),
            <Box<i32>>::type_desc(),
            <Option<Box<i32>>>::type_desc(),
            <Box<Option<i32>>>::type_desc(),
        ];
        for desc in wrapped {
            check(bare, desc, true);
            check(desc, bare, true);
            for other in wrapped {
                check(desc, other, true);
            }
        }
        check(<Option<i32>>::type_desc(), <Option<u32>>::type_desc(), false);
    }

    #[test]
    fn dynamic_target_accepts_everything() {
        check(i8::type_desc(), Value::type_desc(), true);
        check(Car::type_desc(), <Option<Value>>::type_desc(), true);
        check(<Option<String>>::type_desc(), Value::type_desc(), true);
        check(Value::type_desc(), i8::type_desc(), false);
    }

    #[test]
    fn no_numeric_widening() {
        check(i32::type_desc(), i64::type_desc(), false);
        check(u8::type_desc(), u16::type_desc(), false);
        check(f32::type_desc(), f64::type_desc(), false);
        check(i64::type_desc(), i32::type_desc(), false);
        check(char::type_desc(), String::type_desc(), false);
    }

    #[test]
    fn declared_supertypes() {
        check(Car::type_desc(), Vehicle::type_desc(), true);
        check(Car::type_desc(), Asset::type_desc(), true);
        check(Vehicle::type_desc(), Asset::type_desc(), true);
        check(<Option<Car>>::type_desc(), <Box<Asset>>::type_desc(), true);
        check(Vehicle::type_desc(), Car::type_desc(), false);
        check(Asset::type_desc(), Vehicle::type_desc(), false);
    }
}
