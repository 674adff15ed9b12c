use alloc::string::String;
use core::time::Duration;

impl_opaque! {
    bool => "bool" as "bool",
    char => "char" as "char",
    u8 => "u8" as "u8",
    u16 => "u16" as "u16",
    u32 => "u32" as "u32",
    u64 => "u64" as "u64",
    u128 => "u128" as "u128",
    usize => "usize" as "usize",
    i8 => "i8" as "i8",
    i16 => "i16" as "i16",
    i32 => "i32" as "i32",
    i64 => "i64" as "i64",
    i128 => "i128" as "i128",
    isize => "isize" as "isize",
    f32 => "f32" as "f32",
    f64 => "f64" as "f64",
    () => "()" as "()",
    String => "alloc::string::String" as "String",
    Duration => "core::time::Duration" as "Duration",
}

#[cfg(test)]
mod tests {
    use crate::{Describe, PropertyType, Value};
    use alloc::string::String;

    #[test]
    fn string_paths() {
        assert_eq!(String::type_desc().path(), "alloc::string::String");
        assert_eq!(String::type_desc().ident(), "String");
    }

    #[test]
    fn no_implicit_widening() {
        assert!(<i64>::from_value(Value::new(1_i32)).is_err());
        assert!(<f64>::from_value(Value::new(1.0_f32)).is_err());
        assert_eq!(<i64>::from_value(Value::new(1_i64)).ok(), Some(1));
    }

    #[test]
    fn zero_of_string_is_empty() {
        assert_eq!(String::null().as_deref(), Some(""));
    }
}
