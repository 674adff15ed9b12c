//! Derive macros of `bm_reflect`:
//!
//! - [`Bean`]: a struct with named properties.
//! - [`Opaque`]: an atomic property value.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` implements `Describe` and `Introspect` for a struct with
/// named fields, making it usable as the source or target of a property copy.
/// Every field becomes a property named after the field; its type must
/// implement `PropertyType`.
///
/// ## Type attributes
///
/// - `#[bean(default)]`: the struct implements `Default`. Generates the
///   default constructor used by `convert`; without it, converting into the
///   type fails with an instantiation error.
/// - `#[bean(clone)]`: the struct implements `Clone`. Also implements
///   `Reflect` and `PropertyType`, so the bean can be the value of a property
///   of another bean.
/// - `#[bean(debug)]`: the struct implements `Debug`, used when printing values.
/// - `#[bean(extends(A, B))]`: declared supertypes. Each must implement
///   `From<Self>`; a value of this type may be stored in a property of type `A`
///   or `B` without a converter. Implies `clone`.
///
/// ## Field attributes
///
/// - `#[bean(skip)]`: the field is not a property.
/// - `#[bean(rename = "other")]`: the property name.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Default, Bean)]
/// #[bean(default)]
/// struct Person {
///     name: Option<String>,
///     age: i32,
///     #[bean(rename = "sex")]
///     gender: Option<Gender>,
/// }
/// ```
///
/// ## Absence
///
/// `Option<T>` fields are nullable. Clearing any other field writes the zero
/// value of its type (`Default` for the primitives, `String`, and types marked
/// `#[bean(default)]`); a field whose type has no zero value cannot be cleared.
///
/// ## Generics
///
/// Type parameters are supported and bounded by `Describe`; field types
/// mentioning a parameter are bounded by `PropertyType`. Lifetime and const
/// parameters are rejected.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    use crate::derive_data::BeanStruct;

    let ast = parse_macro_input!(input as DeriveInput);

    let info = match BeanStruct::from_derive_input(&ast) {
        Ok(info) => info,
        Err(err) => return err.into_compile_error().into(),
    };

    let tokens = impls::impl_bean(&info);

    quote! {
        const _: () = {
            #tokens
        };
    }
    .into()
}

/// # Opaque Derivation
///
/// `#[derive(Opaque)]` implements `Describe`, `Reflect` and `PropertyType` for
/// an atomic value type: an enum, a newtype, any type copied as a whole.
/// The type must implement `Clone`.
///
/// Accepts the `default`, `debug` and `extends(..)` type attributes described
/// in [`Bean`]. With `default`, the `Default` value is the zero value used
/// when a non-nullable property of this type is cleared.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Clone, Copy, Debug, Default, Opaque)]
/// #[bean(default, debug)]
/// enum Gender {
///     #[default]
///     Male,
///     Female,
/// }
/// ```
#[proc_macro_derive(Opaque, attributes(bean))]
pub fn derive_opaque(input: TokenStream) -> TokenStream {
    use crate::derive_data::{BeanMeta, TypeAttributes};

    let ast = parse_macro_input!(input as DeriveInput);

    let attrs = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let meta = match BeanMeta::new(attrs, &ast.ident, &ast.generics, true) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let tokens = impls::impl_opaque(&meta);

    quote! {
        const _: () = {
            #tokens
        };
    }
    .into()
}
