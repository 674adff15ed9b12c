//! This independent module is used to provide the required paths,
//! so as to minimize changes when the `bm_reflect` structure is modified.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `bm_reflect` crate.
///
/// 1. For crates that depend on `bm_reflect`, `::bm_reflect` is returned.
/// 2. For crates that depend on `beanmap`, `::beanmap::reflect` is returned.
/// 3. For other situations, `::bm_reflect` is returned, but this may be incorrect.
///
/// The cost of this function is relatively high (reading and parsing the
/// manifest), so the path is obtained once per derive and passed around.
pub(crate) fn bm_reflect() -> syn::Path {
    bm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bm_reflect"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! define_paths {
    ($($fn_name:ident => $($seg:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $fn_name(bm_reflect_path: &syn::Path) -> TokenStream {
            quote! { #bm_reflect_path::$($seg)::+ }
        }
    )*};
}

define_paths! {
    describe_ => Describe;
    introspect_ => Introspect;
    reflect_ => Reflect;
    property_type_ => PropertyType;
    type_desc_ => TypeDesc;
    type_kind_ => TypeKind;
    supertype_ => Supertype;
    bean_ => Bean;
    bean_info_ => BeanInfo;
    property_info_ => PropertyInfo;
    value_ => Value;
    assign_error_ => AssignError;
    assign_ => impls::assign;
    non_generic_type_desc_cell_ => impls::NonGenericTypeDescCell;
    generic_type_desc_cell_ => impls::GenericTypeDescCell;
    non_generic_bean_info_cell_ => impls::NonGenericBeanInfoCell;
    generic_bean_info_cell_ => impls::GenericBeanInfoCell;
    alloc_utils_ => __macro_exports::alloc_utils;
}
