use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_describe, impl_trait_introspect, impl_trait_reflect};
use crate::derive_data::BeanStruct;

/// Implement `Describe` + `Introspect` for a struct, plus `Reflect` and
/// `PropertyType` when the bean is declared `clone`.
pub(crate) fn impl_bean(info: &BeanStruct) -> TokenStream {
    let meta = info.meta();
    let bm_reflect_path = meta.bm_reflect_path();
    let type_kind_ = crate::path::type_kind_(bm_reflect_path);
    let introspect_ = crate::path::introspect_(bm_reflect_path);

    let describe_tokens =
        impl_trait_describe(meta, quote!(#type_kind_::Bean(<Self as #introspect_>::bean_info)));

    let introspect_tokens = impl_trait_introspect(info);

    let reflect_tokens = if meta.has_reflect() {
        impl_trait_reflect(meta)
    } else {
        crate::utils::empty()
    };

    quote! {
        #describe_tokens

        #introspect_tokens

        #reflect_tokens
    }
}
