use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_describe, impl_trait_reflect};
use crate::derive_data::BeanMeta;

/// Implement `Describe`, `Reflect` and `PropertyType` for an atomic type.
pub(crate) fn impl_opaque(meta: &BeanMeta) -> TokenStream {
    let type_kind_ = crate::path::type_kind_(meta.bm_reflect_path());

    let describe_tokens = impl_trait_describe(meta, quote!(#type_kind_::Opaque));
    let reflect_tokens = impl_trait_reflect(meta);

    quote! {
        #describe_tokens

        #reflect_tokens
    }
}
