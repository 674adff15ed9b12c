use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanMeta;

/// Generate implementation code for `Reflect` and `PropertyType`.
///
/// Both rely on `Clone`; `reflect_debug` is overridden only with the `debug` flag.
pub(crate) fn impl_trait_reflect(meta: &BeanMeta) -> TokenStream {
    let bm_reflect_path = meta.bm_reflect_path();
    let describe_ = crate::path::describe_(bm_reflect_path);
    let reflect_ = crate::path::reflect_(bm_reflect_path);
    let property_type_ = crate::path::property_type_(bm_reflect_path);
    let type_desc_ = crate::path::type_desc_(bm_reflect_path);
    let value_ = crate::path::value_(bm_reflect_path);

    let reflect_debug_tokens = if meta.attrs().debug.is_some() {
        quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    } else {
        crate::utils::empty()
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_type_desc(&self) -> &'static #type_desc_ {
                <Self as #describe_>::type_desc()
            }

            #[inline]
            fn clone_value(&self) -> #value_ {
                #value_::new(::core::clone::Clone::clone(self))
            }

            #reflect_debug_tokens
        }

        impl #impl_generics #property_type_ for #ident #ty_generics #where_clause {
            #[inline]
            fn to_value(&self) -> ::core::option::Option<#value_> {
                ::core::option::Option::Some(#reflect_::clone_value(self))
            }

            #[inline]
            fn into_value(self) -> ::core::option::Option<#value_> {
                ::core::option::Option::Some(#value_::new(self))
            }

            #[inline]
            fn from_value(value: #value_) -> ::core::result::Result<Self, #value_> {
                value.coerce::<Self>()
            }
        }
    }
}
