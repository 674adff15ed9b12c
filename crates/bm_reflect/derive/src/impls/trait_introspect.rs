use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{BeanField, BeanStruct};

/// Generate implementation code for `Introspect`.
///
/// Each property gets a getter cloning the field out through
/// `PropertyType::to_value` and a setter delegating to `impls::assign`.
pub(crate) fn impl_trait_introspect(info: &BeanStruct) -> TokenStream {
    let meta = info.meta();
    let bm_reflect_path = meta.bm_reflect_path();
    let introspect_ = crate::path::introspect_(bm_reflect_path);
    let bean_ = crate::path::bean_(bm_reflect_path);
    let bean_info_ = crate::path::bean_info_(bm_reflect_path);
    let property_info_ = crate::path::property_info_(bm_reflect_path);
    let property_type_ = crate::path::property_type_(bm_reflect_path);
    let value_ = crate::path::value_(bm_reflect_path);
    let assign_ = crate::path::assign_(bm_reflect_path);
    let assign_error_ = crate::path::assign_error_(bm_reflect_path);
    let alloc_utils_ = crate::path::alloc_utils_(bm_reflect_path);

    let properties = info.fields().iter().map(|BeanField { ident, ty, name }| {
        quote! {
            #property_info_::new::<#ty>(
                #name,
                |bean: &dyn ::core::any::Any| match bean.downcast_ref::<Self>() {
                    ::core::option::Option::Some(bean) => #property_type_::to_value(&bean.#ident),
                    ::core::option::Option::None => ::core::option::Option::None,
                },
                |bean: &mut dyn ::core::any::Any, value: ::core::option::Option<#value_>| {
                    match bean.downcast_mut::<Self>() {
                        ::core::option::Option::Some(bean) => #assign_(&mut bean.#ident, value),
                        ::core::option::Option::None => {
                            ::core::result::Result::Err(#assign_error_::BeanMismatch)
                        }
                    }
                },
            )
        }
    });

    let with_constructor = if meta.attrs().default.is_some() {
        quote! {
            .with_constructor(|| -> #alloc_utils_::Box<dyn #bean_> {
                #alloc_utils_::Box::new(<Self as ::core::default::Default>::default())
            })
        }
    } else {
        crate::utils::empty()
    };

    let info_tokens = quote! {
        #bean_info_::new::<Self>(&[
            #( #properties, )*
        ])
        #with_constructor
    };

    let inner_cell_tokens = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_bean_info_cell_(bm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| { #info_tokens })
        }
    } else {
        let cell_ = crate::path::non_generic_bean_info_cell_(bm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| { #info_tokens })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #introspect_ for #ident #ty_generics #where_clause {
            fn bean_info() -> &'static #bean_info_ {
                #inner_cell_tokens
            }
        }
    }
}
