use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanMeta;

/// Generate implementation code for `Describe`.
///
/// `kind_tokens` is the `TypeKind` expression, `Opaque` or `Bean(..)`.
/// The zero value is emitted when the type is `Default` and has a `Reflect` impl.
pub(crate) fn impl_trait_describe(meta: &BeanMeta, kind_tokens: TokenStream) -> TokenStream {
    let bm_reflect_path = meta.bm_reflect_path();
    let describe_ = crate::path::describe_(bm_reflect_path);
    let type_desc_ = crate::path::type_desc_(bm_reflect_path);
    let supertype_ = crate::path::supertype_(bm_reflect_path);
    let value_ = crate::path::value_(bm_reflect_path);

    let path_expr = meta.type_path_expression();
    let ident_str = meta.ident().to_string();

    let with_supertypes = if meta.attrs().extends.is_empty() {
        crate::utils::empty()
    } else {
        let extends = meta.attrs().extends.iter();
        quote! {
            .with_supertypes([
                #( #supertype_::of::<Self, #extends>(), )*
            ])
        }
    };

    let with_zero = if meta.attrs().default.is_some() && meta.has_reflect() {
        quote! {
            .with_zero(|| #value_::new(<Self as ::core::default::Default>::default()))
        }
    } else {
        crate::utils::empty()
    };

    let desc_tokens = quote! {
        #type_desc_::new::<Self>(#path_expr, #ident_str, #kind_tokens)
            #with_supertypes
            #with_zero
    };

    let inner_cell_tokens = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_desc_cell_(bm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| { #desc_tokens })
        }
    } else {
        let cell_ = crate::path::non_generic_type_desc_cell_(bm_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| { #desc_tokens })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #describe_ for #ident #ty_generics #where_clause {
            fn type_desc() -> &'static #type_desc_ {
                #inner_cell_tokens
            }
        }
    }
}
