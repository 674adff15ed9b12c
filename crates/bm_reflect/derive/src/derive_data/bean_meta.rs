use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Information shared by every derived impl of one type.
pub(crate) struct BeanMeta<'a> {
    bm_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    /// Whether `Reflect` and `PropertyType` are implemented for the type.
    has_reflect: bool,
    /// Field types mentioning a type parameter, bounded by `PropertyType`.
    active_types: Vec<Type>,
}

impl<'a> BeanMeta<'a> {
    pub fn new(
        attrs: TypeAttributes,
        ident: &'a Ident,
        generics: &'a Generics,
        has_reflect: bool,
    ) -> syn::Result<Self> {
        for param in &generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lt) => {
                    return Err(syn::Error::new_spanned(
                        lt,
                        "mapped types must be 'static and cannot have lifetime parameters",
                    ));
                }
                GenericParam::Const(c) => {
                    return Err(syn::Error::new_spanned(
                        c,
                        "const parameters are not supported",
                    ));
                }
            }
        }

        Ok(Self {
            bm_reflect_path: crate::path::bm_reflect(),
            attrs,
            ident,
            generics,
            has_reflect,
            active_types: Vec::new(),
        })
    }

    pub(super) fn set_active_types(&mut self, active_types: Vec<Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn bm_reflect_path(&self) -> &Path {
        &self.bm_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn has_reflect(&self) -> bool {
        self.has_reflect
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Generate the type path expression, `&'static str` for plain types and
    /// an owned `String` for generic ones.
    ///
    /// For `Pair<i32, String>` declared in `app::model`, this evaluates to
    /// `"app::model::Pair<i32, alloc::string::String>"`.
    pub fn type_path_expression(&self) -> TokenStream {
        let name = self.ident.to_string();
        if !self.impl_with_generic() {
            return quote! {
                ::core::concat!(::core::module_path!(), "::", #name)
            };
        }

        let describe_ = crate::path::describe_(&self.bm_reflect_path);
        let alloc_utils_ = crate::path::alloc_utils_(&self.bm_reflect_path);
        let params = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(<#ident as #describe_>::type_desc().path())
        });

        quote! {
            #alloc_utils_::format!(
                "{}::{}<{}>",
                ::core::module_path!(),
                #name,
                [#(#params),*].join(", "),
            )
        }
    }

    /// Split generics for an impl block, adding the bounds the generated code
    /// relies on:
    ///
    /// - `Self: Send + Sync + 'static`,
    /// - `T: Describe` for each type parameter,
    /// - `FieldTy: PropertyType` for each field type mentioning a type parameter,
    /// - `Self: Default`, `Self: Clone` and `Self: Debug` according to the flags.
    ///
    /// Every derived impl of a type shares the same bounds, so that the impls
    /// can refer to each other.
    pub fn split_generics(&self) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates: Vec<TokenStream> = Vec::new();

        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
        }

        if self.impl_with_generic() {
            let describe_ = crate::path::describe_(&self.bm_reflect_path);
            let property_type_ = crate::path::property_type_(&self.bm_reflect_path);

            predicates.push(quote!(Self: ::core::marker::Send + ::core::marker::Sync + 'static));
            predicates.extend(self.generics.type_params().map(|param| {
                let ident = &param.ident;
                quote!(#ident: #describe_)
            }));
            predicates.extend(
                self.active_types
                    .iter()
                    .map(|ty| quote!(#ty: #property_type_)),
            );
            if self.attrs.default.is_some() {
                predicates.push(quote!(Self: ::core::default::Default));
            }
            if self.has_reflect {
                predicates.push(quote!(Self: ::core::clone::Clone));
                if self.attrs.debug.is_some() {
                    predicates.push(quote!(Self: ::core::fmt::Debug));
                }
            }
        }

        let where_clause = if predicates.is_empty() {
            TokenStream::new()
        } else {
            quote!(where #(#predicates,)*)
        };

        (impl_generics, ty_generics, where_clause)
    }

    /// Returns `true` if `ty` mentions one of the type parameters.
    pub fn mentions_type_param(&self, ty: &Type) -> bool {
        fn visit(idents: &[&Ident], tokens: TokenStream) -> bool {
            tokens.into_iter().any(|tree| match tree {
                proc_macro2::TokenTree::Ident(ident) => idents.contains(&&ident),
                proc_macro2::TokenTree::Group(group) => visit(idents, group.stream()),
                _ => false,
            })
        }

        let idents: Vec<&Ident> = self.generics.type_params().map(|p| &p.ident).collect();
        !idents.is_empty() && visit(&idents, ty.to_token_stream())
    }
}
