use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type};
use syn::ext::IdentExt;

use super::{BeanMeta, FieldAttributes, TypeAttributes};

/// A property of a derived bean.
pub(crate) struct BeanField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Property name, after `rename`.
    pub name: LitStr,
}

/// A struct with named fields deriving `Bean`.
pub(crate) struct BeanStruct<'a> {
    meta: BeanMeta<'a>,
    fields: Vec<BeanField<'a>>,
}

impl<'a> BeanStruct<'a> {
    pub fn from_derive_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`#[derive(Bean)]` only supports structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`#[derive(Bean)]` only supports structs, use `#[derive(Opaque)]` for atomic values",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let has_reflect = attrs.needs_reflect();
        let mut meta = BeanMeta::new(attrs, &ast.ident, &ast.generics, has_reflect)?;

        let mut fields: Vec<BeanField> = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = field_attrs
                .rename
                .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

            if fields.iter().any(|f| f.name.value() == name.value()) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("duplicate property name `{}`", name.value()),
                ));
            }

            fields.push(BeanField {
                ident,
                ty: &field.ty,
                name,
            });
        }

        let active_types = fields
            .iter()
            .filter(|f| meta.mentions_type_param(f.ty))
            .map(|f| f.ty.clone())
            .collect();
        meta.set_active_types(active_types);

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &BeanMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[BeanField<'a>] {
        &self.fields
    }
}
