//! Parsing of the `#[bean(...)]` helper attribute.

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Attribute, LitStr, Path, Token, meta::ParseNestedMeta, parenthesized};

use crate::BEAN_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Type attributes

/// Type-level flags.
///
/// - `default`: the type implements `Default`. Enables the zero value and, for
///   beans, the default constructor.
/// - `clone`: the type implements `Clone`. A bean marked `clone` can itself be
///   used as a property value.
/// - `debug`: the type implements `Debug`, used by `Reflect::reflect_debug`.
/// - `extends(A, B, ...)`: declared supertypes, each implementing `From<Self>`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub clone: Option<Span>,
    pub debug: Option<Span>,
    pub extends: Vec<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.get_ident().map(|ident| ident.span());
        if meta.path.is_ident("default") {
            set_flag(&mut self.default, span, &meta)
        } else if meta.path.is_ident("clone") {
            set_flag(&mut self.clone, span, &meta)
        } else if meta.path.is_ident("debug") {
            set_flag(&mut self.debug, span, &meta)
        } else if meta.path.is_ident("extends") {
            let content;
            parenthesized!(content in meta.input);
            let paths = Punctuated::<Path, Token![,]>::parse_terminated(&content)?;
            self.extends.extend(paths);
            Ok(())
        } else {
            Err(meta.error("unsupported bean attribute, expected one of `default`, `clone`, `debug`, `extends(..)`"))
        }
    }

    /// `extends` upcasts by value, so the bean must be cloneable.
    pub fn needs_reflect(&self) -> bool {
        self.clone.is_some() || !self.extends.is_empty()
    }
}

fn set_flag(flag: &mut Option<Span>, span: Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate flag"));
    }
    *flag = span;
    Ok(())
}

// -----------------------------------------------------------------------------
// Field attributes

/// Field-level options.
///
/// - `skip`: the field is not a property.
/// - `rename = "name"`: the property name, defaults to the field name.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `skip` or `rename = \"..\"`"))
                }
            })?;
        }
        Ok(this)
    }
}
