//! Parsing of `#[live_object(...)]` and `#[accessor(...)]` attributes

use heck::ToUpperCamelCase;
use quote::quote;
use syn::parse::Parse;
use syn::{Attribute, Field, Ident, LitStr, Type};

/// How the derived type describes itself as a snapshot target
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Class,
    FinalClass,
    Interface,
}

/// Options from the struct-level `#[live_object(...)]` attribute
pub struct LiveObjectAttr {
    pub type_name:  LitStr,
    pub implements: Vec<LitStr>,
    pub kind:       TargetKind,
}

/// One field exposed as a zero-argument accessor
pub struct AccessorField {
    pub field:   Ident,
    pub ty:      Type,
    pub name:    String,
    pub returns: Option<LitStr>,
}

pub fn parse_live_object_attr(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<LiveObjectAttr> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("live_object")) else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "LiveObject requires #[live_object(type_name = \"...\")]",
        ));
    };

    let mut type_name = None;
    let mut implements = Vec::new();
    let mut kind = TargetKind::Class;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("type_name") {
            let value = meta.value()?;
            type_name = Some(value.parse::<LitStr>()?);
            Ok(())
        } else if meta.path.is_ident("implements") {
            let content;
            syn::parenthesized!(content in meta.input);
            implements.extend(content.parse_terminated(<LitStr as Parse>::parse, syn::Token![,])?);
            Ok(())
        } else if meta.path.is_ident("final_class") {
            kind = TargetKind::FinalClass;
            Ok(())
        } else if meta.path.is_ident("interface") {
            kind = TargetKind::Interface;
            Ok(())
        } else {
            Err(meta.error("unsupported live_object attribute"))
        }
    })?;

    let type_name = type_name.ok_or_else(|| {
        syn::Error::new_spanned(attr, "live_object attribute requires type_name = \"...\"")
    })?;

    Ok(LiveObjectAttr {
        type_name,
        implements,
        kind,
    })
}

/// Accessor name for a field without an explicit `name`
pub fn default_accessor_name(field: &Ident, ty: &Type) -> String {
    let prefix = if quote!(#ty).to_string() == "bool" {
        "is"
    } else {
        "get"
    };
    let field = field.to_string();
    format!("{prefix}{}", field.trim_start_matches("r#").to_upper_camel_case())
}

/// `Some` for fields marked `#[accessor]`
pub fn parse_accessor_field(field: &Field) -> syn::Result<Option<AccessorField>> {
    let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("accessor")) else {
        return Ok(None);
    };
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "accessors must be named fields"));
    };

    let mut name = None;
    let mut returns = None;
    if matches!(attr.meta, syn::Meta::List(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?;
                name = Some(value.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("returns") {
                let value = meta.value()?;
                returns = Some(value.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported accessor attribute"))
            }
        })?;
    }

    Ok(Some(AccessorField {
        name: name.unwrap_or_else(|| default_accessor_name(&ident, &field.ty)),
        field: ident,
        ty: field.ty.clone(),
        returns,
    }))
}
