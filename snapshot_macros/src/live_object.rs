//! LiveObject derive macro implementation

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use crate::attributes::{
    AccessorField, LiveObjectAttr, TargetKind, parse_accessor_field, parse_live_object_attr,
};

/// Implementation of the LiveObject derive macro
pub fn derive_live_object_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "LiveObject can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "LiveObject can only be derived for structs with named fields",
        ));
    };

    let attr = parse_live_object_attr(&input.attrs, struct_name)?;

    let mut accessors = Vec::new();
    let mut seen = HashSet::new();
    for field in &fields.named {
        let Some(accessor) = parse_accessor_field(field)? else {
            continue;
        };
        if !seen.insert(accessor.name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate accessor name {}", accessor.name),
            ));
        }
        accessors.push(accessor);
    }

    let live_object_impl = generate_live_object(input, &attr, &accessors);
    let described_impl = generate_described(input, &attr, &accessors);

    Ok(quote! {
        #live_object_impl

        #described_impl
    })
}

fn generate_live_object(
    input: &DeriveInput,
    attr: &LiveObjectAttr,
    accessors: &[AccessorField],
) -> TokenStream2 {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_name = &attr.type_name;
    let implements = &attr.implements;

    let arms = accessors.iter().map(|accessor| {
        let name = &accessor.name;
        let field = &accessor.field;
        quote! {
            #name => ::core::result::Result::Ok(::object_snapshot::ToValue::to_value(&self.#field))
        }
    });

    quote! {
        impl #impl_generics ::object_snapshot::LiveObject for #struct_name #ty_generics #where_clause {
            fn runtime_type(&self) -> ::object_snapshot::RuntimeType {
                ::object_snapshot::RuntimeType::new(#type_name)
                    #(.implements(#implements))*
            }

            fn invoke(
                &self,
                accessor: &str,
            ) -> ::core::result::Result<::object_snapshot::Value, ::object_snapshot::AccessorError> {
                match accessor {
                    #(#arms,)*
                    other => ::core::result::Result::Err(
                        ::object_snapshot::AccessorError::UnknownAccessor {
                            type_name: ::object_snapshot::TypeName::new(#type_name),
                            accessor:  other.to_string(),
                        },
                    ),
                }
            }
        }
    }
}

fn generate_described(
    input: &DeriveInput,
    attr: &LiveObjectAttr,
    accessors: &[AccessorField],
) -> TokenStream2 {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_name = &attr.type_name;

    let constructor = match attr.kind {
        TargetKind::Class => quote! { ::object_snapshot::TargetType::class(#type_name) },
        TargetKind::FinalClass => {
            quote! { ::object_snapshot::TargetType::class(#type_name).final_class() }
        }
        TargetKind::Interface => quote! { ::object_snapshot::TargetType::interface(#type_name) },
    };

    let declarations = accessors.iter().map(|accessor| {
        let name = &accessor.name;
        let ty = &accessor.ty;
        let returns = accessor.returns.as_ref().map_or_else(
            || quote! { <#ty as ::object_snapshot::ToValue>::declared_type() },
            |returns| quote! { ::object_snapshot::TypeRef::named(#returns) },
        );
        quote! { .accessor(#name, #returns) }
    });

    quote! {
        impl #impl_generics ::object_snapshot::Described for #struct_name #ty_generics #where_clause {
            fn type_name() -> ::object_snapshot::TypeName {
                ::object_snapshot::TypeName::new(#type_name)
            }

            fn describe_type() -> ::object_snapshot::TargetType {
                #constructor
                    #(#declarations)*
            }
        }
    }
}
