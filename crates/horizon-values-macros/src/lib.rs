//! Procedural macros for Horizon Values.
//!
//! This crate provides `#[derive(ConvertibleEnum)]`, which implements
//! `horizon_values_core::ConvertibleEnum` for a fieldless enum.
//!
//! # Attributes
//!
//! ## `#[convert(...)]` on the enum
//!
//! - `name = "TypeName"`: type name used by the registry (defaults to the ident)
//! - `flags`: values combine as bit flags
//!
//! ## `#[convert(...)]` on a variant
//!
//! - `rename = "Text"`: canonical name used for formatting
//! - `alias = "Text"`: extra spelling accepted when parsing; may repeat
//!
//! ```ignore
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, ConvertibleEnum)]
//! #[convert(name = "Key")]
//! pub enum Key {
//!     None = 0,
//!     #[convert(alias = "Back")]
//!     Backspace = 1,
//!     #[convert(alias = "Return")]
//!     Enter = 3,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input};

/// Derive `ConvertibleEnum` for a fieldless enum.
///
/// Discriminants may be implicit or explicit; they are read back with an
/// `as i64` cast, so any primitive `repr` works.
#[proc_macro_derive(ConvertibleEnum, attributes(convert))]
pub fn derive_convertible_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_convertible_enum(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed enum-level attributes.
struct EnumAttrs {
    name: Option<String>,
    flags: bool,
}

/// Parsed variant information.
struct VariantInfo {
    ident: Ident,
    name: String,
    aliases: Vec<String>,
}

fn impl_derive_convertible_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ConvertibleEnum derive only supports enums",
            ));
        }
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ConvertibleEnum derive does not support generic enums",
        ));
    }

    let enum_attrs = parse_enum_attrs(&input.attrs)?;

    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ConvertibleEnum variants cannot carry fields",
            ));
        }
        variants.push(parse_variant(&variant.ident, &variant.attrs)?);
    }

    let type_name = enum_attrs
        .name
        .unwrap_or_else(|| enum_name.to_string());
    let is_flags = enum_attrs.flags;

    let variant_meta = variants.iter().map(|info| {
        let ident = &info.ident;
        let name = &info.name;
        let aliases = &info.aliases;
        quote! {
            ::horizon_values_core::EnumVariant {
                name: #name,
                value: #enum_name::#ident as i64,
                aliases: &[#(#aliases),*],
            }
        }
    });

    let from_value_arms = variants.iter().map(|info| {
        let ident = &info.ident;
        quote! {
            if value == #enum_name::#ident as i64 {
                return ::core::option::Option::Some(#enum_name::#ident);
            }
        }
    });

    let expanded = quote! {
        impl ::horizon_values_core::ConvertibleEnum for #enum_name {
            const TYPE_NAME: &'static str = #type_name;
            const IS_FLAGS: bool = #is_flags;

            fn variants() -> &'static [::horizon_values_core::EnumVariant] {
                const VARIANTS: &[::horizon_values_core::EnumVariant] = &[#(#variant_meta),*];
                VARIANTS
            }

            fn to_value(self) -> i64 {
                self as i64
            }

            fn from_value(value: i64) -> ::core::option::Option<Self> {
                #(#from_value_arms)*
                ::core::option::Option::None
            }
        }
    };

    Ok(expanded)
}

/// Parse enum-level #[convert(...)] attributes.
fn parse_enum_attrs(attrs: &[Attribute]) -> syn::Result<EnumAttrs> {
    let mut result = EnumAttrs {
        name: None,
        flags: false,
    };

    for attr in attrs {
        if !attr.path().is_ident("convert") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                result.name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("flags") {
                result.flags = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `flags`"))
            }
        })?;
    }

    Ok(result)
}

/// Parse a variant and its #[convert(...)] attributes.
fn parse_variant(ident: &Ident, attrs: &[Attribute]) -> syn::Result<VariantInfo> {
    let mut info = VariantInfo {
        ident: ident.clone(),
        name: ident.to_string(),
        aliases: Vec::new(),
    };

    for attr in attrs {
        if !attr.path().is_ident("convert") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                info.name = value.value();
                Ok(())
            } else if meta.path.is_ident("alias") {
                let value: LitStr = meta.value()?.parse()?;
                info.aliases.push(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `alias = \"...\"`"))
            }
        })?;
    }

    Ok(info)
}
