use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, punctuated::Punctuated, Attribute, Data, DeriveInput, Expr, Fields, Lit,
    Meta, Token,
};

use crate::common::{determine_field_type, extract_doc_comments, is_bool_type, is_vec_type};

/// Parsed contents of one field's `#[arg(...)]` or `#[free_arg(...)]`
/// attribute.
struct ArgMeta {
    free: bool,
    name: Option<String>,
    abbrev: Option<char>,
    switch: bool,
    default: Option<Expr>,
}

impl ArgMeta {
    fn empty(free: bool) -> Self {
        ArgMeta {
            free,
            name: None,
            abbrev: None,
            switch: false,
            default: None,
        }
    }
}

/// A derive macro that generates `CommandRecord` and `BindTarget` impls for
/// structs, so a `CommandProfile` can be compiled straight from the struct's
/// declaration.
pub fn command_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let declared = name.to_string();

    let fields = if let Data::Struct(data_struct) = &input.data {
        match &data_struct.fields {
            Fields::Named(fields_named) => &fields_named.named,
            _ => {
                return TokenStream::from(quote! {
                    compile_error!("Command only supports structs with named fields");
                });
            }
        }
    } else {
        return TokenStream::from(quote! {
            compile_error!("Command only supports structs");
        });
    };

    let command_name = match find_command_name(&input.attrs) {
        Ok(v) => v,
        Err(err_msg) => {
            return TokenStream::from(quote! { compile_error!(#err_msg); });
        }
    };
    let command_doc = extract_doc_comments(&input.attrs);

    let mut specs = Vec::new();
    let mut set_arms = Vec::new();
    let mut append_arms = Vec::new();

    for field in fields {
        let meta = match parse_field_meta(&field.attrs) {
            Ok(Some(meta)) => meta,
            // Unattributed fields are not arguments; they keep whatever
            // `Default` gives them.
            Ok(None) => continue,
            Err(err_msg) => {
                return TokenStream::from(quote! { compile_error!(#err_msg); });
            }
        };

        let ident = field.ident.as_ref().unwrap();
        let ident_str = ident.to_string();

        let field_type = match determine_field_type(&field.ty) {
            Ok(field_type) => field_type,
            Err(err_msg) => {
                return TokenStream::from(quote! { compile_error!(#err_msg); });
            }
        };
        if meta.switch && !is_bool_type(&field.ty) {
            let err_msg = format!("Switch argument `{}` must be boolean", ident_str);
            return TokenStream::from(quote! { compile_error!(#err_msg); });
        }

        let field_doc = extract_doc_comments(&field.attrs);
        let idx = specs.len();

        let mut spec = if meta.free {
            quote! { quip_command::FieldSpec::free(#ident_str, #field_type) }
        } else {
            quote! { quip_command::FieldSpec::named(#ident_str, #field_type) }
        };
        if let Some(explicit) = &meta.name {
            spec = quote! { #spec.with_name(#explicit) };
        }
        if let Some(abbrev) = &meta.abbrev {
            spec = quote! { #spec.with_abbrev(#abbrev) };
        }
        if meta.switch {
            spec = quote! { #spec.with_switch() };
        }
        if let Some(default) = &meta.default {
            spec = quote! { #spec.with_default(#default) };
        }
        if !field_doc.is_empty() {
            spec = quote! { #spec.with_doc(#field_doc) };
        }
        specs.push(spec);

        set_arms.push(quote! {
            #idx => match ::core::convert::TryInto::try_into(value) {
                Ok(v) => {
                    self.#ident = v;
                    true
                }
                Err(_) => false,
            },
        });
        if meta.free && is_vec_type(&field.ty) {
            append_arms.push(quote! {
                #idx => match ::core::convert::TryInto::try_into(value) {
                    Ok(v) => {
                        self.#ident.push(v);
                        true
                    }
                    Err(_) => false,
                },
            });
        }
    }

    let command_name = match &command_name {
        Some(explicit) => quote! { ::core::option::Option::Some(#explicit) },
        None => quote! { ::core::option::Option::None },
    };

    let expanded = quote! {
        impl quip_command::BindTarget for #name {
            fn set_field(
                &mut self,
                field: quip_command::FieldId,
                value: quip_command::FieldValue,
            ) -> bool {
                match field {
                    #(#set_arms)*
                    _ => {
                        let _ = value;
                        false
                    }
                }
            }

            fn append_field(
                &mut self,
                field: quip_command::FieldId,
                value: quip_command::FieldValue,
            ) -> bool {
                match field {
                    #(#append_arms)*
                    _ => {
                        let _ = value;
                        false
                    }
                }
            }
        }

        impl quip_command::CommandRecord for #name {
            fn declared_name() -> &'static str {
                #declared
            }

            fn command_name() -> ::core::option::Option<&'static str> {
                #command_name
            }

            fn doc() -> &'static str {
                #command_doc
            }

            fn field_specs() -> ::std::vec::Vec<quip_command::FieldSpec> {
                ::std::vec![#(#specs),*]
            }
        }
    };

    TokenStream::from(expanded)
}

/// Find the explicit command name in `#[command(name = "...")]`.
fn find_command_name(attrs: &[Attribute]) -> Result<Option<String>, String> {
    for attr in attrs {
        if !attr.path().is_ident("command") {
            continue;
        }
        let args = attr
            .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
            .map_err(|err| format!("Invalid #[command] attribute: {}", err))?;
        for meta in args {
            match meta {
                Meta::NameValue(name_value) if name_value.path.is_ident("name") => {
                    let explicit = lit_str(&name_value.value).ok_or_else(|| {
                        "#[command] name must be a string literal".to_string()
                    })?;
                    return Ok(Some(explicit));
                }
                other => {
                    return Err(format!(
                        "Unknown #[command] option: {}",
                        quote!(#other)
                    ));
                }
            }
        }
    }
    Ok(None)
}

/// Parse a field's argument attribute, if it carries one. A field with both
/// attributes is registered as a named argument.
fn parse_field_meta(attrs: &[Attribute]) -> Result<Option<ArgMeta>, String> {
    if let Some(attr) = attrs.iter().find(|a| a.path().is_ident("arg")) {
        return parse_named_attr(attr).map(Some);
    }
    if let Some(attr) = attrs.iter().find(|a| a.path().is_ident("free_arg")) {
        return parse_free_attr(attr).map(Some);
    }
    Ok(None)
}

fn parse_named_attr(attr: &Attribute) -> Result<ArgMeta, String> {
    let mut rv = ArgMeta::empty(false);
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(rv);
    }
    let args = attr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map_err(|err| format!("Invalid #[arg] attribute: {}", err))?;
    for meta in args {
        match meta {
            Meta::Path(path) if path.is_ident("switch") => rv.switch = true,
            Meta::NameValue(name_value) if name_value.path.is_ident("name") => {
                rv.name = Some(lit_str(&name_value.value).ok_or_else(|| {
                    "#[arg] name must be a string literal".to_string()
                })?);
            }
            Meta::NameValue(name_value) if name_value.path.is_ident("abbrev") => {
                rv.abbrev = Some(lit_char(&name_value.value).ok_or_else(|| {
                    "#[arg] abbrev must be a character literal".to_string()
                })?);
            }
            Meta::NameValue(name_value) if name_value.path.is_ident("default") => {
                rv.default = Some(name_value.value);
            }
            other => {
                return Err(format!("Unknown #[arg] option: {}", quote!(#other)));
            }
        }
    }
    Ok(rv)
}

fn parse_free_attr(attr: &Attribute) -> Result<ArgMeta, String> {
    let mut rv = ArgMeta::empty(true);
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(rv);
    }
    let args = attr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map_err(|err| format!("Invalid #[free_arg] attribute: {}", err))?;
    for meta in args {
        match meta {
            Meta::NameValue(name_value) if name_value.path.is_ident("default") => {
                rv.default = Some(name_value.value);
            }
            other => {
                return Err(format!("Unknown #[free_arg] option: {}", quote!(#other)));
            }
        }
    }
    Ok(rv)
}

fn lit_str(expr: &Expr) -> Option<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Some(lit_str.value());
        }
    }
    None
}

fn lit_char(expr: &Expr) -> Option<char> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Char(lit_char) = &expr_lit.lit {
            return Some(lit_char.value());
        }
    }
    None
}
