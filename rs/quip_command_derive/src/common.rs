use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, GenericArgument, Lit, PathArguments, Type};

/// Extract doc comments as the documentation text of a command or field.
pub fn extract_doc_comments(attrs: &[Attribute]) -> String {
    let mut doc_comments = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc") {
            if let Ok(meta_name_value) = attr.meta.require_name_value() {
                if let Expr::Lit(expr_lit) = &meta_name_value.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        let comment = lit_str.value().trim().to_string();
                        if !comment.is_empty() {
                            doc_comments.push(comment);
                        }
                    }
                }
            }
        }
    }

    doc_comments.join(" ")
}

/// Map a Rust field type onto a `FieldType` expression.
///
/// The supported set is closed: `String`, `i64`, `f64`, `bool`,
/// `Option<scalar>` and `Vec<scalar>`. Everything else is reported as a
/// compile error at the declaration site.
pub fn determine_field_type(ty: &Type) -> Result<TokenStream, String> {
    match ty {
        Type::Path(type_path) if !type_path.path.segments.is_empty() => {
            let segment = &type_path.path.segments[0];
            let type_name = segment.ident.to_string();

            match type_name.as_str() {
                "String" => Ok(quote! { quip_command::FieldType::Text }),
                "i64" => Ok(quote! { quip_command::FieldType::I64 }),
                "f64" => Ok(quote! { quip_command::FieldType::F64 }),
                "bool" => Ok(quote! { quip_command::FieldType::Bool }),
                "Option" => {
                    let inner = generic_argument(segment)
                        .ok_or_else(|| "Unable to determine Option element type".to_string())?;
                    let inner_field_type = determine_field_type(inner)?;
                    Ok(quote! {
                        quip_command::FieldType::Option(::std::boxed::Box::new(#inner_field_type))
                    })
                }
                "Vec" => {
                    let inner = generic_argument(segment)
                        .ok_or_else(|| "Unable to determine Vec element type".to_string())?;
                    let inner_field_type = determine_field_type(inner)?;
                    Ok(quote! {
                        quip_command::FieldType::Array(::std::boxed::Box::new(#inner_field_type))
                    })
                }
                _ => Err(unsupported_type(&type_name)),
            }
        }
        _ => Err(unsupported_type(&quote!(#ty).to_string())),
    }
}

fn unsupported_type(name: &str) -> String {
    format!(
        "Unsupported field type: '{}'. Supported types: String, i64, f64, bool, \
         Option<T> and Vec<T> over those scalars",
        name
    )
}

/// The single generic argument of a path segment, e.g. `T` of `Vec<T>`.
fn generic_argument(segment: &syn::PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}

/// Check if a type is `Vec<_>` (a list receptor when used as a free
/// argument).
pub fn is_vec_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.first() {
            return segment.ident == "Vec";
        }
    }
    false
}

/// Check if a type is `bool`.
pub fn is_bool_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.first() {
            return segment.ident == "bool";
        }
    }
    false
}
