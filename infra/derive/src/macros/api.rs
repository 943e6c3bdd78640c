use super::derived_traits;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token};

struct ModelArgs {
    rename_all: LitStr,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]`.
pub fn expand_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let args = match parse_model_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    let derives = derived_traits(&input.attrs);
    let mut missing = Vec::new();
    for (name, path) in [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
        ("ToSchema", quote! { ::utoipa::ToSchema }),
    ] {
        if !derives.contains(name) {
            missing.push(path);
        }
    }
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let serde_attrs = input.attrs.iter().filter(|a| a.path().is_ident("serde"));
    let mut has_rename = false;
    let mut has_deny = false;
    for attr in serde_attrs {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                has_rename = true;
                let _ = meta.value()?.parse::<LitStr>()?;
            } else if meta.path.is_ident("deny_unknown_fields") {
                has_deny = true;
            }
            Ok(())
        });
    }

    let rename_all = &args.rename_all;
    let rename_attr = if has_rename {
        quote! {}
    } else {
        quote! { #[serde(rename_all = #rename_all)] }
    };
    let deny_attr = if args.deny_unknown_fields && !has_deny {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #derive_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands `#[api_handler]`.
pub fn expand_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = &input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[::utoipa::path(#args)]
        #vis #sig #block
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;

    let mut parsed = ModelArgs {
        rename_all: LitStr::new("camelCase", proc_macro2::Span::call_site()),
        deny_unknown_fields: true,
    };

    for meta in metas {
        let Meta::NameValue(MetaNameValue { path, value, .. }) = meta else {
            return Err(syn::Error::new_spanned(meta, "expected `key = value` arguments"));
        };
        let Expr::Lit(expr) = &value else {
            return Err(syn::Error::new_spanned(value, "expected a literal"));
        };

        match (&expr.lit, path.get_ident().map(ToString::to_string).as_deref()) {
            (Lit::Str(lit), Some("rename_all")) => parsed.rename_all = lit.clone(),
            (Lit::Bool(lit), Some("deny_unknown_fields")) => parsed.deny_unknown_fields = lit.value,
            _ => {
                return Err(syn::Error::new_spanned(
                    path,
                    "supported arguments: rename_all = \"...\", deny_unknown_fields = bool",
                ));
            },
        }
    }

    Ok(parsed)
}
