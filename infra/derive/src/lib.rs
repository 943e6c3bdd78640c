#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every ConfHub crate:
//!
//! * [`confhub_error`] turns an enum into a `thiserror` error with `.context(...)` support.
//! * [`confhub_slice`] turns a struct into an `Arc`-backed feature slice handle.
//! * [`api_model`] and [`api_handler`] wire DTOs and Axum handlers into the `OpenAPI` document.
//!
//! Examples are `ignore`d here because they need the consuming crates' dependencies.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a crate error enum.
///
/// Every variant must use named fields. Variants wrapping an upstream error carry a
/// `source` field (or a field marked `#[source]`/`#[from]`) and a
/// `context: Option<Cow<'static, str>>` field.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, SourceError>` of every source variant.
/// * `From<SourceError>` for every source variant.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-local `format_context` helper for `#[error(...)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[confhub_derive::confhub_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, StoreError> {
///     std::fs::read_to_string("conference.toml").context("Reading conference file")
/// }
/// ```
#[proc_macro_attribute]
pub fn confhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`, derefs to it
/// and implements `FeatureSlice` so it can be registered in the API state.
///
/// ```rust,ignore
/// #[confhub_derive::confhub_slice]
/// pub struct Sessions {}
///
/// let slice = Sessions::new(SessionsInner {});
/// ```
#[proc_macro_attribute]
pub fn confhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

/// Declares an API data model.
///
/// Adds `Debug`, `Serialize`, `Deserialize` and `utoipa::ToSchema` when missing, renames
/// fields to `camelCase` and denies unknown fields. Both policies can be overridden:
///
/// ```rust,ignore
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct Envelope {
///     pub data: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_model(attr.into(), input).into()
}

/// Registers an Axum handler in the `OpenAPI` document.
///
/// Arguments are forwarded verbatim to `utoipa::path`.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/profile", responses((status = OK, body = ProfileForm)))]
/// pub async fn get_profile(user: CurrentUser) -> Result<Json<ProfileForm>, ApiError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_handler(args.into(), input).into()
}
