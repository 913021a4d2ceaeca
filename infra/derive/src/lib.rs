#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by the HR Hub workspace.
//!
//! * [`hrhub_error`] turns an enum into a `thiserror` error with context helpers.
//! * [`hrhub_slice`] wraps a feature state struct into a cheaply cloneable slice handle.
//! * [`api_model`] / [`api_handler`] keep DTOs and axum handlers consistent with the `OpenAPI`
//!   document published by the server.
//!
//! Examples are `ignore`d here because proc-macro crates cannot use their own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a domain error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait with `.context(..)` for `Result<T, Name>` and for `Result<T, Source>` of
///   every variant that wraps a `source`.
/// * `From<Source>` for each such variant (context starts empty).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a `source` (or `#[source]`/`#[from]` field)
/// must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[hrhub_derive::hrhub_error]
/// pub enum StoreError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: hrhub_database::DatabaseError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn hrhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a vertical slice handle.
///
/// `#[hrhub_slice] pub struct Documentation { .. }` produces `DocumentationInner` with the
/// declared fields, and `Documentation` as an `Arc<DocumentationInner>` wrapper that derefs to the
/// inner state and implements `hrhub_kernel::domain::registry::FeatureSlice`.
///
/// ```rust,ignore
/// #[hrhub_derive::hrhub_slice]
/// pub struct Documentation {
///     pub service: DocumentationService<SurrealDocumentationStore>,
/// }
///
/// let slice = Documentation::new(DocumentationInner { service });
/// ```
#[proc_macro_attribute]
pub fn hrhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

/// Declares an API data model.
///
/// Adds `Debug`, `serde::Serialize`, `serde::Deserialize` when missing, derives
/// `utoipa::ToSchema` when the consuming crate's `server` feature is enabled, and applies
/// `#[serde(rename_all = "camelCase")]`.
///
/// # Arguments
///
/// * `rename_all = "..."` overrides the rename policy.
/// * `deny_unknown_fields = true` rejects unknown fields on input models.
///
/// ```rust,ignore
/// #[hrhub_derive::api_model(deny_unknown_fields = true)]
/// pub struct CodesRequest {
///     pub codes: Vec<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::api::expand_model(attr.into(), input).into()
}

/// Registers an axum handler with the `OpenAPI` document.
///
/// Forwards its arguments to `utoipa::path` (only when the consuming crate's `server` feature is
/// enabled) and silences `clippy::unused_async` for handlers that do not await.
///
/// ```rust,ignore
/// #[hrhub_derive::api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse { .. }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_handler(args.into(), input).into()
}
