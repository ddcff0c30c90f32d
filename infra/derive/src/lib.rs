#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every FieldCheck crate: error enums, feature slices,
//! API models/handlers and the runtime entry point.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own macros;
//! the consuming crates carry the compiled versions in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a synchronous `main` running on a
/// [`fcheck_runtime`](https://docs.rs/fcheck-runtime) profile.
///
/// Profiles: `high_performance`, `memory_efficient` or `default` (the default when omitted).
///
/// ```rust,ignore
/// #[fcheck_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a request/response DTO.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, a `utoipa::ToSchema` derive under
/// the `server` feature, `rename_all = "camelCase"` and `deny_unknown_fields`.
/// Both serde defaults can be changed: `#[api_model(rename_all = "snake_case",
/// deny_unknown_fields = false)]`.
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attaches `utoipa::path` metadata to an Axum handler when the `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)))]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum on top of `thiserror`.
///
/// * Derives `Debug` and `thiserror::Error` unless already present.
/// * Generates `<Name>Ext` with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant carrying a `source` field.
/// * Generates `From<Source>` for those variants so `?` works.
/// * Generates `From<&'static str>` / `From<String>` when an `Internal` variant exists.
/// * Provides `format_context` for use inside `#[error(...)]` strings.
///
/// Every variant must use named fields; variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[fcheck_derive::fcheck_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn fcheck_error(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Declares the shared state of a feature slice.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that derefs to it
/// and implements `FeatureSlice`, so it can be registered in the API state.
///
/// Optional arguments: `name = "..."` for health reports, and `readiness` to forward
/// `FeatureSlice::is_ready` to an inherent `is_ready(&self) -> bool` on `<Name>Inner`.
///
/// ```rust,ignore
/// #[fcheck_derive::fcheck_slice(name = "landcover", readiness)]
/// pub struct LandCover {
///     classifier: Arc<dyn Classifier>,
/// }
///
/// impl LandCoverInner {
///     fn is_ready(&self) -> bool { self.classifier.is_ready() }
/// }
/// ```
#[proc_macro_attribute]
pub fn fcheck_slice(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(attr.into(), input).into()
}
