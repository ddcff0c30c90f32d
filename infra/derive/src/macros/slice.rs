use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ItemStruct, Lit, LitStr, Meta, Token};

#[derive(Default)]
struct SliceArgs {
    name: Option<LitStr>,
    readiness: bool,
}

/// Splits a slice declaration into an `...Inner` state struct and a cheap, cloneable
/// `Arc` wrapper that registers itself as a `FeatureSlice`.
///
/// `name = "..."` sets the health-report name; `readiness` forwards `is_ready` to an
/// inherent `is_ready(&self) -> bool` on the inner struct.
pub fn expand_slice(args: TokenStream, input: ItemStruct) -> TokenStream {
    let args = match parse_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    let ItemStruct { attrs, vis, ident, fields, .. } = &input;
    let inner = format_ident!("{ident}Inner");

    let name_fn = args.name.map(|name| {
        quote! {
            fn name(&self) -> &'static str {
                #name
            }
        }
    });
    let ready_fn = args.readiness.then(|| {
        quote! {
            fn is_ready(&self) -> bool {
                self.inner.is_ready()
            }
        }
    });

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner #fields

        #[derive(Debug, Clone)]
        #vis struct #ident {
            inner: std::sync::Arc<#inner>,
        }

        impl #ident {
            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #ident {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::fcheck_kernel::domain::registry::FeatureSlice for #ident {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #name_fn
            #ready_fn
        }
    }
}

fn parse_args(args: TokenStream) -> syn::Result<SliceArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = SliceArgs::default();

    for meta in metas {
        match &meta {
            Meta::Path(path) if path.is_ident("readiness") => parsed.readiness = true,
            Meta::NameValue(nv) if nv.path.is_ident("name") => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(lit) => parsed.name = Some(lit.clone()),
                    _ => return Err(syn::Error::new_spanned(&nv.value, "name must be a string")),
                },
                _ => return Err(syn::Error::new_spanned(&nv.value, "name must be a string")),
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "unsupported argument, expected `name = \"...\"` or `readiness`",
                ));
            },
        }
    }

    Ok(parsed)
}
