use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, ItemFn, ReturnType, Type};

/// Expands `#[fcheck_runtime::main(profile)]` into a synchronous `main` that builds the
/// selected Tokio runtime and blocks on the original body.
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            input.sig.fn_token,
            "#[fcheck_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.ident,
            "#[fcheck_runtime::main] requires the function to return a Result",
        )
        .to_compile_error();
    }

    let profile = match runtime_profile(args) {
        Ok(profile) => profile,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = &input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #profile;
            let runtime = ::fcheck_runtime::build_runtime_with_config(&config)?;
            runtime.block_on(async move #block)
        }
    }
}

fn runtime_profile(args: TokenStream) -> syn::Result<TokenStream> {
    if args.is_empty() {
        return Ok(quote! { ::fcheck_runtime::RuntimeConfig::default() });
    }

    let ident: syn::Ident = syn::parse2(args)?;
    match ident.to_string().as_str() {
        "default" => Ok(quote! { ::fcheck_runtime::RuntimeConfig::default() }),
        "high_performance" => Ok(quote! { ::fcheck_runtime::RuntimeConfig::high_performance() }),
        "memory_efficient" => Ok(quote! { ::fcheck_runtime::RuntimeConfig::memory_efficient() }),
        _ => Err(Error::new_spanned(
            ident,
            "unknown runtime profile, expected one of: default, high_performance, memory_efficient",
        )),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
