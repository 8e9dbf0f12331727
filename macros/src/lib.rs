use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Expr, ExprLit, ItemFn, Lit, MetaNameValue, ReturnType};

/// Test attribute for rxflow tests.
///
/// Installs a `tracing-subscriber` test writer (filtered by `RUST_LOG`) before
/// the body runs. `#[rxflow_macro::test(timeout_ms = 1000)]` additionally runs
/// the body on its own thread and fails the test if it has not finished in
/// time, so a lost cross-thread event fails fast instead of hanging the suite.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxflow_macro::test does not support async tests; rxflow pipelines are driven by threads",
      )
      .to_compile_error(),
    );
  }
  if !input.sig.inputs.is_empty() {
    return TokenStream::from(
      syn::Error::new(input.sig.inputs.span(), "test functions take no arguments")
        .to_compile_error(),
    );
  }

  let raw_args = proc_macro2::TokenStream::from(attr);
  let timeout_ms = if raw_args.is_empty() {
    None
  } else {
    match parse_timeout(raw_args) {
      Ok(ms) => Some(ms),
      Err(err) => return TokenStream::from(err.to_compile_error()),
    }
  };

  let ItemFn { attrs, vis, sig, block } = input;
  let name = sig.ident.to_string();
  let init_tracing = quote! {
    let _ = ::tracing_subscriber::fmt()
      .with_test_writer()
      .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
      .try_init();
  };

  let expanded = match timeout_ms {
    None => quote! {
      #[test]
      #(#attrs)*
      #vis #sig {
        #init_tracing
        #block
      }
    },
    Some(ms) => {
      if !matches!(sig.output, ReturnType::Default) {
        return TokenStream::from(
          syn::Error::new(sig.output.span(), "timed tests must return `()`").to_compile_error(),
        );
      }
      quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
          #init_tracing
          let (__done_tx, __done_rx) = ::std::sync::mpsc::channel::<()>();
          let __body = ::std::thread::Builder::new()
            .name(::std::string::String::from(#name))
            .spawn(move || {
              #block;
              let _ = __done_tx.send(());
            })
            .expect("failed to spawn test thread");
          match __done_rx.recv_timeout(::std::time::Duration::from_millis(#ms)) {
            ::std::result::Result::Err(::std::sync::mpsc::RecvTimeoutError::Timeout) => {
              panic!("test `{}` did not finish within {} ms", #name, #ms)
            }
            _ => {
              if let ::std::result::Result::Err(panic) = __body.join() {
                ::std::panic::resume_unwind(panic);
              }
            }
          }
        }
      }
    }
  };

  TokenStream::from(expanded)
}

fn parse_timeout(args: proc_macro2::TokenStream) -> syn::Result<u64> {
  let span = args.span();
  let meta: MetaNameValue = syn::parse2(args).map_err(|_| {
    syn::Error::new(
      span,
      "rxflow_macro::test only accepts: #[rxflow_macro::test] or #[rxflow_macro::test(timeout_ms = N)]",
    )
  })?;
  if !meta.path.is_ident("timeout_ms") {
    return Err(syn::Error::new(meta.path.span(), "unknown argument, expected `timeout_ms`"));
  }
  match &meta.value {
    Expr::Lit(ExprLit { lit: Lit::Int(lit), .. }) => lit.base10_parse::<u64>(),
    other => Err(syn::Error::new(other.span(), "`timeout_ms` must be an integer literal")),
  }
}
