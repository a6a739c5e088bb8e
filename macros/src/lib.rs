//! Procedural macros for testing archive primitives.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn, LitStr};

/// Run a test function with a [tracing](https://docs.rs/tracing) subscriber that writes to the
/// test output, so logs show up next to the failing assertion.
///
/// The optional argument is the most verbose level to capture (`"TRACE"`, `"DEBUG"`, `"INFO"`,
/// `"WARN"` or `"ERROR"`). It defaults to `"DEBUG"`.
///
/// The crate using this attribute must depend on `tracing` and `tracing-subscriber`.
///
/// # Example
///
/// ```rust,ignore
/// use archivist_macros::test_traced;
/// use tracing::{debug, info};
///
/// #[test_traced("INFO")]
/// fn test_info_level() {
///     info!("shown");
///     debug!("not shown");
/// }
/// ```
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    // Parse the level, defaulting to DEBUG
    let level = if attr.is_empty() {
        String::from("DEBUG")
    } else {
        parse_macro_input!(attr as LitStr).value().to_uppercase()
    };
    let level_ident = match level.as_str() {
        "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR" => {
            syn::Ident::new(&level, proc_macro2::Span::call_site())
        }
        _ => {
            return syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("invalid level `{level}`, expected one of TRACE, DEBUG, INFO, WARN, ERROR"),
            )
            .to_compile_error()
            .into();
        }
    };

    // Extract function components
    let attrs = input.attrs;
    let vis = input.vis;
    let sig = input.sig;
    let block = input.block;

    // Wrap the body so the subscriber is only active for this test
    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level_ident)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block)
        }
    };
    TokenStream::from(expanded)
}
