use caseview_codegen::{
    AttributeArgs, Diagnostic, DiagnosticSink, GeneratorConfig, Severity, generate_tokens,
    is_switch_case_view, item_attributes, repeated_attribute_error,
};
use proc_macro_error::{abort, emit_error, emit_warning};
use proc_macro2::TokenStream;
use quote::quote;

/// Forwards generator diagnostics to the compiler.
struct CompilerSink;

impl DiagnosticSink for CompilerSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let span = diagnostic.location.span;
        match diagnostic.severity {
            Severity::Error => emit_error!(span, "{}", diagnostic.message),
            Severity::Warning => emit_warning!(span, "{}", diagnostic.message),
        }
    }
}

/// Keeps `item` as written and appends the generated dispatcher, if any.
/// The attribute being expanded is already stripped from `item`, so any
/// `#[with_switch_case_view]` still on it is a repeat.
pub fn expand(args: TokenStream, item: TokenStream) -> TokenStream {
    let config = match syn::parse2::<AttributeArgs>(args) {
        Ok(args) => args.apply(GeneratorConfig::default()),
        Err(e) => abort!(e.span(), e),
    };

    if let Some(repeated) = syn::parse2::<syn::Item>(item.clone())
        .ok()
        .and_then(|parsed| item_attributes(&parsed).iter().find(|a| is_switch_case_view(a)).cloned())
    {
        let e = repeated_attribute_error(&repeated);
        emit_error!(e.span(), e);
        return item;
    }

    let artifact = generate_tokens(item.clone(), &config).report(&mut CompilerSink);

    quote! {
        #item
        #artifact
    }
}
