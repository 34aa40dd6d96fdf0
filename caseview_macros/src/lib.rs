// Procedural macros for switch-case views.
//
// The attribute is a thin host around `caseview_codegen`: it parses its
// arguments into a `GeneratorConfig`, runs the pipeline on the annotated item
// and forwards the diagnostics to the compiler.

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;

mod switch_view;

/// Attribute macro generating a `<Enum>View` dispatcher for a tagged union.
///
/// The dispatcher holds a `Store` over the enum, matches on the active
/// variant, narrows the store to that variant's first field and renders it
/// with `<Payload>View`. Variants without a nameable payload render nothing.
///
/// # Arguments
///
/// - `runtime = path`: crate providing `Store`, `View`, `FromStore`,
///   `HasView` and `Element` (default `::caseview`)
/// - `renderers(Payload = path, ...)`: explicit renderers for payload types
///   that do not follow the `<Payload>View` convention
///
/// # Example
///
/// ```ignore
/// #[with_switch_case_view]
/// pub enum Sheet {
///     Info(Info),
///     Settings(Settings),
/// }
///
/// #[with_switch_case_view(renderers(Info = panels::CompactInfo))]
/// pub enum Sidebar {
///     Info(Info),
/// }
/// ```
///
/// Applying the attribute to anything but an `enum` is an error; an enum
/// without variants yields a view that renders nothing, with a warning.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn with_switch_case_view(args: TokenStream, item: TokenStream) -> TokenStream {
    switch_view::expand(args.into(), item.into()).into()
}
