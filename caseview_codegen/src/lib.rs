//! Switch-case view generation for tagged unions.
//!
//! Given an `enum` whose variants each wrap (at most) one payload type, the
//! generator synthesizes a `<Enum>View` dispatcher that matches on the active
//! variant, narrows the parent store to that variant and delegates rendering
//! to `<Payload>View`.
//!
//! The pipeline runs in four stages, each in its own module:
//!
//! 1. [`switch_view::parse`] extracts a [`UnionDescriptor`] from a declaration,
//! 2. [`switch_view::analyze`] validates it,
//! 3. [`switch_view::lower`] builds the target-neutral [`DispatchNode`],
//! 4. [`switch_view::codegen`] emits the Rust items.
//!
//! [`generate`] runs all of them and collects diagnostics. Hosts (the
//! `#[with_switch_case_view]` attribute, the `caseview` CLI) forward the
//! diagnostics through a [`DiagnosticSink`].
//!
//! ```ignore
//! let item: syn::Item = syn::parse_quote! {
//!     enum Sheet { Info(Info), Settings(Settings) }
//! };
//! let expansion = caseview_codegen::generate(&item, &GeneratorConfig::default());
//! assert_eq!(expansion.artifact.unwrap().generated_type_name, "SheetView");
//! ```

pub mod attribute;
pub mod config;
pub mod diagnostic;
pub mod registry;
pub mod switch_view;

pub use attribute::{
    ATTRIBUTE_NAME, AttributeArgs, REPEATED_ATTRIBUTE_MESSAGE, is_switch_case_view, item_attributes,
    repeated_attribute_error,
};
pub use config::{ConfigError, ConfigFile, DEFAULT_RUNTIME, GeneratorConfig, parse_renderer_assignment};
pub use diagnostic::{CollectingSink, Diagnostic, DiagnosticSink, Severity, SourceSpan, report};
pub use registry::{RendererRegistry, VIEW_SUFFIX, view_name};
pub use switch_view::analyze::{EMPTY_UNION_MESSAGE, ValidationOutcome, validate};
pub use switch_view::codegen::{GeneratedArtifact, emit};
pub use switch_view::lower::{DispatchNode, build};
pub use switch_view::parse::{
    ExtractionError, UnionDescriptor, VariantDescriptor, VariantShape, extract, extract_tokens,
};
pub use switch_view::{Expansion, Stage, generate, generate_tokens};
