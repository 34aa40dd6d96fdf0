//! The extract, validate, build and emit pipeline.

/// Validation of extracted unions.
pub mod analyze;
pub mod codegen;
/// Dispatch structure construction.
pub mod lower;
/// Declaration extraction.
pub mod parse;

use std::fmt;

use proc_macro2::TokenStream;
use syn::Item;

use crate::config::GeneratorConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, report};
use codegen::GeneratedArtifact;

/// Stages of one expansion, in order. `ExtractionFailed` and `Emitted` are
/// terminal; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing done yet.
    Start,
    /// The declaration is a union.
    Extracted,
    /// Preconditions checked.
    Validated,
    /// Dispatch structure built.
    Built,
    /// Code emitted.
    Emitted,
    /// The declaration is not a union.
    ExtractionFailed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Extracted => "extracted",
            Self::Validated => "validated",
            Self::Built => "built",
            Self::Emitted => "emitted",
            Self::ExtractionFailed => "extraction-failed",
        };
        f.write_str(name)
    }
}

/// Result of one expansion: at most one artifact and every diagnostic
/// raised on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The generated dispatcher, absent when expansion aborted.
    pub artifact: Option<GeneratedArtifact>,
    /// Errors and warnings, in the order they were raised.
    pub diagnostics: Vec<Diagnostic>,
    /// Terminal stage reached.
    pub stage: Stage,
}

impl Expansion {
    /// Whether any error was raised.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Hands the diagnostics to `sink` and returns the artifact.
    pub fn report<S>(self, sink: &mut S) -> Option<GeneratedArtifact>
    where
        S: DiagnosticSink + ?Sized,
    {
        report(&self.diagnostics, sink);
        self.artifact
    }

    /// The generated code, or nothing when expansion aborted.
    #[must_use]
    pub fn tokens(&self) -> TokenStream {
        self.artifact
            .as_ref()
            .map(|a| a.tokens().clone())
            .unwrap_or_default()
    }
}

fn advance(owner: &str, stage: &mut Stage, next: Stage) {
    tracing::debug!(owner, from = %stage, to = %next, "switch view stage");
    *stage = next;
}

/// Runs the whole pipeline on one declaration.
#[must_use]
pub fn generate(item: &Item, config: &GeneratorConfig) -> Expansion {
    let mut stage = Stage::Start;

    let descriptor = match parse::extract(item) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            let diagnostic = e.to_diagnostic();
            advance(&diagnostic.location.declaration, &mut stage, Stage::ExtractionFailed);
            tracing::info!("{}", diagnostic.message);
            return Expansion {
                artifact: None,
                diagnostics: vec![diagnostic],
                stage,
            };
        }
    };
    let owner = descriptor.owner_type_name.to_string();
    advance(&owner, &mut stage, Stage::Extracted);

    let (descriptor, warning) = analyze::validate(descriptor).into_parts();
    let diagnostics: Vec<_> = warning.into_iter().collect();
    advance(&owner, &mut stage, Stage::Validated);

    let node = lower::build(&descriptor, &config.renderers);
    advance(&owner, &mut stage, Stage::Built);

    let artifact = codegen::emit(&descriptor, node, config);
    advance(&owner, &mut stage, Stage::Emitted);

    tracing::info!(
        owner = %owner,
        view = %artifact.generated_type_name,
        warnings = diagnostics.len(),
        "generated switch view"
    );

    Expansion {
        artifact: Some(artifact),
        diagnostics,
        stage,
    }
}

/// Parses `tokens` as an item and runs [`generate`] on it. Tokens that do
/// not form an item are reported like any other non-union.
#[must_use]
pub fn generate_tokens(tokens: TokenStream, config: &GeneratorConfig) -> Expansion {
    match syn::parse2::<Item>(tokens) {
        Ok(item) => generate(&item, config),
        Err(e) => {
            let diagnostic = parse::ExtractionError::not_an_item(&e).to_diagnostic();
            let mut stage = Stage::Start;
            advance(&diagnostic.location.declaration, &mut stage, Stage::ExtractionFailed);
            tracing::info!("{}", diagnostic.message);
            Expansion {
                artifact: None,
                diagnostics: vec![diagnostic],
                stage,
            }
        }
    }
}
