//! Diagnostics produced during an expansion and the sinks that receive them.
//!
//! The generator never prints anything itself. Every warning or error is
//! collected into a [`Diagnostic`] and handed to whichever [`DiagnosticSink`]
//! the host provides (the proc-macro emitter, the CLI's stderr reporter, or a
//! [`CollectingSink`] in tests).

use std::fmt;

use proc_macro2::Span;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The expansion was aborted and produced no artifact.
    Error,
    /// The expansion completed, but the artifact is degraded.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Where a diagnostic points: the declaration it concerns plus a 1-based
/// line and column.
///
/// Line and column are taken from the span's start. Inside a compiler-hosted
/// proc-macro the compiler does not expose positions, so both fall back to
/// the first line and column; the raw [`Span`] is kept so such hosts can
/// still point at the right tokens.
#[derive(Debug, Clone)]
pub struct SourceSpan {
    /// Name of the declaration node (the annotated type, or the item kind
    /// when the item has no name).
    pub declaration: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// The token span the location was derived from.
    pub span: Span,
}

impl SourceSpan {
    /// Builds a location from the start of `span`.
    #[must_use]
    pub fn new(declaration: impl Into<String>, span: Span) -> Self {
        let start = span.start();
        Self {
            declaration: declaration.into(),
            line: start.line.max(1),
            column: start.column + 1,
            span,
        }
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, other: &Self) -> bool {
        self.declaration == other.declaration
            && self.line == other.line
            && self.column == other.column
    }
}

impl Eq for SourceSpan {}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.line, self.column, self.declaration)
    }
}

/// A single structured error or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Human readable message, reported verbatim.
    pub message: String,
    /// Where the problem is.
    pub location: SourceSpan,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>, location: SourceSpan) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<String>, location: SourceSpan) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }

    /// Whether this diagnostic aborted its expansion.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.location.line, self.location.column, self.severity, self.message
        )
    }
}

/// Receives diagnostics from the generator.
///
/// Implementations must not drop, merge or reorder what they receive.
pub trait DiagnosticSink {
    /// Surfaces one diagnostic to the host.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Hands every diagnostic to `sink`, in order.
pub fn report<S>(diagnostics: &[Diagnostic], sink: &mut S)
where
    S: DiagnosticSink + ?Sized,
{
    for diagnostic in diagnostics {
        sink.report(diagnostic);
    }
}

/// A sink that keeps everything it receives.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of error diagnostics received.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of warning diagnostics received.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Consumes the sink.
    #[must_use]
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> SourceSpan {
        SourceSpan::new("Home", Span::call_site())
    }

    #[test]
    fn test_report_preserves_order_and_duplicates() {
        let warning = Diagnostic::warning("same message", location());
        let error = Diagnostic::error("boom", location());
        let diagnostics = vec![warning.clone(), warning.clone(), error.clone()];

        let mut sink = CollectingSink::new();
        report(&diagnostics, &mut sink);

        assert_eq!(sink.diagnostics(), &[warning.clone(), warning, error][..]);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.warning_count(), 2);
    }

    #[test]
    fn test_display_format() {
        let diagnostic = Diagnostic::error("not an enum", location());
        let rendered = diagnostic.to_string();
        assert!(rendered.ends_with(": error: not an enum"), "got {rendered}");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_locations_are_one_based() {
        let loc = location();
        assert!(loc.line >= 1);
        assert!(loc.column >= 1);
    }
}
