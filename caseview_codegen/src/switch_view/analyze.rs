use super::parse::UnionDescriptor;
use crate::diagnostic::Diagnostic;

/// Warning attached to unions without variants.
pub const EMPTY_UNION_MESSAGE: &str = "union has no variants; generated dispatcher renders nothing";

/// Result of validating an extracted union. Validation never aborts: errors
/// are caught earlier, during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Generate as usual.
    Proceed(UnionDescriptor),
    /// Generate, but report the warning.
    ProceedWithWarning(UnionDescriptor, Diagnostic),
}

impl ValidationOutcome {
    /// The validated union.
    #[must_use]
    pub fn descriptor(&self) -> &UnionDescriptor {
        match self {
            Self::Proceed(d) | Self::ProceedWithWarning(d, _) => d,
        }
    }

    /// Splits the outcome into the union and its warning, if any.
    #[must_use]
    pub fn into_parts(self) -> (UnionDescriptor, Option<Diagnostic>) {
        match self {
            Self::Proceed(d) => (d, None),
            Self::ProceedWithWarning(d, warning) => (d, Some(warning)),
        }
    }
}

/// Checks the preconditions of generation.
///
/// A union with no variants is legal but degraded; the warning points at the
/// `enum` keyword.
#[must_use]
pub fn validate(descriptor: UnionDescriptor) -> ValidationOutcome {
    if descriptor.variants.is_empty() {
        tracing::warn!(owner = %descriptor.owner_type_name, "{EMPTY_UNION_MESSAGE}");
        let warning = Diagnostic::warning(EMPTY_UNION_MESSAGE, descriptor.keyword.clone());
        return ValidationOutcome::ProceedWithWarning(descriptor, warning);
    }
    ValidationOutcome::Proceed(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::switch_view::parse::extract;
    use syn::{Item, parse_quote};

    #[test]
    fn test_non_empty_proceeds() {
        let item: Item = parse_quote! { enum Sheet { Info(Info) } };
        let outcome = validate(extract(&item).unwrap());
        assert!(matches!(outcome, ValidationOutcome::Proceed(_)));
        assert_eq!(outcome.descriptor().variants.len(), 1);
    }

    #[test]
    fn test_empty_warns_at_enum_keyword() {
        let item: Item = parse_quote! { enum Home {} };
        let descriptor = extract(&item).unwrap();
        let keyword = descriptor.keyword.clone();

        let (descriptor, warning) = validate(descriptor).into_parts();
        let warning = warning.expect("empty union must warn");

        assert!(descriptor.variants.is_empty());
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.message, EMPTY_UNION_MESSAGE);
        assert_eq!(warning.location, keyword);
    }
}
