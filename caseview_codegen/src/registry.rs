//! Resolution of payload types to the renderer types that draw them.

use std::collections::BTreeMap;

use quote::format_ident;
use syn::{Ident, Path};

/// Suffix appended to a type name to find its renderer.
///
/// Downstream code resolves renderers by this exact name, so it is not
/// configurable.
pub const VIEW_SUFFIX: &str = "View";

/// `Info` -> `InfoView`, keeping the span of `type_name`.
#[must_use]
pub fn view_name(type_name: &Ident) -> Ident {
    format_ident!("{}{}", type_name, VIEW_SUFFIX, span = type_name.span())
}

/// Maps payload type names to renderer paths.
///
/// Unregistered names resolve by convention to `<TypeName>View`; a
/// registered name resolves to its explicit renderer path instead. Either
/// way the renderer must implement the runtime `FromStore` and `View` traits,
/// which is checked when the generated code is compiled, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererRegistry {
    overrides: BTreeMap<String, Path>,
}

impl RendererRegistry {
    /// An empty registry, resolving everything by convention.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `renderer` for payloads named `payload_type_name`, replacing
    /// any earlier registration.
    pub fn register(&mut self, payload_type_name: impl Into<String>, renderer: Path) {
        self.overrides.insert(payload_type_name.into(), renderer);
    }

    /// Builder form of [`RendererRegistry::register`].
    #[must_use]
    pub fn with_renderer(mut self, payload_type_name: impl Into<String>, renderer: Path) -> Self {
        self.register(payload_type_name, renderer);
        self
    }

    /// The renderer for a payload type.
    #[must_use]
    pub fn resolve(&self, payload_type_name: &Ident) -> Path {
        self.overrides
            .get(&payload_type_name.to_string())
            .cloned()
            .unwrap_or_else(|| Path::from(view_name(payload_type_name)))
    }

    /// Number of explicit registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// True when everything resolves by convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Explicit registrations in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.overrides.iter().map(|(name, path)| (name.as_str(), path))
    }

    /// Adds every registration of `other`, which wins on conflicts.
    pub fn extend(&mut self, other: Self) {
        self.overrides.extend(other.overrides);
    }
}
