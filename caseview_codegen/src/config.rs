//! Generator configuration.
//!
//! A [`GeneratorConfig`] is built in code with the `with_*` methods, or loaded
//! from a JSON [`ConfigFile`]:
//!
//! ```json
//! { "runtime": "::caseview", "renderers": { "Info": "crate::panels::InfoPanel" } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};

use contracts::*;
use quote::ToTokens;
use serde::{Deserialize, Serialize};
use proc_macro2::Span;
use syn::parse::Parser;
use syn::{Ident, Path, PathSegment};
use thiserror::Error;

use crate::registry::RendererRegistry;

/// Path of the runtime crate generated code refers to unless configured.
pub const DEFAULT_RUNTIME: &str = "::caseview";

/// Errors raised while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The runtime crate path does not parse as a Rust path.
    #[error("invalid runtime path `{path}`: {reason}")]
    InvalidRuntimePath {
        /// The rejected text.
        path: String,
        /// Parser message.
        reason: String,
    },
    /// A renderer override key is not an identifier.
    #[error("invalid payload type name `{0}`: expected a plain identifier")]
    InvalidTypeName(String),
    /// A renderer override value does not parse as a Rust path.
    #[error("invalid renderer path `{path}` for `{payload}`: {reason}")]
    InvalidRendererPath {
        /// Payload type the override was registered for.
        payload: String,
        /// The rejected text.
        path: String,
        /// Parser message.
        reason: String,
    },
    /// A `NAME=PATH` assignment is missing its `=`.
    #[error("invalid renderer assignment `{0}`: expected `TypeName=path::to::Renderer`")]
    InvalidAssignment(String),
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`ConfigFile`].
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options shared by every expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the crate providing `Store`, `View`, `FromStore`, `HasView`
    /// and `Element`.
    pub runtime: Path,
    /// Renderer lookup for payload types.
    pub renderers: RendererRegistry,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            renderers: RendererRegistry::new(),
        }
    }
}

/// [`DEFAULT_RUNTIME`] as a path.
fn default_runtime() -> Path {
    let leading_colon = DEFAULT_RUNTIME.starts_with("::").then(Default::default);
    let segments = DEFAULT_RUNTIME
        .trim_start_matches("::")
        .split("::")
        .map(|segment| PathSegment::from(Ident::new(segment, Span::call_site())))
        .collect();
    Path {
        leading_colon,
        segments,
    }
}

/// Parses a path without generic arguments, the only form usable as a crate
/// or renderer prefix in generated code.
fn parse_plain_path(text: &str) -> syn::Result<Path> {
    Path::parse_mod_style.parse_str(text)
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime crate path.
    #[must_use]
    #[ensures(ret.runtime == old(runtime.clone()))]
    pub fn with_runtime(mut self, runtime: Path) -> Self {
        self.runtime = runtime;
        self
    }

    /// Sets the runtime crate path from text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRuntimePath`] when `runtime` is not a path.
    pub fn with_runtime_str(self, runtime: &str) -> Result<Self, ConfigError> {
        let path = parse_plain_path(runtime).map_err(|e| ConfigError::InvalidRuntimePath {
            path: runtime.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(self.with_runtime(path))
    }

    /// Registers an explicit renderer for one payload type.
    #[must_use]
    #[ensures(!ret.renderers.is_empty())]
    pub fn with_renderer(mut self, payload_type_name: impl Into<String>, renderer: Path) -> Self {
        self.renderers.register(payload_type_name, renderer);
        self
    }

    /// Merges a whole registry; its entries win over existing ones.
    #[must_use]
    #[ensures(ret.renderers.len() >= old(self.renderers.len()))]
    pub fn with_renderers(mut self, renderers: RendererRegistry) -> Self {
        self.renderers.extend(renderers);
        self
    }

    /// Loads a JSON config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or any of its values is invalid.
    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        Self::try_from(ConfigFile::load(path)?)
    }

    /// Parses a JSON config document.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or invalid paths.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(text)?;
        Self::try_from(file)
    }
}

/// On-disk form of [`GeneratorConfig`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Runtime crate path, e.g. `"::caseview"`.
    pub runtime: Option<String>,
    /// Payload type name to renderer path.
    pub renderers: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Reads a JSON config file without validating its paths.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a config document.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Overrides the runtime path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRuntimePath`] when `runtime` is not a path.
    pub fn set_runtime(&mut self, runtime: &str) -> Result<(), ConfigError> {
        GeneratorConfig::new().with_runtime_str(runtime)?;
        self.runtime = Some(runtime.to_owned());
        Ok(())
    }

    /// Adds or replaces a renderer from a `Type=path` assignment.
    ///
    /// # Errors
    ///
    /// See [`parse_renderer_assignment`].
    pub fn set_renderer_assignment(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (payload, renderer) = parse_renderer_assignment(assignment)?;
        self.renderers
            .insert(payload, renderer.to_token_stream().to_string());
        Ok(())
    }
}

impl TryFrom<ConfigFile> for GeneratorConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let mut config = Self::new();
        if let Some(runtime) = &file.runtime {
            config = config.with_runtime_str(runtime)?;
        }
        for (payload, renderer) in &file.renderers {
            let (payload, renderer) = parse_renderer(payload, renderer)?;
            config = config.with_renderer(payload, renderer);
        }
        Ok(config)
    }
}

/// Parses `Info=crate::panels::InfoPanel` into its payload name and
/// renderer path.
///
/// # Errors
///
/// Fails when the `=` is missing, the left side is not an identifier or the
/// right side is not a path.
pub fn parse_renderer_assignment(assignment: &str) -> Result<(String, Path), ConfigError> {
    let (payload, renderer) = assignment
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAssignment(assignment.to_owned()))?;
    parse_renderer(payload.trim(), renderer.trim())
}

fn parse_renderer(payload: &str, renderer: &str) -> Result<(String, Path), ConfigError> {
    let name = syn::parse_str::<Ident>(payload)
        .map_err(|_| ConfigError::InvalidTypeName(payload.to_owned()))?;
    let path = parse_plain_path(renderer).map_err(|e| ConfigError::InvalidRendererPath {
        payload: payload.to_owned(),
        path: renderer.to_owned(),
        reason: e.to_string(),
    })?;
    Ok((name.to_string(), path))
}
