//! Arguments of the `#[with_switch_case_view(...)]` attribute.
//!
//! Both the proc-macro and the CLI read them, so a declaration expands the
//! same way whichever host processes it.

use itertools::Itertools;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprPath, Ident, Item, Meta, MetaNameValue, Path, Result, Token};

use crate::config::GeneratorConfig;

/// Name the attribute is recognized by, with or without a leading path.
pub const ATTRIBUTE_NAME: &str = "with_switch_case_view";

/// Error raised for an item that carries the attribute twice.
pub const REPEATED_ATTRIBUTE_MESSAGE: &str =
    "`#[with_switch_case_view]` is applied more than once; the view would be generated twice";

/// Parsed `runtime = path, renderers(Type = path, ...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeArgs {
    /// Runtime crate override.
    pub runtime: Option<Path>,
    /// Renderer overrides in the order written.
    pub renderers: Vec<(Ident, Path)>,
}

impl Parse for AttributeArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let metas = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        let mut runtime = None;
        let mut renderers = Vec::new();
        for meta in metas {
            if meta.path().is_ident("runtime") {
                let value = &meta.require_name_value()?.value;
                if runtime.is_some() {
                    return Err(syn::Error::new_spanned(meta.path(), "duplicate `runtime` argument"));
                }
                runtime = Some(expr_to_path(value)?);
            } else if meta.path().is_ident("renderers") {
                let list = meta.require_list()?;
                let entries =
                    list.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
                for entry in entries {
                    let payload = entry.path.require_ident()?.clone();
                    renderers.push((payload, expr_to_path(&entry.value)?));
                }
            } else {
                return Err(syn::Error::new_spanned(
                    meta.path(),
                    "unknown argument, expected `runtime = path` or `renderers(Type = path, ...)`",
                ));
            }
        }

        if let Some((payload, _)) = renderers
            .iter()
            .duplicates_by(|(name, _)| name.to_string())
            .next()
        {
            return Err(syn::Error::new(
                payload.span(),
                format!("renderer for `{payload}` given more than once"),
            ));
        }

        Ok(Self { runtime, renderers })
    }
}

impl AttributeArgs {
    /// Layers the arguments over `base`; the attribute wins.
    #[must_use]
    pub fn apply(self, base: GeneratorConfig) -> GeneratorConfig {
        let mut config = base;
        if let Some(runtime) = self.runtime {
            config = config.with_runtime(runtime);
        }
        for (payload, renderer) in self.renderers {
            config = config.with_renderer(payload.to_string(), renderer);
        }
        config
    }

    /// Reads the arguments of a written `#[with_switch_case_view]` attribute.
    /// `None` when `attr` is some other attribute.
    ///
    /// # Errors
    ///
    /// Fails on malformed arguments.
    pub fn from_attribute(attr: &Attribute) -> Option<Result<Self>> {
        if !is_switch_case_view(attr) {
            return None;
        }
        Some(match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            Meta::List(list) => list.parse_args(),
            Meta::NameValue(nv) => Err(syn::Error::new_spanned(
                nv,
                "expected `#[with_switch_case_view]` or `#[with_switch_case_view(...)]`",
            )),
        })
    }
}

/// Whether `attr` is `#[with_switch_case_view]`, also when written through a
/// path such as `#[caseview::with_switch_case_view]`.
#[must_use]
pub fn is_switch_case_view(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ATTRIBUTE_NAME)
}

/// Attributes written on an item; empty for items that cannot carry any.
#[must_use]
pub fn item_attributes(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

/// Error pointing at a repeated `#[with_switch_case_view]`.
#[must_use]
pub fn repeated_attribute_error(attr: &Attribute) -> syn::Error {
    syn::Error::new_spanned(attr, REPEATED_ATTRIBUTE_MESSAGE)
}

fn expr_to_path(expr: &Expr) -> Result<Path> {
    match expr {
        Expr::Path(ExprPath { qself: None, path, .. }) => Ok(path.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a path")),
    }
}
