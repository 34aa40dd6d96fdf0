//! Finding input files and the declarations inside them.

use std::path::{Path, PathBuf};

use caseview_codegen::{AttributeArgs, is_switch_case_view, item_attributes, repeated_attribute_error};
use itertools::Itertools;
use syn::Item;
use walkdir::WalkDir;

use crate::error::CliError;

/// Expands directories into the `.rs` files below them, sorted by name.
/// Plain files are kept as given; duplicates are dropped.
pub fn discover(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_source(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    Ok(files.into_iter().unique().collect())
}

/// A declaration to generate for.
pub struct Selected<'f> {
    pub item: &'f Item,
    /// Arguments of its `#[with_switch_case_view]`, absent when the item was
    /// only named on the command line.
    pub args: Option<syn::Result<AttributeArgs>>,
}

/// Items carrying `#[with_switch_case_view]` or named in `types`, in source
/// order, including inline modules themselves and the items inside them.
pub fn select<'f>(items: &'f [Item], types: &[String]) -> Vec<Selected<'f>> {
    let mut selected = Vec::new();
    collect(items, types, &mut selected);
    selected
}

fn collect<'f>(items: &'f [Item], types: &[String], out: &mut Vec<Selected<'f>>) {
    for item in items {
        let mut written = item_attributes(item)
            .iter()
            .filter(|attr| is_switch_case_view(attr));
        let first = written.next().and_then(AttributeArgs::from_attribute);
        let args = match written.next() {
            Some(repeated) => Some(Err(repeated_attribute_error(repeated))),
            None => first,
        };

        let named = item_name(item).is_some_and(|name| types.contains(&name));
        if args.is_some() || named {
            out.push(Selected { item, args });
        }

        if let Item::Mod(module) = item {
            if let Some((_, content)) = &module.content {
                collect(content, types, out);
            }
        }
    }
}

/// Name of a declaration, if it has one.
pub fn item_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Enum(i) => &i.ident,
        Item::Struct(i) => &i.ident,
        Item::Union(i) => &i.ident,
        Item::Fn(i) => &i.sig.ident,
        Item::Trait(i) => &i.ident,
        Item::TraitAlias(i) => &i.ident,
        Item::Type(i) => &i.ident,
        Item::Const(i) => &i.ident,
        Item::Static(i) => &i.ident,
        Item::Mod(i) => &i.ident,
        _ => return None,
    };
    Some(ident.to_string())
}

/// Whether `path` is a file the CLI would read.
pub fn is_source(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("rs")
}
