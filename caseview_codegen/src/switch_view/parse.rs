// caseview_codegen/src/switch_view/parse.rs
use proc_macro2::{Span, TokenStream};
use syn::spanned::Spanned;
use syn::{Fields, Generics, Ident, Item, ItemEnum, Type, Variant};
use thiserror::Error;

use crate::diagnostic::{Diagnostic, SourceSpan};

/// How a variant is written, which decides the match patterns the emitter
/// produces for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantShape {
    /// `Empty`
    Unit,
    /// `Info(Info)`, `Pair(A, B)`, `Nothing()`
    Tuple,
    /// `Info { info: Info }`, with the name of the first field if any.
    Named {
        /// First declared field.
        first_field: Option<Ident>,
    },
}

/// One variant of the union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    /// Variant name, unique within the union.
    pub name: Ident,
    /// Simple name of the first field's type, when that type is a path.
    pub payload_type_name: Option<Ident>,
    /// Declared form of the variant.
    pub shape: VariantShape,
}

/// A tagged union as seen by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDescriptor {
    /// Name of the annotated enum.
    pub owner_type_name: Ident,
    /// Generic parameters of the enum, carried onto the dispatcher.
    pub generics: Generics,
    /// Variants in declaration order.
    pub variants: Vec<VariantDescriptor>,
    /// Location of the declaration's name.
    pub location: SourceSpan,
    /// Location of the `enum` keyword.
    pub keyword: SourceSpan,
}

/// Why a declaration could not be extracted.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The item is not an `enum`.
    #[error("switch-case views can only be generated for enum declarations, found {kind}")]
    NotAUnion {
        /// What was found instead, e.g. "struct `Details`".
        kind: String,
        /// Where it was found.
        location: SourceSpan,
    },
}

impl ExtractionError {
    /// Where the error points.
    #[must_use]
    pub fn location(&self) -> &SourceSpan {
        match self {
            Self::NotAUnion { location, .. } => location,
        }
    }

    /// Error for tokens that could not be parsed as an item.
    #[must_use]
    pub fn not_an_item(error: &syn::Error) -> Self {
        Self::NotAUnion {
            kind: format!("tokens that do not form an item ({error})"),
            location: SourceSpan::new("<unparsed>", error.span()),
        }
    }

    /// The error as a diagnostic for the host.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.location().clone())
    }
}

/// Extracts the union described by `item`.
///
/// # Errors
///
/// [`ExtractionError::NotAUnion`] for anything but an `enum`.
pub fn extract(item: &Item) -> Result<UnionDescriptor, ExtractionError> {
    match item {
        Item::Enum(item_enum) => Ok(extract_enum(item_enum)),
        other => {
            let (kind, name, span) = describe_item(other);
            let kind = match &name {
                Some(name) => format!("{kind} `{name}`"),
                None => kind.to_owned(),
            };
            let declaration = name.unwrap_or_else(|| kind.clone());
            Err(ExtractionError::NotAUnion {
                kind,
                location: SourceSpan::new(declaration, span),
            })
        }
    }
}

/// Parses `tokens` as an item, then extracts it.
///
/// # Errors
///
/// [`ExtractionError::NotAUnion`] when the tokens are not an item at all, or
/// an item other than an `enum`.
pub fn extract_tokens(tokens: TokenStream) -> Result<UnionDescriptor, ExtractionError> {
    match syn::parse2::<Item>(tokens) {
        Ok(item) => extract(&item),
        Err(e) => Err(ExtractionError::not_an_item(&e)),
    }
}

fn extract_enum(item_enum: &ItemEnum) -> UnionDescriptor {
    let owner = &item_enum.ident;
    let variants: Vec<_> = item_enum.variants.iter().map(describe_variant).collect();

    tracing::debug!(
        owner = %owner,
        variants = variants.len(),
        "extracted union declaration"
    );

    UnionDescriptor {
        owner_type_name: owner.clone(),
        generics: item_enum.generics.clone(),
        variants,
        location: SourceSpan::new(owner.to_string(), owner.span()),
        keyword: SourceSpan::new(owner.to_string(), item_enum.enum_token.span),
    }
}

fn describe_variant(variant: &Variant) -> VariantDescriptor {
    // Only the first field is honored.
    let (shape, first_ty) = match &variant.fields {
        Fields::Unit => (VariantShape::Unit, None),
        Fields::Unnamed(fields) => (VariantShape::Tuple, fields.unnamed.first().map(|f| &f.ty)),
        Fields::Named(fields) => {
            let first = fields.named.first();
            (
                VariantShape::Named {
                    first_field: first.and_then(|f| f.ident.clone()),
                },
                first.map(|f| &f.ty),
            )
        }
    };

    VariantDescriptor {
        name: variant.ident.clone(),
        payload_type_name: first_ty.and_then(simple_type_name),
        shape,
    }
}

/// The last segment of a path type: `crate::info::Info<T>` -> `Info`.
///
/// Non-path types (tuples, references, arrays, qualified `<T as Trait>::X`)
/// have no simple name.
#[must_use]
pub fn simple_type_name(ty: &Type) -> Option<Ident> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|s| s.ident.clone())
        }
        Type::Group(group) => simple_type_name(&group.elem),
        Type::Paren(paren) => simple_type_name(&paren.elem),
        _ => None,
    }
}

fn describe_item(item: &Item) -> (&'static str, Option<String>, Span) {
    match item {
        Item::Struct(s) => ("struct", Some(s.ident.to_string()), s.struct_token.span),
        Item::Union(u) => ("untagged union", Some(u.ident.to_string()), u.union_token.span),
        Item::Fn(f) => ("function", Some(f.sig.ident.to_string()), f.sig.fn_token.span),
        Item::Trait(t) => ("trait", Some(t.ident.to_string()), t.trait_token.span),
        Item::TraitAlias(t) => ("trait alias", Some(t.ident.to_string()), t.trait_token.span),
        Item::Type(t) => ("type alias", Some(t.ident.to_string()), t.type_token.span),
        Item::Const(c) => ("constant", Some(c.ident.to_string()), c.const_token.span),
        Item::Static(s) => ("static", Some(s.ident.to_string()), s.static_token.span),
        Item::Mod(m) => ("module", Some(m.ident.to_string()), m.mod_token.span),
        Item::Impl(i) => ("impl block", None, i.impl_token.span),
        Item::Use(u) => ("use declaration", None, u.use_token.span),
        Item::ExternCrate(e) => ("extern crate", Some(e.ident.to_string()), e.crate_token.span),
        Item::ForeignMod(f) => ("extern block", None, f.span()),
        Item::Macro(m) => ("macro invocation", None, m.span()),
        other => ("item", None, other.span()),
    }
}
