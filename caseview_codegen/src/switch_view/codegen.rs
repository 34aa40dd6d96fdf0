//! Final phase: emit Rust code.

use std::fmt;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, Lifetime, LifetimeParam, Path, parse_quote};

use super::lower::DispatchNode;
use super::parse::{UnionDescriptor, VariantDescriptor, VariantShape};
use crate::config::GeneratorConfig;
use crate::registry::view_name;

/// The generated dispatcher, ready to be appended next to its union.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// The union the dispatcher is attached to.
    pub target_extension_owner: Ident,
    /// `<Owner>View`.
    pub generated_type_name: Ident,
    /// The dispatch structure the code was rendered from.
    pub body: DispatchNode,
    tokens: TokenStream,
}

impl GeneratedArtifact {
    /// The generated items.
    #[must_use]
    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Consumes the artifact, keeping only the generated items.
    #[must_use]
    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }

    /// Source text of the generated items. Identical input always yields
    /// identical text.
    #[must_use]
    pub fn to_source(&self) -> String {
        self.tokens.to_string()
    }
}

impl PartialEq for GeneratedArtifact {
    fn eq(&self, other: &Self) -> bool {
        self.target_extension_owner == other.target_extension_owner
            && self.generated_type_name == other.generated_type_name
            && self.body == other.body
            && self.to_source() == other.to_source()
    }
}

impl Eq for GeneratedArtifact {}

impl ToTokens for GeneratedArtifact {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.tokens.to_tokens(tokens);
    }
}

impl fmt::Display for GeneratedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens)
    }
}

/// Lifetime the dispatcher borrows its store for.
fn store_lifetime() -> Lifetime {
    parse_quote!('store)
}

/// Wraps `body` into the dispatcher type and its impls.
#[must_use]
pub fn emit(
    descriptor: &UnionDescriptor,
    body: DispatchNode,
    config: &GeneratorConfig,
) -> GeneratedArtifact {
    let runtime = &config.runtime;
    let owner = &descriptor.owner_type_name;
    let view = view_name(owner);
    let lifetime = store_lifetime();

    let (owner_impl, owner_ty, owner_where) = descriptor.generics.split_for_impl();
    let view_generics = with_store_lifetime(&descriptor.generics, &lifetime);
    let (view_impl, view_ty, view_where) = view_generics.split_for_impl();
    let view_params = &view_generics.params;

    let store_ty = quote! { #runtime::Store<#lifetime, #owner #owner_ty> };
    let rendered = render(&body, owner, runtime);

    // An empty union never reads its store.
    let field_attrs = match body {
        DispatchNode::EmptyBranch => quote! { #[allow(dead_code)] },
        _ => TokenStream::new(),
    };
    let doc = format!("Renders the active variant of [`{owner}`] by delegating to its child view.");

    let tokens = quote! {
        #[doc = #doc]
        pub struct #view<#view_params> #view_where {
            #field_attrs
            store: #store_ty,
        }

        impl #view_impl #runtime::FromStore<#lifetime, #owner #owner_ty> for #view #view_ty #view_where {
            fn from_store(store: #store_ty) -> Self {
                Self { store }
            }
        }

        impl #view_impl #runtime::View for #view #view_ty #view_where {
            #[allow(unreachable_patterns)]
            fn body(&self) -> #runtime::Element {
                #[allow(unused_imports)]
                use #runtime::FromStore as _;
                #rendered
            }
        }

        impl #owner_impl #runtime::HasView for #owner #owner_ty #owner_where {
            type View<#lifetime> = #view #view_ty where Self: #lifetime;
        }
    };

    tracing::debug!(owner = %owner, view = %view, "emitted dispatcher");

    GeneratedArtifact {
        target_extension_owner: owner.clone(),
        generated_type_name: view,
        body,
        tokens,
    }
}

fn with_store_lifetime(generics: &Generics, lifetime: &Lifetime) -> Generics {
    let mut generics = generics.clone();
    generics
        .params
        .insert(0, GenericParam::Lifetime(LifetimeParam::new(lifetime.clone())));
    generics
}

fn render(node: &DispatchNode, owner: &Ident, runtime: &Path) -> TokenStream {
    match node {
        DispatchNode::EmptyBranch | DispatchNode::DelegatingBranch { .. } => {
            quote! { #runtime::Element::Empty }
        }
        DispatchNode::Switch {
            subject_expr,
            branches,
        } => {
            let arms = branches.iter().map(|(variant, branch)| {
                let pattern = arm_pattern(owner, variant);
                let body = render_branch(variant, branch, owner, runtime);
                quote! { #pattern => { #body } }
            });
            quote! {
                match #subject_expr {
                    #(#arms)*
                }
            }
        }
    }
}

fn render_branch(
    variant: &VariantDescriptor,
    branch: &DispatchNode,
    owner: &Ident,
    runtime: &Path,
) -> TokenStream {
    let DispatchNode::DelegatingBranch {
        variant: variant_name,
        child_renderer_type_name: renderer,
    } = branch
    else {
        return render(branch, owner, runtime);
    };

    let Some(narrow) = narrow_pattern(owner, variant_name, &variant.shape) else {
        return quote! { #runtime::Element::Empty };
    };

    quote! {
        if let ::core::option::Option::Some(store) = self.store.scope(|state| match state {
            #narrow => ::core::option::Option::Some(inner),
            _ => ::core::option::Option::None,
        }) {
            #runtime::View::body(&#renderer::from_store(store))
        } else {
            #runtime::Element::Empty
        }
    }
}

/// Pattern matching the variant regardless of its fields.
fn arm_pattern(owner: &Ident, variant: &VariantDescriptor) -> TokenStream {
    let name = &variant.name;
    match variant.shape {
        VariantShape::Unit => quote! { #owner::#name },
        VariantShape::Tuple => quote! { #owner::#name(..) },
        VariantShape::Named { .. } => quote! { #owner::#name { .. } },
    }
}

/// Pattern binding the variant's first field as `inner`.
fn narrow_pattern(owner: &Ident, name: &Ident, shape: &VariantShape) -> Option<TokenStream> {
    match shape {
        VariantShape::Unit => None,
        VariantShape::Tuple => Some(quote! { #owner::#name(inner, ..) }),
        VariantShape::Named { first_field } => first_field
            .as_ref()
            .map(|field| quote! { #owner::#name { #field: inner, .. } }),
    }
}
