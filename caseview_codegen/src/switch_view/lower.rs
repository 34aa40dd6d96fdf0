use syn::{Expr, Ident, Path, parse_quote};

use super::parse::{UnionDescriptor, VariantDescriptor};
use crate::registry::RendererRegistry;

/// Target-neutral description of a dispatcher's render logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchNode {
    /// Render nothing.
    EmptyBranch,
    /// Narrow the store to `variant`; when that succeeds, render the child
    /// renderer with the narrowed store, otherwise render nothing.
    DelegatingBranch {
        /// Variant whose scope the store is narrowed to.
        variant: Ident,
        /// Renderer type that receives the narrowed store.
        child_renderer_type_name: Path,
    },
    /// Branch on the active variant of `subject_expr`.
    Switch {
        /// Expression yielding the union value.
        subject_expr: Expr,
        /// One branch per variant, in declaration order.
        branches: Vec<(VariantDescriptor, DispatchNode)>,
    },
}

impl DispatchNode {
    /// Branches of a switch; empty for any other node.
    #[must_use]
    pub fn branches(&self) -> &[(VariantDescriptor, Self)] {
        match self {
            Self::Switch { branches, .. } => branches,
            _ => &[],
        }
    }

    /// Child renderer of a delegating branch.
    #[must_use]
    pub fn child_renderer(&self) -> Option<&Path> {
        match self {
            Self::DelegatingBranch {
                child_renderer_type_name,
                ..
            } => Some(child_renderer_type_name),
            _ => None,
        }
    }
}

/// Builds the dispatch structure for a validated union.
#[must_use]
pub fn build(descriptor: &UnionDescriptor, renderers: &RendererRegistry) -> DispatchNode {
    if descriptor.variants.is_empty() {
        return DispatchNode::EmptyBranch;
    }

    let branches = descriptor
        .variants
        .iter()
        .map(|variant| {
            let node = match &variant.payload_type_name {
                Some(payload) => DispatchNode::DelegatingBranch {
                    variant: variant.name.clone(),
                    child_renderer_type_name: renderers.resolve(payload),
                },
                None => DispatchNode::EmptyBranch,
            };
            (variant.clone(), node)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        owner = %descriptor.owner_type_name,
        branches = branches.len(),
        "built dispatch switch"
    );

    DispatchNode::Switch {
        subject_expr: parse_quote!(self.store.state()),
        branches,
    }
}
