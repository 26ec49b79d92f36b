//! Document rendering.

use super::ast::{Document, Node, Reference};
use super::error::ResolveError;
use super::eval::evaluate_block;
use super::resolve::{Resolved, resolve};
use super::scope::IterationScope;
use crate::tree::{ConfigTree, ConfigValue};

/// Render a parsed document against a configuration tree.
///
/// Rendering is all-or-nothing: on error the partially built text is
/// discarded and only the error is returned.
pub fn render(document: &Document, tree: &ConfigTree) -> Result<String, ResolveError> {
    let mut scope = IterationScope::new();
    let mut out = String::new();
    render_nodes(document.nodes(), &mut scope, tree, &mut out)?;
    Ok(out)
}

pub(crate) fn render_nodes<'a>(
    nodes: &[Node],
    scope: &mut IterationScope<'a>,
    tree: &'a ConfigTree,
    out: &mut String,
) -> Result<(), ResolveError> {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::VarRef(reference) => substitute(reference, scope, tree, out)?,
            Node::Block(block) => evaluate_block(block, scope, tree, out)?,
        }
    }
    Ok(())
}

/// Inline references must resolve to a scalar; absence is an error here,
/// unlike for block discriminators.
fn substitute(
    reference: &Reference,
    scope: &IterationScope<'_>,
    tree: &ConfigTree,
    out: &mut String,
) -> Result<(), ResolveError> {
    match resolve(&reference.path, scope, tree)? {
        Resolved::Binding(text) => out.push_str(&text),
        Resolved::Value(ConfigValue::Scalar(scalar)) => out.push_str(scalar.canonical()),
        Resolved::Value(other) => {
            return Err(ResolveError::NotAScalar {
                path: reference.path.to_string(),
                kind: other.kind(),
            });
        }
    }
    Ok(())
}
