//! Block directive evaluation.
//!
//! A block's behavior depends only on what its discriminator resolves to:
//!
//! | discriminator      | behavior                                        |
//! |--------------------|-------------------------------------------------|
//! | absent             | renders nothing                                 |
//! | scalar / binding   | renders the branch whose label matches, once    |
//! | list / mapping     | renders the body once per element, binding it   |

use super::ast::Block;
use super::error::ResolveError;
use super::render::render_nodes;
use super::resolve::{Resolved, resolve};
use super::scope::IterationScope;
use crate::tree::{ConfigTree, ConfigValue};
use std::borrow::Cow;
use tracing::trace;

pub(crate) fn evaluate_block<'a>(
    block: &Block,
    scope: &mut IterationScope<'a>,
    tree: &'a ConfigTree,
    out: &mut String,
) -> Result<(), ResolveError> {
    let resolved = match resolve(&block.discriminator.path, scope, tree) {
        Ok(resolved) => resolved,
        Err(ResolveError::UnresolvedPath { path }) => {
            trace!(%path, "discriminator absent, block renders empty");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    match resolved {
        Resolved::Binding(label) => select_and_render(block, &label, scope, tree, out),
        Resolved::Value(ConfigValue::Scalar(scalar)) => {
            select_and_render(block, scalar.canonical(), scope, tree, out)
        }
        Resolved::Value(ConfigValue::List(items)) => {
            let bindings = items.iter().enumerate().map(|(i, item)| match item {
                ConfigValue::Scalar(scalar) => Cow::Borrowed(scalar.canonical()),
                _ => Cow::Owned(i.to_string()),
            });
            iterate(block, bindings, scope, tree, out)
        }
        Resolved::Value(ConfigValue::Mapping(map)) => {
            let bindings = map.keys().map(|key| Cow::Borrowed(key.as_str()));
            iterate(block, bindings, scope, tree, out)
        }
    }
}

fn select_and_render<'a>(
    block: &Block,
    label: &str,
    scope: &mut IterationScope<'a>,
    tree: &'a ConfigTree,
    out: &mut String,
) -> Result<(), ResolveError> {
    match block.select(label) {
        Some(branch) => {
            trace!(label, offset = block.offset, "branch selected");
            render_nodes(branch.body.nodes(), scope, tree, out)
        }
        None => Ok(()),
    }
}

fn iterate<'a, I>(
    block: &Block,
    bindings: I,
    scope: &mut IterationScope<'a>,
    tree: &'a ConfigTree,
    out: &mut String,
) -> Result<(), ResolveError>
where
    I: Iterator<Item = Cow<'a, str>>,
{
    let Some(body) = block.iteration_body() else {
        return Ok(());
    };

    for binding in bindings {
        scope.push(binding);
        let rendered = render_nodes(body.nodes(), scope, tree, out);
        scope.pop();
        rendered?;
    }
    Ok(())
}
