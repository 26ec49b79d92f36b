//! Path resolution against the configuration tree.

use super::ast::{Part, Path};
use super::error::ResolveError;
use super::scope::IterationScope;
use crate::tree::{ConfigTree, ConfigValue};

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A node of the configuration tree.
    Value(&'a ConfigValue),
    /// The text of an iteration binding (`%(0%)` used as a whole path).
    Binding(String),
}

/// Resolve `path` in `tree`, substituting iteration bindings from `scope`.
///
/// A path made of a single positional name refers to the binding itself.
/// Otherwise every nested binding is replaced by its text, and the resulting
/// keys are looked up from the root: mapping children by key, list children
/// by ordinal. A missing key, or any key applied to a scalar, yields
/// [`ResolveError::UnresolvedPath`].
pub fn resolve<'a>(
    path: &Path,
    scope: &IterationScope<'_>,
    tree: &'a ConfigTree,
) -> Result<Resolved<'a>, ResolveError> {
    if let Some(name) = path.iteration_name() {
        return scope
            .lookup(name)
            .map(|bound| Resolved::Binding(bound.to_string()))
            .ok_or_else(|| ResolveError::UnboundIterationVariable {
                name: name.to_string(),
            });
    }

    let keys = substitute(path, scope)?;
    let unresolved = || ResolveError::UnresolvedPath {
        path: keys.join("/"),
    };

    let mut keys_iter = keys.iter();
    let first = keys_iter.next().ok_or_else(unresolved)?;
    let mut current = tree.get(first).ok_or_else(unresolved)?;
    for key in keys_iter {
        current = current.child(key).ok_or_else(unresolved)?;
    }

    Ok(Resolved::Value(current))
}

/// Replace nested bindings in each segment with their bound text.
fn substitute(path: &Path, scope: &IterationScope<'_>) -> Result<Vec<String>, ResolveError> {
    path.segments()
        .iter()
        .map(|segment| {
            let mut key = String::new();
            for part in segment.parts() {
                match part {
                    Part::Text(text) => key.push_str(text),
                    Part::Binding(name) => {
                        let bound = scope.lookup(name).ok_or_else(|| {
                            ResolveError::UnboundIterationVariable { name: name.clone() }
                        })?;
                        key.push_str(bound);
                    }
                }
            }
            Ok(key)
        })
        .collect()
}
