//! Directive markers.

use serde::{Deserialize, Serialize};

/// The marker strings that delimit directives in a template.
///
/// The defaults are the `%`-prefixed markers used by case templates:
///
/// ```text
/// %(Solver/SolverName%)            inline reference
/// %{%(Parallel%)                   block open + discriminator
/// %:True                           branch
/// %}                               block close
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Syntax {
    pub inline_open: String,
    pub inline_close: String,
    pub block_open: String,
    pub block_close: String,
    pub branch: String,

    /// Characters that split a reference path into segments.
    pub separators: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            inline_open: "%(".to_string(),
            inline_close: "%)".to_string(),
            block_open: "%{".to_string(),
            block_close: "%}".to_string(),
            branch: "%:".to_string(),
            separators: "/.".to_string(),
        }
    }
}

impl Syntax {
    /// All five markers with their setting names.
    pub fn markers(&self) -> [(&'static str, &str); 5] {
        [
            ("inline_open", &self.inline_open),
            ("inline_close", &self.inline_close),
            ("block_open", &self.block_open),
            ("block_close", &self.block_close),
            ("branch", &self.branch),
        ]
    }

    pub(crate) fn is_separator(&self, ch: char) -> bool {
        self.separators.contains(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers() {
        let syntax = Syntax::default();
        let names: Vec<_> = syntax.markers().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["inline_open", "inline_close", "block_open", "block_close", "branch"]
        );
        assert!(syntax.is_separator('/'));
        assert!(syntax.is_separator('.'));
        assert!(!syntax.is_separator('_'));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let syntax: Syntax = serde_yaml::from_str("separators: \"/\"\n").unwrap();
        assert_eq!(syntax.separators, "/");
        assert_eq!(syntax.inline_open, "%(");
    }
}
