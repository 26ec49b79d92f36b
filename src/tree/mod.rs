//! The hierarchical configuration tree consumed by the template engine.
//!
//! A tree is produced outside the engine (a case editor, a YAML file written
//! by hand, a JSON export) and is never mutated by rendering. The root is
//! always a mapping.
//!
//! Loading rules:
//!
//! - Numbers become scalar strings in their decimal text form.
//! - `null` entries in a mapping are dropped, so they resolve as absent.
//! - Non-string scalar keys are stringified (`true:` becomes the key `True`).

mod value;


pub use value::{ConfigValue, Mapping, Scalar};

use std::path::{Path, PathBuf};
use thiserror::Error;
use value::MaybeValue;

/// Errors raised while loading a configuration tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration root must be a mapping, found a {found}")]
    NotAMapping { found: &'static str },
}

/// A mapping-rooted configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    root: Mapping,
}

impl ConfigTree {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Look up a top-level entry.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.root.get(key)
    }

    /// Load a tree from a file, choosing the format by extension.
    ///
    /// `.json` files are read as JSON; everything else is read as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TreeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a tree from YAML text. An empty document yields an empty tree.
    pub fn from_yaml(yaml: &str) -> Result<Self, TreeError> {
        let MaybeValue(value) = serde_yaml::from_str(yaml)?;
        Self::from_loaded(value)
    }

    /// Parse a tree from JSON text.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let MaybeValue(value) = serde_json::from_str(json)?;
        Self::from_loaded(value)
    }

    fn from_loaded(value: Option<ConfigValue>) -> Result<Self, TreeError> {
        match value {
            None => Ok(Self::default()),
            Some(ConfigValue::Mapping(root)) => Ok(Self { root }),
            Some(other) => Err(TreeError::NotAMapping {
                found: other.kind(),
            }),
        }
    }
}

impl From<Mapping> for ConfigTree {
    fn from(root: Mapping) -> Self {
        Self::new(root)
    }
}
