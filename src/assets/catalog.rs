use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The bundled character animations, in panel order.
pub const DEFAULT_ASSETS: [&str; 5] = [
    "Falling Back Death",
    "Jump Push Up",
    "Praying",
    "Taunt",
    "Defeated",
];

/// Ordered list of selectable assets and the rule that maps a name to a file.
///
/// A name `N` resolves to `<root>/<format>/<N>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCatalog {
    pub root: PathBuf,
    pub format: String,
    pub extension: String,
    pub names: Vec<String>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            root: PathBuf::from("models"),
            format: "fbx".to_string(),
            extension: "fbx".to_string(),
            names: DEFAULT_ASSETS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl AssetCatalog {
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>, extension: impl Into<String>) -> Self {
        self.format = format.into();
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root
            .join(&self.format)
            .join(format!("{name}.{}", self.extension))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
