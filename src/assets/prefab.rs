use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;
use crate::errors::{Result, ViewerError};
use crate::resources::geometry::Geometry;
use crate::resources::material::MaterialKind;
use crate::resources::texture::Texture;

/// Material as described by a model file. Becomes a [`Material`] plus an
/// optional texture once instantiated.
///
/// [`Material`]: crate::resources::Material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabMaterial {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: MaterialKind,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    #[serde(default)]
    pub map: Option<Texture>,
}

fn default_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

impl Default for PrefabMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: MaterialKind::default(),
            color: default_color(),
            map: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabMesh {
    pub geometry: Geometry,
    #[serde(default)]
    pub materials: Vec<PrefabMaterial>,
}

/// Prefab node: data only, children referenced by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefabNode {
    #[serde(default)]
    pub name: Option<String>,
    /// Indices of child nodes in `Prefab::nodes`.
    #[serde(default)]
    pub children: Vec<usize>,
    #[serde(default)]
    pub mesh: Option<PrefabMesh>,
}

/// Loader output: a model described as pure data.
///
/// A prefab holds no handles and no scene references, so a prefab that is
/// never instantiated owns nothing that needs releasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefab {
    #[serde(default)]
    pub nodes: Vec<PrefabNode>,
    /// Indices of top-level nodes. When empty, every node that is nobody's
    /// child is treated as a root.
    #[serde(default)]
    pub root_indices: Vec<usize>,
    #[serde(default)]
    pub animations: Vec<AnimationClip>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, node: PrefabNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn with_animation(mut self, clip: AnimationClip) -> Self {
        self.animations.push(clip);
        self
    }

    /// Clip names in loader order.
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.animations.iter().map(|clip| clip.name.as_str())
    }

    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        if !self.root_indices.is_empty() {
            return self.root_indices.clone();
        }
        let mut is_child = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for &child in &node.children {
                if let Some(flag) = is_child.get_mut(child) {
                    *flag = true;
                }
            }
        }
        (0..self.nodes.len()).filter(|&i| !is_child[i]).collect()
    }

    /// Checks that the node graph is a forest with in-range indices.
    ///
    /// `path` only labels the error.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: String| ViewerError::InvalidModel {
            path: path.display().to_string(),
            reason,
        };
        let count = self.nodes.len();
        let mut seen = vec![false; count];
        let mut stack = Vec::new();

        for &root in &self.roots() {
            if root >= count {
                return Err(invalid(format!(
                    "root index {root} out of range ({count} nodes)"
                )));
            }
            stack.push(root);
        }

        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                return Err(invalid(format!("node {index} is reachable more than once")));
            }
            for &child in &self.nodes[index].children {
                if child >= count {
                    return Err(invalid(format!(
                        "node {index} has out-of-range child {child}"
                    )));
                }
                stack.push(child);
            }
        }

        Ok(())
    }
}

/// Thread-safe prefab reference
pub type SharedPrefab = Arc<Prefab>;
