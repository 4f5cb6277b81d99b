//! Discrete user input: the key-to-clip table and the asset selection panel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;

/// Maps single key identifiers to canonical (lower-case) clip names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<String, String>);

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for (key, clip) in [
            ("1", "falling back death"),
            ("2", "jump push up"),
            ("3", "praying"),
            ("4", "taunt"),
            ("5", "defeated"),
        ] {
            map.insert(key.to_string(), clip.to_string());
        }
        Self(map)
    }
}

impl KeyBindings {
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Binds `key` to `clip`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: impl Into<String>, clip: impl Into<String>) {
        self.0.insert(key.into(), clip.into());
    }

    #[must_use]
    pub fn clip_for(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Single-choice selection bound to the asset catalog.
///
/// Selecting a different entry is reported back so the caller can trigger a
/// model swap; re-selecting the current entry reports nothing.
#[derive(Debug, Clone)]
pub struct AssetPanel {
    options: Vec<String>,
    selected: Option<usize>,
}

impl AssetPanel {
    #[must_use]
    pub fn new(catalog: &AssetCatalog) -> Self {
        Self {
            options: catalog.iter().map(ToString::to_string).collect(),
            selected: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Selects `name`. Returns the new selection if it changed.
    pub fn select(&mut self, name: &str) -> Option<&str> {
        let Some(index) = self.options.iter().position(|o| o == name) else {
            log::warn!("'{name}' is not a selectable asset");
            return None;
        };
        self.select_index(index)
    }

    pub fn select_next(&mut self) -> Option<&str> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % len);
        self.select_index(next)
    }

    pub fn select_previous(&mut self) -> Option<&str> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        let prev = self.selected.map_or(len - 1, |i| (i + len - 1) % len);
        self.select_index(prev)
    }

    fn select_index(&mut self, index: usize) -> Option<&str> {
        if self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);
        self.options.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_keys_one_to_five() {
        let keys = KeyBindings::default();
        assert_eq!(keys.clip_for("3"), Some("praying"));
        assert_eq!(keys.clip_for("5"), Some("defeated"));
        assert_eq!(keys.clip_for("9"), None);
        assert_eq!(keys.iter().count(), 5);
    }

    #[test]
    fn bind_replaces_existing_key() {
        let mut keys = KeyBindings::empty();
        keys.bind("w", "taunt");
        keys.bind("w", "praying");
        assert_eq!(keys.clip_for("w"), Some("praying"));
        assert_eq!(keys.iter().count(), 1);
    }

    #[test]
    fn panel_reports_only_changes() {
        let mut panel = AssetPanel::new(&AssetCatalog::default());
        assert_eq!(panel.select("Taunt"), Some("Taunt"));
        assert_eq!(panel.select("Taunt"), None);
        assert_eq!(panel.select("Moonwalk"), None);
        assert_eq!(panel.selected(), Some("Taunt"));
    }

    #[test]
    fn panel_cycles_with_wraparound() {
        let mut panel = AssetPanel::new(&AssetCatalog::default());
        assert_eq!(panel.select_previous(), Some("Defeated"));
        assert_eq!(panel.select_next(), Some("Falling Back Death"));
        assert_eq!(panel.select_next(), Some("Jump Push Up"));
    }
}
