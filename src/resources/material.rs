use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::assets::TextureHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Basic,
    Phong,
    Standard,
}

/// A material stored in the asset server.
///
/// The optional colour map is a handle into the same server's texture
/// storage and must be released together with the material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub color: Vec4,
    pub map: Option<TextureHandle>,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: MaterialKind::Basic,
            color: Vec4::ONE,
            map: None,
            opacity: 1.0,
            transparent: false,
            depth_write: true,
        }
    }
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: TextureHandle) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }

    #[must_use]
    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }
}

/// Converts a packed `0xRRGGBB` colour to linear-agnostic RGBA.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec4 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec4::new(r, g, b, 1.0)
}
