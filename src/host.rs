//! Drawing seam.
//!
//! The viewer never rasterizes anything itself. Each frame it hands the
//! scene to a [`SceneHost`], which owns the actual render backend.

use crate::assets::AssetServer;
use crate::scene::Scene;

pub trait SceneHost {
    /// Draws one frame of `scene`.
    fn render(&mut self, scene: &Scene, assets: &AssetServer);

    /// Resizes the drawing surface.
    fn resize(&mut self, width: u32, height: u32);
}

/// Host without a GPU. Records what it was asked to do.
#[derive(Debug, Default, Clone)]
pub struct HeadlessHost {
    pub frames: u64,
    pub viewport: (u32, u32),
    /// Draw calls the last frame would have issued (one per mesh material).
    pub last_draw_calls: usize,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }
}

impl SceneHost for HeadlessHost {
    fn render(&mut self, scene: &Scene, assets: &AssetServer) {
        let geometries = assets.geometries.read_lock();
        let materials = assets.materials.read_lock();
        self.last_draw_calls = scene
            .iter()
            .filter(|(_, node)| node.visible)
            .filter_map(|(_, node)| node.mesh.as_ref())
            .filter(|mesh| geometries.map.contains_key(mesh.geometry))
            .map(|mesh| {
                mesh.materials
                    .iter()
                    .filter(|&&m| materials.map.contains_key(m))
                    .count()
            })
            .sum();
        self.frames += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}
