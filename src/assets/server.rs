use slotmap::new_key_type;
use std::sync::Arc;

use crate::assets::storage::AssetStorage;
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::texture::Texture;

// Strongly-typed handles
new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
    pub struct TextureHandle;
}

/// Counts of resources released by a single disposal pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
}

impl ReleaseReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.geometries + self.materials + self.textures
    }
}

impl std::ops::AddAssign for ReleaseReport {
    fn add_assign(&mut self, rhs: Self) {
        self.geometries += rhs.geometries;
        self.materials += rhs.materials;
        self.textures += rhs.textures;
    }
}

/// Shared resource storage. Cheap to clone; clones see the same data.
#[derive(Clone, Default)]
pub struct AssetServer {
    pub geometries: Arc<AssetStorage<GeometryHandle, Geometry>>,
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
    pub textures: Arc<AssetStorage<TextureHandle, Texture>>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases a material and the colour map it references.
    pub fn release_material(&self, handle: MaterialHandle) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        if let Some(material) = self.materials.remove(handle) {
            report.materials += 1;
            if let Some(map) = material.map
                && self.textures.remove(map).is_some()
            {
                report.textures += 1;
            }
        }
        report
    }

    pub fn release_geometry(&self, handle: GeometryHandle) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        if self.geometries.remove(handle).is_some() {
            report.geometries += 1;
        }
        report
    }

    /// Total number of live resources across all storages.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.geometries.len() + self.materials.len() + self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_material_also_releases_its_map() {
        let server = AssetServer::new();
        let tex = server.textures.add(Texture::new("diffuse", 4, 4));
        let mat = server.materials.add(Material::default().with_map(tex));

        let report = server.release_material(mat);

        assert_eq!(report.materials, 1);
        assert_eq!(report.textures, 1);
        assert!(!server.textures.contains(tex));
        assert_eq!(server.resource_count(), 0);
    }

    #[test]
    fn releasing_twice_is_a_no_op() {
        let server = AssetServer::new();
        let geo = server.geometries.add(Geometry::plane(1.0, 1.0));

        assert_eq!(server.release_geometry(geo).geometries, 1);
        assert_eq!(server.release_geometry(geo).total(), 0);
    }
}
