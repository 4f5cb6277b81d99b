use crate::assets::{GeometryHandle, MaterialHandle};

/// Mesh component attached to a scene node.
///
/// A mesh references one geometry and one or more materials (multi-material
/// meshes use one material per draw group).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: GeometryHandle,
    pub materials: Vec<MaterialHandle>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self::with_materials(geometry, vec![material])
    }

    #[must_use]
    pub fn with_materials(geometry: GeometryHandle, materials: Vec<MaterialHandle>) -> Self {
        Self {
            geometry,
            materials,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}
