//! CPU-side resource descriptors referenced from the scene graph.

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod texture;

pub use geometry::Geometry;
pub use material::{Material, MaterialKind, color_from_hex};
pub use mesh::Mesh;
pub use texture::Texture;
