//! Scene graph.
//!
//! - [`Scene`]: node storage, hierarchy, the stage and the camera
//! - [`Node`]: hierarchy links, transform, optional mesh or light
//! - [`Camera`]: perspective camera driven by window size

pub mod camera;
pub mod light;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::{Fog, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
