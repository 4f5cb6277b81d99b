//! # Rigview
//!
//! A small skeletal character viewer. It keeps one animated model on a lit
//! stage, lets the user swap that model for another from a fixed catalog,
//! and switches between the model's animation clips from the keyboard.
//!
//! Rendering, model parsing and pose sampling are left to collaborators
//! behind the [`SceneHost`] and [`ModelLoader`] traits; this crate owns the
//! orchestration around them.
//!
//! # Modules
//!
//! - [`viewer`]: the owning context, model swapping and clip playback
//! - [`animation`]: clips, actions and the mixer that advances them
//! - [`assets`]: catalog, loaders and resource storage
//! - [`scene`]: scene graph, stage setup and camera
//! - [`config`]: settings with JSON overrides
//! - [`app`]: winit window shell (feature `winit`)

pub mod animation;
#[cfg(feature = "winit")]
pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod host;
pub mod resources;
pub mod scene;
pub mod utils;
pub mod viewer;

pub use animation::{ActionHandle, AnimationAction, AnimationClip, AnimationMixer, LoopMode};
#[cfg(feature = "winit")]
pub use app::App;
pub use assets::{
    AssetCatalog, AssetServer, JsonModelLoader, MemoryModelLoader, ModelLoader, Prefab,
};
pub use config::ViewerSettings;
pub use errors::{Result, ViewerError};
pub use host::{HeadlessHost, SceneHost};
pub use scene::{Camera, Node, NodeHandle, Scene};
pub use viewer::{ModelSwapController, PlaybackController, SwapOutcome, Viewer, ViewerContext};
