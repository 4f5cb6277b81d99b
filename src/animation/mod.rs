//! Animation playback primitives.
//!
//! - [`AnimationClip`]: immutable clip metadata produced by the loader
//! - [`AnimationAction`]: stateful playback handle for one clip
//! - [`AnimationMixer`]: owns the actions of one model and advances them
//!
//! The mixer exposes exactly the capability set the viewer orchestrates:
//! play, stop, reset, set weight, fade in over a duration, and update by a
//! time delta. Pose sampling is not part of this module.

pub mod action;
pub mod clip;
pub mod mixer;

pub use action::{AnimationAction, LoopMode, WeightFade};
pub use clip::AnimationClip;
pub use mixer::{ActionHandle, AnimationMixer};
