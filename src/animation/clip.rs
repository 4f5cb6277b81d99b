use serde::{Deserialize, Serialize};

use crate::animation::action::LoopMode;

/// An immutable, named keyframe sequence bundled with a loaded model.
///
/// Only the metadata the viewer orchestrates on is kept here. Pose data stays
/// with whatever samples it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Length of one cycle in seconds.
    #[serde(default)]
    pub duration: f32,
    /// Playback defaults copied into every action created for this clip.
    #[serde(default)]
    pub loop_mode: LoopMode,
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
}

fn default_time_scale() -> f32 {
    1.0
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            loop_mode: LoopMode::default(),
            time_scale: default_time_scale(),
        }
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
