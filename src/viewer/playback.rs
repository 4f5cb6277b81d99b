//! Clip lookup and activation.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::{ActionHandle, AnimationClip, AnimationMixer};
use crate::config::DEFAULT_FADE_DURATION;
use crate::errors::{Result, ViewerError};
use crate::viewer::ViewerContext;

/// Lower-cases a clip name into its index key.
#[must_use]
pub fn normalize_clip_name(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive map from clip name to the action playing it.
///
/// Rebuilt from scratch for every installed model. When two clips normalize
/// to the same key the later one wins and the earlier one's action is removed
/// from the mixer; the key keeps the position of its first occurrence.
#[derive(Debug, Default, Clone)]
pub struct ActionIndex {
    actions: FxHashMap<String, ActionHandle>,
    order: Vec<String>,
}

impl ActionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the index with one action per clip, created in `mixer`.
    pub fn rebuild(&mut self, mixer: &mut AnimationMixer, clips: &[Arc<AnimationClip>]) {
        self.clear();
        for clip in clips {
            let key = normalize_clip_name(&clip.name);
            let handle = mixer.clip_action(Arc::clone(clip));
            if let Some(replaced) = self.actions.insert(key.clone(), handle) {
                log::warn!(
                    "Clip '{}' collides with an earlier clip named '{key}'; keeping the later one",
                    clip.name
                );
                mixer.remove_action(replaced);
            } else {
                self.order.push(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.order.clear();
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ActionHandle> {
        self.actions.get(&normalize_clip_name(name)).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Keys in first-insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn handles(&self) -> impl Iterator<Item = ActionHandle> + '_ {
        self.order.iter().filter_map(|k| self.actions.get(k).copied())
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Activates one clip at a time with a fixed fade-in.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackController {
    fade_duration: f32,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_DURATION)
    }
}

impl PlaybackController {
    #[must_use]
    pub fn new(fade_duration: f32) -> Self {
        Self {
            fade_duration: fade_duration.max(0.0),
        }
    }

    #[must_use]
    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    /// Makes `name` the only clip with weight 1 and starts its fade-in.
    ///
    /// Every indexed action is stopped and zero-weighted first. On an
    /// unknown name nothing is touched.
    pub fn play_clip(&self, ctx: &mut ViewerContext, name: &str) -> Result<ActionHandle> {
        let target = ctx
            .actions
            .get(name)
            .ok_or_else(|| ViewerError::ClipNotFound(name.to_string()))?;
        let mixer = ctx
            .mixer
            .as_mut()
            .ok_or_else(|| ViewerError::ClipNotFound(name.to_string()))?;

        log::info!("Activating animation: {}", normalize_clip_name(name));

        for handle in ctx.actions.handles() {
            if let Some(action) = mixer.action_mut(handle) {
                action.stop().set_effective_weight(0.0);
            }
        }

        if let Some(action) = mixer.action_mut(target) {
            action
                .reset()
                .play()
                .set_effective_weight(1.0)
                .fade_in(self.fade_duration);
        }

        Ok(target)
    }
}
