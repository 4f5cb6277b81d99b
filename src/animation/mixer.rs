use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use crate::animation::action::AnimationAction;
use crate::animation::clip::AnimationClip;

new_key_type! {
    pub struct ActionHandle;
}

/// Owns the playable actions of a single model and advances them each frame.
///
/// A mixer is created together with the model it animates and dropped with
/// it, so action handles never outlive their model.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
    time: f32,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new action for `clip` and returns its handle.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> ActionHandle {
        self.actions.insert(AnimationAction::new(clip))
    }

    /// Drops an action. Its handle never resolves again.
    pub fn remove_action(&mut self, handle: ActionHandle) -> Option<AnimationAction> {
        self.actions.remove(handle)
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionHandle, &AnimationAction)> {
        self.actions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Global mixer time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        for action in self.actions.values_mut() {
            action.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_advances_only_running_actions() {
        let mut mixer = AnimationMixer::new();
        let walk = mixer.clip_action(Arc::new(AnimationClip::new("walk", 4.0)));
        let idle = mixer.clip_action(Arc::new(AnimationClip::new("idle", 4.0)));

        mixer.action_mut(walk).unwrap().play();
        mixer.update(1.0);

        assert!((mixer.action(walk).unwrap().time - 1.0).abs() < 1e-6);
        assert!(mixer.action(idle).unwrap().time.abs() < 1e-6);
        assert!((mixer.time() - 1.0).abs() < 1e-6);
    }
}
