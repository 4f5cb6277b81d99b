use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;

/// What an action does when its local time leaves `[0, duration]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Clamp at the end and pause.
    Once,
    #[default]
    Loop,
    /// Bounce between start and end.
    PingPong,
}

/// A weight envelope interpolated linearly from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFade {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl WeightFade {
    #[must_use]
    pub fn factor(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Stateful playback handle bound to exactly one clip.
///
/// `weight` is the effective blend weight the caller sets. While a fade is
/// scheduled, the influence actually applied is `weight * fade.factor()`,
/// see [`AnimationAction::blend_weight`].
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    weight: f32,
    running: bool,
    fade: Option<WeightFade>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            time: 0.0,
            time_scale: clip.time_scale,
            loop_mode: clip.loop_mode,
            clip,
            paused: false,
            enabled: true,
            weight: 1.0,
            running: false,
            fade: None,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Schedules the action for playback. Does not touch time or weight.
    pub fn play(&mut self) -> &mut Self {
        self.running = true;
        self
    }

    /// Stops playback and resets the action to its initial state.
    pub fn stop(&mut self) -> &mut Self {
        self.running = false;
        self.reset()
    }

    /// Rewinds local time, clears pause, and cancels any fade.
    pub fn reset(&mut self) -> &mut Self {
        self.paused = false;
        self.enabled = true;
        self.time = 0.0;
        self.fade = None;
        self
    }

    /// Sets the blend weight immediately, cancelling any scheduled fade.
    pub fn set_effective_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight.clamp(0.0, 1.0);
        self.fade = None;
        self
    }

    /// Ramps the applied influence from 0 up to the current weight.
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.fade = Some(WeightFade {
            from: 0.0,
            to: 1.0,
            duration: duration.max(0.0),
            elapsed: 0.0,
        });
        self
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running && self.enabled && !self.paused
    }

    /// Whether [`play`](Self::play) has been called since the last stop.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        if self.enabled { self.weight } else { 0.0 }
    }

    /// Influence applied this frame, fade envelope included.
    #[must_use]
    pub fn blend_weight(&self) -> f32 {
        let envelope = self.fade.map_or(1.0, |f| f.factor());
        self.effective_weight() * envelope
    }

    #[must_use]
    pub fn fade(&self) -> Option<&WeightFade> {
        self.fade.as_ref()
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Advances local time and the fade envelope.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }

        if let Some(fade) = &mut self.fade {
            fade.elapsed += dt;
            if fade.is_finished() {
                self.fade = None;
            }
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                let mut t = self.time % double_duration;
                if t < 0.0 {
                    t += double_duration;
                }
                if t > duration {
                    t = double_duration - t;
                }
                self.time = t;
            }
        }
    }
}
