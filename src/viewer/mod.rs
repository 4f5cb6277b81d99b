//! The viewer: one owning context plus the controllers that mutate it.
//!
//! # Overview
//!
//! - [`ViewerContext`]: scene, resources, current model, mixer, Action Index
//! - [`ModelSwapController`]: replaces the displayed model
//! - [`PlaybackController`]: activates clips with a fade-in
//! - [`Viewer`]: wires input, loading and the frame loop together
//!
//! Everything here runs on one thread. Loads run elsewhere, but their
//! results are applied only from [`Viewer::update`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rigview::{Viewer, ViewerSettings, JsonModelLoader, HeadlessHost};
//!
//! let mut viewer = Viewer::new(ViewerSettings::default(), Arc::new(JsonModelLoader::new()));
//! let mut host = HeadlessHost::new(1280, 720);
//! viewer.start();
//! loop {
//!     viewer.frame(&mut host);
//! }
//! ```

pub mod input;
pub mod playback;
pub mod swap;

use std::sync::Arc;
use std::time::Duration;

use crate::animation::{AnimationAction, AnimationClip, AnimationMixer};
use crate::assets::{AssetServer, ModelLoader};
use crate::config::ViewerSettings;
use crate::errors::Result;
use crate::host::SceneHost;
use crate::scene::{NodeHandle, Scene};
use crate::utils::{FpsCounter, Timer};

pub use input::{AssetPanel, KeyBindings};
pub use playback::{ActionIndex, PlaybackController, normalize_clip_name};
pub use swap::{LoadCompletion, LoadTicket, ModelSwapController, SwapOutcome};

/// The model currently in the scene.
#[derive(Debug, Clone)]
pub struct InstalledModel {
    pub asset: String,
    pub root: NodeHandle,
    /// Clips in loader order.
    pub clips: Vec<Arc<AnimationClip>>,
    pub sequence: u64,
}

/// All mutable viewer state, owned in one place.
pub struct ViewerContext {
    pub scene: Scene,
    pub assets: AssetServer,
    pub model: Option<InstalledModel>,
    pub mixer: Option<AnimationMixer>,
    pub actions: ActionIndex,
}

impl ViewerContext {
    #[must_use]
    pub fn new(scene: Scene, assets: AssetServer) -> Self {
        Self {
            scene,
            assets,
            model: None,
            mixer: None,
            actions: ActionIndex::new(),
        }
    }

    #[must_use]
    pub fn current_asset(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.asset.as_str())
    }

    /// Indexed clip keys of the current model.
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.actions.names()
    }

    /// The action indexed under `name`, matched case-insensitively.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        let handle = self.actions.get(name)?;
        self.mixer.as_ref()?.action(handle)
    }

    /// The indexed clip currently scheduled at full weight, if any.
    #[must_use]
    pub fn active_clip(&self) -> Option<&str> {
        self.actions.names().find(|name| {
            self.action(name)
                .is_some_and(|a| a.is_scheduled() && a.effective_weight() >= 1.0)
        })
    }

    /// Advances the mixer, if a model with clips is installed.
    pub fn advance(&mut self, dt: f32) {
        if let Some(mixer) = &mut self.mixer {
            mixer.update(dt);
        }
    }
}

pub struct Viewer {
    ctx: ViewerContext,
    swap: ModelSwapController,
    playback: PlaybackController,

    keys: KeyBindings,
    panel: AssetPanel,
    startup_asset: Option<String>,

    timer: Timer,
    fps: FpsCounter,
}

impl Viewer {
    #[must_use]
    pub fn new(settings: ViewerSettings, loader: Arc<dyn ModelLoader>) -> Self {
        let assets = AssetServer::new();
        let aspect = settings.width as f32 / settings.height.max(1) as f32;
        let scene = Scene::with_stage(&settings.stage, &settings.camera, aspect, &assets);

        Self {
            ctx: ViewerContext::new(scene, assets),
            swap: ModelSwapController::new(loader, settings.catalog.clone()),
            playback: PlaybackController::new(settings.fade_duration),
            panel: AssetPanel::new(&settings.catalog),
            startup_asset: settings.startup_asset().map(ToString::to_string),
            keys: settings.keys,
            timer: Timer::new(),
            fps: FpsCounter::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &ViewerContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ViewerContext {
        &mut self.ctx
    }

    #[must_use]
    pub fn panel(&self) -> &AssetPanel {
        &self.panel
    }

    #[must_use]
    pub fn swap_controller(&self) -> &ModelSwapController {
        &self.swap
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Requests the startup asset and selects it in the panel.
    pub fn start(&mut self) -> Option<LoadTicket> {
        let asset = self.startup_asset.clone()?;
        self.select_asset(&asset)
    }

    /// Panel selection. Starts a swap when the selection changes.
    pub fn select_asset(&mut self, name: &str) -> Option<LoadTicket> {
        let asset = self.panel.select(name)?.to_string();
        Some(self.swap.request(&asset))
    }

    pub fn select_next_asset(&mut self) -> Option<LoadTicket> {
        let asset = self.panel.select_next()?.to_string();
        Some(self.swap.request(&asset))
    }

    pub fn select_previous_asset(&mut self) -> Option<LoadTicket> {
        let asset = self.panel.select_previous()?.to_string();
        Some(self.swap.request(&asset))
    }

    /// Reserves a load for `asset` without spawning it. Pair with
    /// [`complete_load`](Self::complete_load) when the caller loads itself.
    pub fn begin_load(&mut self, asset: &str) -> LoadTicket {
        self.swap.begin(asset)
    }

    pub fn complete_load(&mut self, completion: LoadCompletion) -> SwapOutcome {
        self.swap.finish(&mut self.ctx, &self.playback, completion)
    }

    /// Blocks until the next load completion and applies it.
    pub fn wait_for_load(&mut self, timeout: Duration) -> Result<SwapOutcome> {
        self.swap.wait(&mut self.ctx, &self.playback, timeout)
    }

    /// Key press. Returns whether a clip was activated.
    pub fn handle_key(&mut self, key: &str) -> bool {
        log::debug!("Key pressed: {key}");
        let Some(clip) = self.keys.clip_for(key).map(ToString::to_string) else {
            return false;
        };
        self.play_clip(&clip)
    }

    /// Activates `name`. Logs a warning and returns `false` if the current
    /// model has no such clip.
    pub fn play_clip(&mut self, name: &str) -> bool {
        match self.playback.play_clip(&mut self.ctx, name) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.scene.resize(width, height);
    }

    /// Applies finished loads, then advances animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<SwapOutcome> {
        let outcomes = self.swap.poll(&mut self.ctx, &self.playback);
        self.ctx.advance(dt);
        outcomes
    }

    /// One full frame: clock, update, draw, frame-rate meter.
    pub fn frame(&mut self, host: &mut dyn SceneHost) {
        let delta = self.timer.tick();
        self.update(delta.as_secs_f32());
        host.render(&self.ctx.scene, &self.ctx.assets);
        if let Some(fps) = self.fps.update(delta) {
            log::debug!("FPS: {fps:.1}");
        }
    }
}
