//! Replacing the displayed model.
//!
//! A swap has two halves. [`ModelSwapController::request`] hands the load to
//! the asset runtime and returns immediately. The result comes back over a
//! channel and is applied on the frame thread by [`ModelSwapController::poll`]
//! (or [`ModelSwapController::finish`] when the caller drives loading itself).
//!
//! Every request takes the next sequence number. Only a completion carrying
//! the latest number is installed; anything older is dropped before it is
//! instantiated, so it never allocates scene nodes or storage entries.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};

use crate::animation::{AnimationClip, AnimationMixer};
use crate::assets::{AssetCatalog, ModelLoader, ReleaseReport, SharedPrefab, get_asset_runtime};
use crate::errors::{Result, ViewerError};
use crate::resources::Mesh;
use crate::viewer::playback::{PlaybackController, normalize_clip_name};
use crate::viewer::{InstalledModel, ViewerContext};

/// Identifies one model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub sequence: u64,
    pub asset: String,
    pub path: PathBuf,
}

/// A finished load, successful or not, waiting to be applied.
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<SharedPrefab>,
}

/// What applying a completion did to the scene.
#[derive(Debug)]
pub enum SwapOutcome {
    Installed {
        asset: String,
        clips: usize,
        released: ReleaseReport,
    },
    /// A newer request was made after this one; the result was dropped.
    Stale { asset: String, sequence: u64 },
    /// The loader reported an error; the previous model stays.
    Failed { asset: String, error: ViewerError },
}

impl SwapOutcome {
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

pub struct ModelSwapController {
    loader: Arc<dyn ModelLoader>,
    catalog: AssetCatalog,

    next_sequence: u64,
    latest: Option<u64>,
    in_flight: usize,

    tx: Sender<LoadCompletion>,
    rx: Receiver<LoadCompletion>,
}

impl ModelSwapController {
    #[must_use]
    pub fn new(loader: Arc<dyn ModelLoader>, catalog: AssetCatalog) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            loader,
            catalog,
            next_sequence: 1,
            latest: None,
            in_flight: 0,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Number of spawned loads whose completion has not been received yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest == Some(ticket.sequence)
    }

    /// Reserves a sequence number for `asset` without starting a load.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin(&mut self, asset: &str) -> LoadTicket {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.latest = Some(sequence);

        let ticket = LoadTicket {
            sequence,
            asset: asset.to_string(),
            path: self.catalog.path_for(asset),
        };
        log::info!("Loading model: {} ({})", ticket.asset, ticket.path.display());
        ticket
    }

    /// Starts loading `asset` on the asset runtime.
    pub fn request(&mut self, asset: &str) -> LoadTicket {
        let ticket = self.begin(asset);
        let load = self.loader.load(ticket.path.clone());
        let tx = self.tx.clone();
        let sent = ticket.clone();

        self.in_flight += 1;
        get_asset_runtime().spawn(async move {
            let result = load.await;
            // Receiver lives as long as the controller; a send error means it is gone.
            let _ = tx.send(LoadCompletion {
                ticket: sent,
                result,
            });
        });

        ticket
    }

    /// Applies every completion that has arrived, in arrival order.
    pub fn poll(
        &mut self,
        ctx: &mut ViewerContext,
        playback: &PlaybackController,
    ) -> Vec<SwapOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            outcomes.push(self.finish(ctx, playback, completion));
        }
        outcomes
    }

    /// Blocks until one completion arrives, then applies it.
    pub fn wait(
        &mut self,
        ctx: &mut ViewerContext,
        playback: &PlaybackController,
        timeout: Duration,
    ) -> Result<SwapOutcome> {
        let completion = self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => ViewerError::LoadTimeout,
            RecvTimeoutError::Disconnected => ViewerError::LoaderDisconnected,
        })?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(self.finish(ctx, playback, completion))
    }

    /// Applies a single completion. The prefab is validated here whichever
    /// loader produced it; an invalid one fails like a load error.
    pub fn finish(
        &mut self,
        ctx: &mut ViewerContext,
        playback: &PlaybackController,
        completion: LoadCompletion,
    ) -> SwapOutcome {
        let LoadCompletion { ticket, result } = completion;

        if !self.is_current(&ticket) {
            log::debug!(
                "Discarding stale load of '{}' (request #{}, latest #{:?})",
                ticket.asset,
                ticket.sequence,
                self.latest
            );
            return SwapOutcome::Stale {
                asset: ticket.asset,
                sequence: ticket.sequence,
            };
        }

        match result.and_then(|prefab| prefab.validate(&ticket.path).map(|()| prefab)) {
            Ok(prefab) => Self::install(ctx, playback, &ticket, &prefab),
            Err(error) => {
                log::warn!("Failed to load model '{}': {error}", ticket.asset);
                SwapOutcome::Failed {
                    asset: ticket.asset,
                    error,
                }
            }
        }
    }

    fn install(
        ctx: &mut ViewerContext,
        playback: &PlaybackController,
        ticket: &LoadTicket,
        prefab: &SharedPrefab,
    ) -> SwapOutcome {
        let released = Self::retire(ctx);

        let root = ctx.scene.instantiate(prefab, &ctx.assets, &ticket.asset);
        let clips: Vec<Arc<AnimationClip>> =
            prefab.animations.iter().cloned().map(Arc::new).collect();

        let mut mixer = AnimationMixer::new();
        ctx.actions.rebuild(&mut mixer, &clips);
        ctx.mixer = Some(mixer);
        ctx.model = Some(InstalledModel {
            asset: ticket.asset.clone(),
            root,
            clips: clips.clone(),
            sequence: ticket.sequence,
        });

        log::info!("Model ready: {}", ticket.asset);

        if let Some(first) = clips.first() {
            let names: Vec<&str> = clips.iter().map(|c| c.name.as_str()).collect();
            log::info!("Available animations: {names:?}");
            if let Err(e) = playback.play_clip(ctx, &normalize_clip_name(&first.name)) {
                log::warn!("{e}");
            }
        } else {
            log::warn!("No animations found in model '{}'", ticket.asset);
        }

        SwapOutcome::Installed {
            asset: ticket.asset.clone(),
            clips: clips.len(),
            released,
        }
    }

    /// Detaches the current model and releases every resource its meshes use.
    pub fn retire(ctx: &mut ViewerContext) -> ReleaseReport {
        ctx.actions.clear();
        ctx.mixer = None;

        let Some(model) = ctx.model.take() else {
            return ReleaseReport::default();
        };

        let mut meshes: Vec<Mesh> = Vec::new();
        ctx.scene.traverse(model.root, |_, node| {
            if let Some(mesh) = &node.mesh {
                meshes.push(mesh.clone());
            }
        });

        let mut report = ReleaseReport::default();
        for mesh in meshes {
            for material in mesh.materials {
                report += ctx.assets.release_material(material);
            }
            report += ctx.assets.release_geometry(mesh.geometry);
        }

        ctx.scene.remove_node(model.root);
        log::debug!(
            "Retired model '{}': {} geometries, {} materials, {} textures released",
            model.asset,
            report.geometries,
            report.materials,
            report.textures
        );
        report
    }
}
