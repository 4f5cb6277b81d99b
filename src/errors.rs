//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers all failure modes including:
//! - Asset resolution and prefab decoding errors
//! - Animation clip lookup failures
//! - Settings file errors
//! - Windowing errors (when the `winit` feature is enabled)
//!
//! None of these are fatal to the viewer. Callers in the frame loop log them
//! and leave the scene as it was.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`.
//!
//! ```rust,ignore
//! use rigview::errors::{ViewerError, Result};
//!
//! fn pick_clip() -> Result<()> {
//!     Err(ViewerError::ClipNotFound("praying".into()))
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The loader could not find the asset at its resolved location.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The asset was read but its contents are not a valid model.
    #[error("Invalid model data in {path}: {reason}")]
    InvalidModel {
        /// Resolved asset path
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// The background loader went away before reporting a result.
    #[error("Asset loader disconnected")]
    LoaderDisconnected,

    /// No load completed within the allotted time.
    #[error("Timed out waiting for asset load")]
    LoadTimeout,

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// No action is indexed under the requested clip name.
    #[error("Animation not found: {0}")]
    ClipNotFound(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The settings file is structurally valid JSON but semantically wrong.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Windowing Errors
    // ========================================================================
    /// Event loop or window creation failure (winit).
    #[error("Windowing error: {0}")]
    WindowError(String),
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
