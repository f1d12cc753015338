//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`BuildupError`] covers every failure an operator can
//! report back to the invoking user action:
//! - Configuration and lifecycle errors (disabled effects, invalid ranges)
//! - Selection errors (nothing selected, wrong object type)
//! - Preset parsing errors
//!
//! None of these are fatal. Operators either complete or return before
//! writing anything, except [`BuildupError::NoAnimationFound`] which is
//! reported after the (harmless) settings reset of a clear.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, BuildupError>`.
//!
//! ```rust,ignore
//! use buildup::errors::{BuildupError, Result};
//!
//! fn run(scene: &mut Scene, configs: &mut ConfigStore) -> Result<()> {
//!     let report = buildup::ops::apply_animation(scene, configs)?;
//!     log::info!("applied to {}", report.applied_count);
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for buildup operators.
#[derive(Error, Debug)]
pub enum BuildupError {
    // ========================================================================
    // Lifecycle & Configuration Errors
    // ========================================================================
    /// Apply was attempted on a disabled configuration.
    #[error("Animation not enabled for '{object}'")]
    NotEnabled {
        /// Name of the active object
        object: String,
    },

    /// Clear was attempted on objects that carry no animation data.
    #[error("No animation data found")]
    NoAnimationFound,

    /// Animation parameters are outside their valid range.
    #[error("Invalid animation parameters: {0}")]
    InvalidParameters(String),

    // ========================================================================
    // Selection Errors
    // ========================================================================
    /// A geometry tool was invoked with no vertices or faces selected.
    #[error("Nothing selected: select vertices or faces in edit mode first")]
    EmptySelection,

    /// The operator requires an active object.
    #[error("No active object")]
    NoActiveObject,

    /// The operator requires a mesh object.
    #[error("Object '{object}' is not a mesh")]
    NotAMesh {
        /// Name of the offending object
        object: String,
    },

    /// A handle did not resolve to a live object.
    #[error("Object not found in scene")]
    ObjectNotFound,

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON preset parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuildupError {
    /// Returns `true` for conditions the host surfaces as a warning rather
    /// than an error report.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NotEnabled { .. } | Self::NoAnimationFound | Self::EmptySelection
        )
    }
}

/// Alias for `Result<T, BuildupError>`.
pub type Result<T> = std::result::Result<T, BuildupError>;
