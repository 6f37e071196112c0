//! Error types for edit-session operations
//!
//! Value writes never fail (they are clamped). Errors only describe calls that
//! do not fit the session's current state.

use crate::animation::KeyframeId;
use crate::collection::BandId;
use thiserror::Error;

/// Errors returned by [`EditSession`](crate::session::EditSession) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The band is not (or no longer) in the collection
    #[error("Band {0} not found in collection")]
    BandNotFound(BandId),

    /// A drag move or release arrived without a drag in progress
    #[error("No drag in progress")]
    NoActiveDrag,

    /// The operation is not allowed while a band is being dragged
    #[error("Band {0} is being dragged")]
    DragInProgress(BandId),

    /// A keyframe captured on drag start was removed while dragging
    #[error("Keyframe {keyframe} of band {band} no longer exists")]
    KeyframeNotFound { band: BandId, keyframe: KeyframeId },

    /// A height-resize move or release arrived without a resize in progress
    #[error("No editor resize in progress")]
    NoActiveResize,

    /// The operation is not allowed while the editor is being resized
    #[error("Editor resize in progress")]
    ResizeInProgress,

    /// The viewport has no area, screen positions cannot be mapped
    #[error("Viewport {width}x{height} has no drawable area")]
    DegenerateViewport { width: f64, height: f64 },
}

/// Result type for edit-session operations
pub type EditResult<T> = Result<T, EditError>;
