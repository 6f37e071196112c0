//! Messages for the EQ curve editor widget

use eqcurve_core::BandId;

/// Messages emitted by the EQ curve editor
#[derive(Debug, Clone, PartialEq)]
pub enum EqEditorMessage {
    // ─────────────────────────────────────────────────────────────────────
    // Canvas interaction
    // ─────────────────────────────────────────────────────────────────────
    /// Left button pressed on a band thumb
    DragStarted(BandId),

    /// Cursor moved while dragging (screen delta in px)
    DragMoved { dx: f64, dy: f64 },

    /// Left button released after a drag
    DragReleased,

    /// Add a band at a canvas position
    AddPoint { x: f64, y: f64 },

    /// Delete a band
    DeletePoint(BandId),

    /// Canvas bounds differ from the laid-out scene
    Resized { width: f64, height: f64 },

    // ─────────────────────────────────────────────────────────────────────
    // Height resize handle
    // ─────────────────────────────────────────────────────────────────────
    /// Left button pressed on the resize handle
    ResizeStarted,

    /// Handle dragged vertically (px)
    ResizeMoved { dy: f64 },

    /// Handle released; the new height is saved
    ResizeReleased,

    // ─────────────────────────────────────────────────────────────────────
    // Controls
    // ─────────────────────────────────────────────────────────────────────
    /// Playback position (0.0 - 1.0)
    SetTime(f64),

    /// Symmetric gain range in dB
    SetZoom(f64),

    /// Toggle cubic curve drawing (saved to the config)
    SetHighQuality(bool),

    /// Deliver deferred notifications (scheduled by the editor itself)
    FlushDeferred,
}
