//! Parametric EQ curve editor widget
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ 12  ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄ │
//! │  6  ┄┄┄┄┄┄┄╭─■─╮┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄│┄┄┄┄┄┄┄┄ │
//! │ 0dB ───────╯   ╰───────■──────╮       │        │
//! │ -6  ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄╰──■────│──────── │
//! │   50  100  200  500  1k  2k  5k  10k  │        │
//! └───────────────────────────────────────────────┘
//!                       ═══  (drag to resize)
//!   Band 1: Peak 1.0kHz +6.0dB Q 1.00 Stereo
//!   Time [━━━━━━━━━━━━━━━━━━●━━━━━━━]  ±24 dB [━━●━━]  HQ (○)
//! ```
//!
//! Thumbs (■) are dragged with the left button, right-click adds or deletes
//! a band, the vertical red line marks the playback position. The handle
//! under the plot changes the editor height, which is saved with the
//! high-quality setting.

mod canvas;
mod message;
mod resize_handle;
mod state;
mod view;

pub use canvas::{EqCanvasInteraction, EqCurveCanvas};
pub use message::EqEditorMessage;
pub use resize_handle::{ResizeHandle, ResizeInteraction};
pub use state::EqEditorState;
pub use view::eq_editor;
