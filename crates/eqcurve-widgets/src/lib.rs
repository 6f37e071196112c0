//! iced widgets for the eqcurve parametric EQ editor
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State struct**: `EqEditorState` wraps the core edit session
//! - **View function**: `eq_editor` takes the state and the bands and returns
//!   an `Element`
//! - **Canvas Programs**: `EqCurveCanvas` paints the scene and translates mouse
//!   input into `EqEditorMessage`s, `ResizeHandle` drags the editor height
//!
//! The host owns the `BandCollection` and routes editor messages into
//! `EqEditorState::handle_message` together with it.

pub mod eq_editor;
pub mod theme;

pub use eq_editor::{
    eq_editor, EqCanvasInteraction, EqCurveCanvas, EqEditorMessage, EqEditorState, ResizeHandle,
};
