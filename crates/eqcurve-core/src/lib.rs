//! eqcurve core - curve synthesis and editing for parametric EQ editors
//!
//! Bands with animatable frequency, gain and Q live in a host-owned
//! [`BandCollection`]. For a viewport and playback position the crate maps
//! them to screen space, synthesizes the smoothed response curve and lays out
//! the grid and band thumbs ([`Scene`]). An [`EditSession`] turns user input
//! (add, delete, drag) into keyframe writes, bracketed by begin/end edit
//! notifications for the host.
//!
//! No audio is processed here; the curve is a visual approximation.

pub mod animation;
pub mod axis;
pub mod band;
pub mod collection;
pub mod config;
pub mod curve;
pub mod error;
pub mod grid;
pub mod scene;
pub mod session;

pub use animation::{AnimatedParameter, Endpoint, Keyframe, KeyframeId, KeyframeSelection};
pub use axis::{AxisMapper, Point, RenderContext};
pub use band::{Band, BoundaryPolicy, ChannelMode, Edge, FilterShape};
pub use collection::{BandCollection, BandId, CollectionEvent};
pub use config::EditorConfig;
pub use curve::{CurvePath, CurveSynthesizer, PathSegment};
pub use error::{EditError, EditResult};
pub use grid::{GridLayout, GridLine, Thumb};
pub use scene::Scene;
pub use session::{EditSession, EditorEvent};
