//! Colors and sizes for the EQ curve editor

use iced::Color;

/// Plot background
pub const BACKGROUND_COLOR: Color = Color::from_rgb(0.12, 0.12, 0.14);

/// Frequency and gain grid lines
pub const GRID_COLOR: Color = Color::from_rgba(0.31, 0.31, 0.31, 0.4);

/// The 0 dB reference line
pub const ZERO_LINE_COLOR: Color = Color::from_rgba(0.6, 0.6, 0.6, 0.7);

pub const GRID_LABEL_COLOR: Color = Color::from_rgb(0.55, 0.55, 0.6);

/// Response curve
pub const CURVE_COLOR: Color = Color::from_rgb(0.9, 0.9, 0.95);

/// Thumb fill (enabled / disabled / selected)
pub const THUMB_COLOR: Color = Color::from_rgb(0.24, 0.59, 1.0);
pub const THUMB_DISABLED_COLOR: Color = Color::from_rgba(0.5, 0.5, 0.5, 0.6);
pub const THUMB_SELECTED_COLOR: Color = Color::from_rgb(1.0, 0.84, 0.0);
pub const THUMB_BORDER_COLOR: Color = Color::from_rgb(0.95, 0.95, 0.95);

/// Playback position marker
pub const TIMELINE_COLOR: Color = Color::from_rgb(1.0, 0.25, 0.25);

pub const CURVE_WIDTH: f32 = 2.0;
pub const GRID_LABEL_SIZE: f32 = 10.0;

/// Polyline resolution per spline segment when high quality drawing is off
pub const LOW_QUALITY_STEPS: usize = 6;

/// Editor-height drag handle
pub const RESIZE_HANDLE_COLOR: Color = Color::from_rgb(0.18, 0.18, 0.2);
pub const RESIZE_GRIP_COLOR: Color = Color::from_rgb(0.45, 0.45, 0.5);
pub const RESIZE_HANDLE_HEIGHT: f32 = 8.0;
