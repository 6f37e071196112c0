//! EQ bands
//!
//! A [`Band`] is one control point of the equalizer curve: a filter shape, a
//! channel routing mode and three animatable parameters (frequency, gain, Q).

use crate::animation::AnimatedParameter;
use crate::axis::format_freq;

/// Frequency range of a band (Hz)
pub const FREQ_MIN: f64 = 20.0;
pub const FREQ_MAX: f64 = 20000.0;

/// Gain range of a band (dB)
pub const GAIN_MIN: f64 = -48.0;
pub const GAIN_MAX: f64 = 48.0;

/// Q range of a band
pub const Q_MIN: f64 = 0.1;
pub const Q_MAX: f64 = 18.0;

/// Filter shape of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterShape {
    #[default]
    Peak,
    LowShelf,
    HighShelf,
}

/// Plot edge that a synthetic curve boundary point sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// How the curve behaves between the outermost band and the plot edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Keep the band's gain all the way to the edge
    Hold,
    /// Return to 0 dB at the edge
    Flatten,
}

impl FilterShape {
    /// Boundary behavior when a band of this shape is the outermost one at `edge`
    ///
    /// | shape     | left    | right   |
    /// |-----------|---------|---------|
    /// | Peak      | Flatten | Flatten |
    /// | LowShelf  | Hold    | Flatten |
    /// | HighShelf | Flatten | Hold    |
    pub fn boundary_policy(self, edge: Edge) -> BoundaryPolicy {
        match (self, edge) {
            (Self::LowShelf, Edge::Left) | (Self::HighShelf, Edge::Right) => BoundaryPolicy::Hold,
            _ => BoundaryPolicy::Flatten,
        }
    }
}

impl std::fmt::Display for FilterShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peak => write!(f, "Peak"),
            Self::LowShelf => write!(f, "Low Shelf"),
            Self::HighShelf => write!(f, "High Shelf"),
        }
    }
}

/// Which channels a band is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelMode {
    #[default]
    Stereo,
    Left,
    Right,
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stereo => write!(f, "Stereo"),
            Self::Left => write!(f, "L (Left)"),
            Self::Right => write!(f, "R (Right)"),
        }
    }
}

/// One equalizer control point
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub enabled: bool,
    pub shape: FilterShape,
    pub channel_mode: ChannelMode,
    /// Display name, rewritten to "Band N" when the collection changes
    pub label: String,
    /// Center/corner frequency in Hz, clamped to [20, 20000]
    pub frequency: AnimatedParameter,
    /// Gain in dB, clamped to [-48, 48]
    pub gain: AnimatedParameter,
    /// Quality factor, clamped to [0.1, 18]
    pub q: AnimatedParameter,
}

impl Default for Band {
    fn default() -> Self {
        Self::new(
            true,
            FilterShape::Peak,
            1000.0,
            0.0,
            1.0,
            ChannelMode::Stereo,
            "Band",
        )
    }
}

impl Band {
    /// Create a band with single-keyframe parameters (values are clamped)
    pub fn new(
        enabled: bool,
        shape: FilterShape,
        frequency: f64,
        gain: f64,
        q: f64,
        channel_mode: ChannelMode,
        label: impl Into<String>,
    ) -> Self {
        Self {
            enabled,
            shape,
            channel_mode,
            label: label.into(),
            frequency: AnimatedParameter::new(frequency, FREQ_MIN, FREQ_MAX),
            gain: AnimatedParameter::new(gain, GAIN_MIN, GAIN_MAX),
            q: AnimatedParameter::new(q, Q_MIN, Q_MAX),
        }
    }

    /// An enabled stereo peak band with Q 1.0 and no label
    ///
    /// This is what a click on the plot creates.
    pub fn peak(frequency: f64, gain: f64) -> Self {
        Self::new(
            true,
            FilterShape::Peak,
            frequency,
            gain,
            1.0,
            ChannelMode::Stereo,
            "",
        )
    }

    pub fn with_shape(mut self, shape: FilterShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Frequency at `frame` of a `total_frames` timeline
    pub fn frequency_at(&self, frame: u32, total_frames: u32) -> f64 {
        self.frequency.value_at(frame, total_frames)
    }

    /// Gain at `frame` of a `total_frames` timeline
    pub fn gain_at(&self, frame: u32, total_frames: u32) -> f64 {
        self.gain.value_at(frame, total_frames)
    }

    pub fn q_at(&self, frame: u32, total_frames: u32) -> f64 {
        self.q.value_at(frame, total_frames)
    }

    /// One-line summary of the band at a frame, e.g.
    /// "Band 1: Peak 2.5kHz +3.0dB Q 1.00 Stereo"
    pub fn readout(&self, frame: u32, total_frames: u32) -> String {
        let state = if self.enabled { "" } else { " (off)" };
        format!(
            "{}{}: {} {} {:+.1}dB Q {:.2} {}",
            self.label,
            state,
            self.shape,
            format_freq(self.frequency_at(frame, total_frames)),
            self.gain_at(frame, total_frames),
            self.q_at(frame, total_frames),
            self.channel_mode,
        )
    }
}
