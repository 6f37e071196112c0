//! Screen mapping for the EQ plot
//!
//! Frequency runs left to right on a log scale, gain runs bottom to top on a
//! linear scale. [`AxisMapper`] converts in both directions for one viewport,
//! [`RenderContext`] adds the playback position a render is taken at.

use crate::band::{Band, FREQ_MAX, FREQ_MIN};

/// Default symmetric gain range of the plot (±dB)
pub const DEFAULT_GAIN_RANGE_DB: f64 = 24.0;

/// Zoom limits for the symmetric gain range (dB)
pub const MIN_GAIN_RANGE_DB: f64 = 6.0;
pub const MAX_GAIN_RANGE_DB: f64 = 48.0;

/// Timeline resolution used when evaluating bands for the curve
pub const CURVE_TOTAL_FRAMES: u32 = 1000;

/// A point in screen space (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Bidirectional (frequency, gain) <-> (x, y) conversion
///
/// The mapping is only meaningful for a positive width and height; check
/// [`AxisMapper::is_degenerate`] before using it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapper {
    pub width: f64,
    pub height: f64,
    pub min_freq: f64,
    pub max_freq: f64,
    pub min_gain: f64,
    pub max_gain: f64,
}

impl AxisMapper {
    /// Full 20 Hz - 20 kHz range with a symmetric gain range of `gain_range` dB
    pub fn new(width: f64, height: f64, gain_range: f64) -> Self {
        Self {
            width,
            height,
            min_freq: FREQ_MIN,
            max_freq: FREQ_MAX,
            min_gain: -gain_range,
            max_gain: gain_range,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn freq_to_x(&self, freq: f64) -> f64 {
        self.width * (freq / self.min_freq).log10() / (self.max_freq / self.min_freq).log10()
    }

    pub fn x_to_freq(&self, x: f64) -> f64 {
        self.min_freq * (self.max_freq / self.min_freq).powf(x / self.width)
    }

    pub fn gain_to_y(&self, gain: f64) -> f64 {
        self.height * (1.0 - (gain - self.min_gain) / (self.max_gain - self.min_gain))
    }

    pub fn y_to_gain(&self, y: f64) -> f64 {
        (1.0 - y / self.height) * (self.max_gain - self.min_gain) + self.min_gain
    }

    pub fn to_screen(&self, freq: f64, gain: f64) -> Point {
        Point::new(self.freq_to_x(freq), self.gain_to_y(gain))
    }

    /// Inverse of [`AxisMapper::to_screen`], returns (frequency, gain)
    pub fn from_screen(&self, point: Point) -> (f64, f64) {
        (self.x_to_freq(point.x), self.y_to_gain(point.y))
    }
}

/// Everything one render pass needs: viewport, axis ranges and playback time
///
/// Built fresh for each render instead of living as mutable editor state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub axis: AxisMapper,
    /// Normalized playback position (0.0 - 1.0)
    pub time: f64,
}

impl RenderContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            axis: AxisMapper::new(width, height, DEFAULT_GAIN_RANGE_DB),
            time: 0.0,
        }
    }

    /// Set the symmetric gain range, clamped to the zoom limits
    pub fn with_gain_range(mut self, range_db: f64) -> Self {
        let range = clamp_gain_range(range_db);
        self.axis.min_gain = -range;
        self.axis.max_gain = range;
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = clamp_time(time);
        self
    }

    pub fn width(&self) -> f64 {
        self.axis.width
    }

    pub fn height(&self) -> f64 {
        self.axis.height
    }

    pub fn gain_range(&self) -> f64 {
        self.axis.max_gain
    }

    /// False when the viewport has no area and nothing should be drawn
    pub fn is_renderable(&self) -> bool {
        !self.axis.is_degenerate()
    }

    /// Frame of the curve timeline the playback position falls on
    pub fn frame(&self) -> u32 {
        (f64::from(CURVE_TOTAL_FRAMES) * self.time).floor() as u32
    }

    /// X position of the playback marker
    pub fn timeline_x(&self) -> f64 {
        self.axis.width * self.time
    }

    /// Screen position of a band at `frame` of a `total_frames` timeline
    pub fn band_point(&self, band: &Band, frame: u32, total_frames: u32) -> Point {
        self.axis.to_screen(
            band.frequency_at(frame, total_frames),
            band.gain_at(frame, total_frames),
        )
    }

    /// Screen position of a band at the current playback position
    pub fn band_point_now(&self, band: &Band) -> Point {
        self.band_point(band, self.frame(), CURVE_TOTAL_FRAMES)
    }
}

pub(crate) fn clamp_gain_range(range_db: f64) -> f64 {
    if range_db.is_nan() {
        return DEFAULT_GAIN_RANGE_DB;
    }
    range_db.abs().clamp(MIN_GAIN_RANGE_DB, MAX_GAIN_RANGE_DB)
}

pub(crate) fn clamp_time(time: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, 1.0)
}

/// Format a frequency for display ("440Hz", "2.5kHz")
pub fn format_freq(freq: f64) -> String {
    if freq >= 1000.0 {
        format!("{:.1}kHz", freq / 1000.0)
    } else {
        format!("{:.0}Hz", freq)
    }
}
