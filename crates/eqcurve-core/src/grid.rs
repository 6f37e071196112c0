//! Grid and thumb geometry
//!
//! Pure layout for everything drawn behind and on top of the curve: frequency
//! and gain grid lines with their labels, and one square thumb per band.

use crate::axis::{AxisMapper, Point, RenderContext};
use crate::collection::{BandCollection, BandId};

/// Frequencies that get a vertical grid line (Hz)
pub const GRID_FREQUENCIES: [f64; 8] = [
    50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0,
];

/// Spacing of the horizontal gain lines (dB)
pub const GAIN_GRID_STEP_DB: f64 = 6.0;

/// Default edge length of a band thumb (px)
pub const DEFAULT_THUMB_SIZE: f64 = 14.0;

/// A grid line at `position` (x for vertical lines, y for horizontal ones)
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub position: f64,
    pub label: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    /// Frequency lines
    pub vertical: Vec<GridLine>,
    /// Gain lines, 0 dB excluded
    pub horizontal: Vec<GridLine>,
    pub zero_line: Option<GridLine>,
}

/// "50", "500", "1k", "10k"
pub fn format_grid_frequency(freq: f64) -> String {
    if freq >= 1000.0 {
        format!("{}k", freq / 1000.0)
    } else {
        format!("{}", freq)
    }
}

/// Grid lines for one viewport
pub fn grid_layout(axis: &AxisMapper) -> GridLayout {
    if axis.is_degenerate() {
        return GridLayout::default();
    }

    let vertical = GRID_FREQUENCIES
        .iter()
        .map(|&freq| GridLine {
            position: axis.freq_to_x(freq),
            label: format_grid_frequency(freq),
            emphasized: false,
        })
        .collect();

    let max_gain = axis.max_gain.abs();
    let steps = (max_gain / GAIN_GRID_STEP_DB) as i32;
    let horizontal = (-steps..=steps)
        .filter(|&i| i != 0)
        .map(|i| f64::from(i) * GAIN_GRID_STEP_DB)
        .filter(|gain| gain.abs() <= max_gain)
        .map(|gain| GridLine {
            position: axis.gain_to_y(gain),
            label: format!("{gain:.0}"),
            emphasized: false,
        })
        .collect();

    GridLayout {
        vertical,
        horizontal,
        zero_line: Some(GridLine {
            position: axis.gain_to_y(0.0),
            label: "0dB".to_string(),
            emphasized: true,
        }),
    }
}

/// The draggable marker of one band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub band: BandId,
    pub center: Point,
    pub size: f64,
    pub enabled: bool,
    pub selected: bool,
}

impl Thumb {
    pub fn top_left(&self) -> Point {
        Point::new(self.center.x - self.size / 2.0, self.center.y - self.size / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        let half = self.size / 2.0;
        (point.x - self.center.x).abs() <= half && (point.y - self.center.y).abs() <= half
    }
}

/// One thumb per band (enabled or not) at the context's playback position
///
/// Thumbs are in collection order, so later bands are drawn on top.
pub fn thumb_layout(
    bands: &BandCollection,
    ctx: &RenderContext,
    size: f64,
    selected: Option<BandId>,
) -> Vec<Thumb> {
    if !ctx.is_renderable() {
        return Vec::new();
    }
    bands
        .iter()
        .map(|(id, band)| Thumb {
            band: id,
            center: ctx.band_point_now(band),
            size,
            enabled: band.enabled,
            selected: selected == Some(id),
        })
        .collect()
}

/// Top-most thumb under `point`
pub fn hit_test(thumbs: &[Thumb], point: Point) -> Option<BandId> {
    thumbs
        .iter()
        .rev()
        .find(|thumb| thumb.contains(point))
        .map(|thumb| thumb.band)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::Band;

    #[test]
    fn test_frequency_labels() {
        let labels: Vec<String> = GRID_FREQUENCIES
            .iter()
            .map(|&f| format_grid_frequency(f))
            .collect();
        assert_eq!(
            labels,
            vec!["50", "100", "200", "500", "1k", "2k", "5k", "10k"]
        );
    }

    #[test]
    fn test_gain_lines_for_default_zoom() {
        let axis = AxisMapper::new(1000.0, 400.0, 24.0);
        let grid = grid_layout(&axis);
        let labels: Vec<&str> = grid.horizontal.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["-24", "-18", "-12", "-6", "6", "12", "18", "24"]);

        let zero = grid.zero_line.unwrap();
        assert_eq!(zero.label, "0dB");
        assert!(zero.emphasized);
        assert!((zero.position - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_gain_lines_skip_out_of_range() {
        let axis = AxisMapper::new(100.0, 100.0, 10.0);
        let grid = grid_layout(&axis);
        let labels: Vec<&str> = grid.horizontal.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["-6", "6"]);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        let grid = grid_layout(&AxisMapper::new(0.0, 0.0, 24.0));
        assert!(grid.vertical.is_empty());
        assert!(grid.zero_line.is_none());
    }

    #[test]
    fn test_thumbs_and_hit_test() {
        let ctx = RenderContext::new(1000.0, 400.0);
        let mut bands = BandCollection::new();
        let a = bands.push(Band::peak(1000.0, 0.0));
        let b = bands.push(Band::peak(1000.0, 0.0).with_enabled(false));
        let c = bands.push(Band::peak(100.0, 12.0));

        let thumbs = thumb_layout(&bands, &ctx, DEFAULT_THUMB_SIZE, Some(c));
        assert_eq!(thumbs.len(), 3);
        assert!(!thumbs[1].enabled);
        assert!(thumbs[2].selected && !thumbs[0].selected);

        // a and b overlap, the later one wins
        let center = thumbs[0].center;
        assert_eq!(hit_test(&thumbs, center), Some(b));
        assert_ne!(hit_test(&thumbs, center), Some(a));
        assert_eq!(hit_test(&thumbs, thumbs[2].center + Point::new(6.0, -6.0)), Some(c));
        assert_eq!(hit_test(&thumbs, Point::new(999.0, 1.0)), None);
    }

    #[test]
    fn test_thumb_top_left() {
        let thumb = Thumb {
            band: BandCollection::default().ids()[0],
            center: Point::new(20.0, 30.0),
            size: 14.0,
            enabled: true,
            selected: false,
        };
        assert_eq!(thumb.top_left(), Point::new(13.0, 23.0));
    }
}
