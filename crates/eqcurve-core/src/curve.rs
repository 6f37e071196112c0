//! Response curve synthesis
//!
//! The curve is a visual approximation, not a filter response: it is a smooth
//! spline through the enabled bands' screen points, with one synthetic point
//! on each plot edge. Whether an edge point sits at 0 dB or at the outermost
//! band's gain depends on that band's shape (see
//! [`FilterShape::boundary_policy`]).

use crate::axis::{Point, RenderContext, CURVE_TOTAL_FRAMES};
use crate::band::{Band, BoundaryPolicy, Edge, FilterShape};

/// Spline tension that gives the standard control-point scale of 0.175
pub const DEFAULT_TENSION: f64 = 0.5;

/// Control-point scale for a spline tension
pub fn control_scale(tension: f64) -> f64 {
    tension / 0.5 * 0.175
}

/// One drawing command after the path's start point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line { to: Point },
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

impl PathSegment {
    pub fn end(&self) -> Point {
        match *self {
            Self::Line { to } | Self::Cubic { to, .. } => to,
        }
    }
}

/// A continuous open path: a start point followed by segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvePath {
    pub start: Option<Point>,
    pub segments: Vec<PathSegment>,
}

impl CurvePath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self {
            start: Some(from),
            segments: vec![PathSegment::Line { to }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.start
    }

    pub fn last_point(&self) -> Option<Point> {
        self.segments.last().map(PathSegment::end).or(self.start)
    }

    /// Start point plus every segment end, the points the path passes through
    pub fn anchor_points(&self) -> Vec<Point> {
        self.start
            .into_iter()
            .chain(self.segments.iter().map(PathSegment::end))
            .collect()
    }

    /// Flatten into a polyline with `steps` points per cubic segment
    pub fn sample(&self, steps: usize) -> Vec<Point> {
        let Some(start) = self.start else {
            return Vec::new();
        };
        let steps = steps.max(1);
        let mut points = vec![start];
        let mut current = start;
        for segment in &self.segments {
            match *segment {
                PathSegment::Line { to } => points.push(to),
                PathSegment::Cubic { ctrl1, ctrl2, to } => {
                    for step in 1..=steps {
                        let t = step as f64 / steps as f64;
                        points.push(cubic_point(current, ctrl1, ctrl2, to, t));
                    }
                }
            }
            current = segment.end();
        }
        points
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Builds the response curve for a set of bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSynthesizer {
    pub tension: f64,
}

impl Default for CurveSynthesizer {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
        }
    }
}

impl CurveSynthesizer {
    pub fn new(tension: f64) -> Self {
        Self { tension }
    }

    /// Synthesize the curve at the context's playback position
    ///
    /// Returns an empty path for a degenerate viewport and a flat 0 dB line
    /// when no band is enabled.
    pub fn synthesize<'a>(
        &self,
        bands: impl IntoIterator<Item = &'a Band>,
        ctx: &RenderContext,
    ) -> CurvePath {
        if !ctx.is_renderable() {
            return CurvePath::empty();
        }
        match self.anchor_points(bands, ctx) {
            Some(points) => self.spline(&points),
            None => {
                let zero = ctx.axis.gain_to_y(0.0);
                CurvePath::line(Point::new(0.0, zero), Point::new(ctx.width(), zero))
            }
        }
    }

    /// Screen points the curve passes through, edge points included
    ///
    /// `None` when no band is enabled.
    pub fn anchor_points<'a>(
        &self,
        bands: impl IntoIterator<Item = &'a Band>,
        ctx: &RenderContext,
    ) -> Option<Vec<Point>> {
        let frame = ctx.frame();
        let mut active: Vec<(Point, FilterShape)> = bands
            .into_iter()
            .filter(|band| band.enabled)
            .map(|band| (ctx.band_point(band, frame, CURVE_TOTAL_FRAMES), band.shape))
            .collect();
        if active.is_empty() {
            return None;
        }
        // x is monotonic in frequency, stable sort keeps collection order on ties
        active.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));

        let zero = ctx.axis.gain_to_y(0.0);
        let (first, first_shape) = active[0];
        let (last, last_shape) = active[active.len() - 1];
        let edge_y = |point: Point, shape: FilterShape, edge: Edge| {
            match shape.boundary_policy(edge) {
                BoundaryPolicy::Hold => point.y,
                BoundaryPolicy::Flatten => zero,
            }
        };

        let mut points = Vec::with_capacity(active.len() + 2);
        points.push(Point::new(0.0, edge_y(first, first_shape, Edge::Left)));
        points.extend(active.iter().map(|(point, _)| *point));
        points.push(Point::new(ctx.width(), edge_y(last, last_shape, Edge::Right)));
        Some(points)
    }

    /// Catmull-Rom style spline through `points`, empty for fewer than two
    pub fn spline(&self, points: &[Point]) -> CurvePath {
        if points.len() < 2 {
            return CurvePath::empty();
        }
        let scale = control_scale(self.tension);
        let segments = (0..points.len() - 1)
            .map(|i| {
                let p1 = points[i];
                let p2 = points[i + 1];
                let p0 = if i == 0 { p1 } else { points[i - 1] };
                let p3 = points.get(i + 2).copied().unwrap_or(p2);
                PathSegment::Cubic {
                    ctrl1: p1 + (p2 - p0) * scale,
                    ctrl2: p2 - (p3 - p1) * scale,
                    to: p2,
                }
            })
            .collect();
        CurvePath {
            start: Some(points[0]),
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::ChannelMode;

    fn ctx() -> RenderContext {
        RenderContext::new(1000.0, 400.0)
    }

    fn band(freq: f64, gain: f64, shape: FilterShape) -> Band {
        Band::new(true, shape, freq, gain, 1.0, ChannelMode::Stereo, "")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_shelf_endpoints_hold_gain() {
        let ctx = ctx();
        let bands = [
            band(100.0, 6.0, FilterShape::LowShelf),
            band(1000.0, 0.0, FilterShape::Peak),
            band(8000.0, -6.0, FilterShape::HighShelf),
        ];
        let path = CurveSynthesizer::default().synthesize(&bands, &ctx);

        let first = path.first_point().unwrap();
        let last = path.last_point().unwrap();
        assert!(close(first.x, 0.0));
        assert!(close(first.y, ctx.axis.gain_to_y(6.0)));
        assert!(close(last.x, 1000.0));
        assert!(close(last.y, ctx.axis.gain_to_y(-6.0)));
    }

    #[test]
    fn test_peak_endpoints_flatten() {
        let ctx = ctx();
        let bands = [
            band(100.0, 6.0, FilterShape::Peak),
            band(8000.0, -6.0, FilterShape::LowShelf),
        ];
        let path = CurveSynthesizer::default().synthesize(&bands, &ctx);
        let zero = ctx.axis.gain_to_y(0.0);
        assert!(close(path.first_point().unwrap().y, zero));
        // A low shelf on the right edge does not hold either
        assert!(close(path.last_point().unwrap().y, zero));
    }

    #[test]
    fn test_no_enabled_bands_is_flat_line() {
        let ctx = ctx();
        let bands = [band(500.0, 12.0, FilterShape::Peak).with_enabled(false)];
        let path = CurveSynthesizer::default().synthesize(&bands, &ctx);
        let zero = ctx.axis.gain_to_y(0.0);
        assert_eq!(
            path,
            CurvePath::line(Point::new(0.0, zero), Point::new(1000.0, zero))
        );
    }

    #[test]
    fn test_degenerate_viewport_is_empty() {
        let ctx = RenderContext::new(0.0, 400.0);
        let bands = [band(500.0, 12.0, FilterShape::Peak)];
        assert!(CurveSynthesizer::default().synthesize(&bands, &ctx).is_empty());
    }

    #[test]
    fn test_curve_passes_through_sorted_bands() {
        let ctx = ctx();
        let bands = [
            band(5000.0, 3.0, FilterShape::Peak),
            band(50.0, -3.0, FilterShape::Peak),
            band(700.0, 9.0, FilterShape::Peak).with_enabled(false),
        ];
        let path = CurveSynthesizer::default().synthesize(&bands, &ctx);
        let anchors = path.anchor_points();
        assert_eq!(anchors.len(), 4);
        assert!(close(anchors[1].x, ctx.axis.freq_to_x(50.0)));
        assert!(close(anchors[2].x, ctx.axis.freq_to_x(5000.0)));
        assert!(anchors.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_spline_control_points() {
        let synth = CurveSynthesizer::default();
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let path = synth.spline(&points);
        assert_eq!(path.segments.len(), 2);

        let PathSegment::Cubic { ctrl1, ctrl2, to } = path.segments[0] else {
            panic!("expected cubic segment");
        };
        // First segment: p0 = p1, so cp1 = p1 + (p2 - p1) * 0.175
        assert!(close(ctrl1.x, 1.75) && close(ctrl1.y, 1.75));
        // cp2 = p2 - (p3 - p1) * 0.175 = (10,10) - (20,0) * 0.175
        assert!(close(ctrl2.x, 6.5) && close(ctrl2.y, 10.0));
        assert_eq!(to, points[1]);
    }

    #[test]
    fn test_spline_needs_two_points() {
        let synth = CurveSynthesizer::default();
        assert!(synth.spline(&[]).is_empty());
        assert!(synth.spline(&[Point::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_control_scale() {
        assert!(close(control_scale(DEFAULT_TENSION), 0.175));
        assert!(close(control_scale(1.0), 0.35));
    }

    #[test]
    fn test_sample_hits_anchor_points() {
        let synth = CurveSynthesizer::default();
        let points = [
            Point::new(0.0, 50.0),
            Point::new(40.0, 10.0),
            Point::new(100.0, 50.0),
        ];
        let samples = synth.spline(&points).sample(8);
        assert_eq!(samples.len(), 1 + 2 * 8);
        assert_eq!(samples[0], points[0]);
        assert!(samples[8].distance(points[1]) < 1e-9);
        assert!(samples[16].distance(points[2]) < 1e-9);
    }
}
