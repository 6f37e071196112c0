//! Render output for one frame of the editor

use crate::axis::{Point, RenderContext};
use crate::collection::{BandCollection, BandId};
use crate::curve::{CurvePath, CurveSynthesizer};
use crate::grid::{grid_layout, hit_test, thumb_layout, GridLayout, Thumb};

/// Everything the UI paints: grid, response curve, band thumbs and the
/// playback marker, all in screen coordinates of `context`
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub context: RenderContext,
    pub grid: GridLayout,
    pub curve: CurvePath,
    pub thumbs: Vec<Thumb>,
    pub timeline_x: f64,
}

impl Scene {
    /// A scene with nothing to draw
    pub fn empty(context: RenderContext) -> Self {
        Self {
            context,
            grid: GridLayout::default(),
            curve: CurvePath::empty(),
            thumbs: Vec::new(),
            timeline_x: 0.0,
        }
    }

    /// Lay out a full scene; a degenerate viewport gives an empty one
    pub fn build(
        bands: &BandCollection,
        context: RenderContext,
        synthesizer: &CurveSynthesizer,
        thumb_size: f64,
        selected: Option<BandId>,
    ) -> Self {
        if !context.is_renderable() {
            return Self::empty(context);
        }
        Self {
            context,
            grid: grid_layout(&context.axis),
            curve: synthesizer.synthesize(bands.iter().map(|(_, band)| band), &context),
            thumbs: thumb_layout(bands, &context, thumb_size, selected),
            timeline_x: context.timeline_x(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.curve.is_empty() && self.thumbs.is_empty()
    }

    pub fn thumb(&self, band: BandId) -> Option<&Thumb> {
        self.thumbs.iter().find(|thumb| thumb.band == band)
    }

    pub(crate) fn thumb_mut(&mut self, band: BandId) -> Option<&mut Thumb> {
        self.thumbs.iter_mut().find(|thumb| thumb.band == band)
    }

    /// Top-most band thumb under a screen point
    pub fn hit_test(&self, point: Point) -> Option<BandId> {
        hit_test(&self.thumbs, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::Band;

    #[test]
    fn test_build_full_scene() {
        let bands = BandCollection::with_bands([Band::peak(100.0, 6.0), Band::peak(4000.0, -3.0)]);
        let ctx = RenderContext::new(1000.0, 400.0).with_time(0.25);
        let scene = Scene::build(&bands, ctx, &CurveSynthesizer::default(), 14.0, None);

        assert_eq!(scene.grid.vertical.len(), 8);
        assert_eq!(scene.thumbs.len(), 2);
        assert_eq!(scene.curve.anchor_points().len(), 4);
        assert!((scene.timeline_x - 250.0).abs() < 1e-9);

        let id = bands.ids()[1];
        let center = scene.thumb(id).unwrap().center;
        assert_eq!(scene.hit_test(center), Some(id));
    }

    #[test]
    fn test_degenerate_scene_is_empty() {
        let bands = BandCollection::default();
        let ctx = RenderContext::new(0.0, 0.0);
        let scene = Scene::build(&bands, ctx, &CurveSynthesizer::default(), 14.0, None);
        assert!(scene.is_empty());
        assert!(scene.grid.zero_line.is_none());
    }
}
