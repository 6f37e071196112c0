//! Edit session
//!
//! [`EditSession`] is the editor's state: viewport, zoom, playback position,
//! selection and the drag in progress. It does not own the bands; every
//! operation borrows the host's [`BandCollection`].
//!
//! # Drag state machine
//!
//! ```text
//!   Idle --drag_start--> Dragging --drag_delta--> Dragging
//!     ^                     |
//!     +----drag_complete----+
//! ```
//!
//! On drag start the session picks which keyframe of frequency and gain the
//! gesture edits, see [`AnimatedParameter::select`](crate::animation::AnimatedParameter::select).
//! While dragging, property-change notifications from the collection are
//! ignored and only the curve is re-synthesized per move.
//!
//! # Notifications
//!
//! Outgoing [`EditorEvent`]s are queued and drained with
//! [`EditSession::take_events`]. A change to the selected band made outside
//! the editor queues a deferred [`EditorEvent::ForceRefresh`], released by
//! [`EditSession::flush_deferred`] on the next turn of the host's event loop.

mod drag;
mod event;

pub use drag::DragState;
pub use event::EditorEvent;

use crate::animation::KeyframeSelection;
use crate::axis::{clamp_gain_range, clamp_time, Point, RenderContext, CURVE_TOTAL_FRAMES};
use crate::band::Band;
use crate::collection::{BandCollection, BandId, CollectionEvent};
use crate::config::{clamp_editor_height, EditorConfig};
use crate::curve::CurveSynthesizer;
use crate::error::{EditError, EditResult};
use crate::scene::Scene;

/// Interactive state of one curve editor
#[derive(Debug, Clone)]
pub struct EditSession {
    width: f64,
    height: f64,
    gain_range: f64,
    time: f64,
    thumb_size: f64,
    synthesizer: CurveSynthesizer,
    selected: Option<BandId>,
    drag: Option<DragState>,
    resizing: bool,
    scene: Scene,
    events: Vec<EditorEvent>,
    deferred: Vec<EditorEvent>,
}

impl EditSession {
    /// Create a session with a zero-width viewport; call [`EditSession::resize`]
    /// once the real size is known
    pub fn new(config: &EditorConfig) -> Self {
        let height = config.validated_editor_height();
        let context = RenderContext::new(0.0, height).with_gain_range(config.validated_gain_range());
        Self {
            width: 0.0,
            height,
            gain_range: context.gain_range(),
            time: 0.0,
            thumb_size: config.validated_thumb_size(),
            synthesizer: CurveSynthesizer::new(config.validated_tension()),
            selected: None,
            drag: None,
            resizing: false,
            scene: Scene::empty(context),
            events: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Context for a render at the current viewport, zoom and time
    pub fn context(&self) -> RenderContext {
        RenderContext::new(self.width, self.height)
            .with_gain_range(self.gain_range)
            .with_time(self.time)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Option<BandId> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn gain_range(&self) -> f64 {
        self.gain_range
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn thumb_size(&self) -> f64 {
        self.thumb_size
    }

    /// Drain queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Release deferred notifications and redraw
    ///
    /// Hosts call this on the turn after the one that queued them.
    pub fn flush_deferred(&mut self, bands: &BandCollection) {
        if self.deferred.is_empty() {
            return;
        }
        log::debug!("flush_deferred: Releasing {} event(s)", self.deferred.len());
        self.events.append(&mut self.deferred);
        self.render(bands);
    }

    /// Start editing a collection: label bands, pick a default selection and render
    pub fn attach(&mut self, bands: &mut BandCollection) {
        log::info!("attach: Attaching to collection with {} band(s)", bands.len());
        bands.take_events();
        self.selected = None;
        self.drag = None;
        self.resizing = false;
        self.deferred.clear();
        self.membership_changed(bands);
        self.render(bands);
    }

    /// Process notifications queued by the collection since the last call
    pub fn sync(&mut self, bands: &mut BandCollection) {
        let mut membership = false;
        let mut changed = false;

        for event in bands.take_events() {
            match event {
                CollectionEvent::Added(_) | CollectionEvent::Removed(_) => membership = true,
                CollectionEvent::PropertyChanged(_) if self.drag.is_some() => {}
                CollectionEvent::PropertyChanged(id) => {
                    changed = true;
                    let refresh_queued = self.deferred.contains(&EditorEvent::ForceRefresh);
                    if self.selected == Some(id) && !refresh_queued {
                        log::debug!("sync: Selected band {} changed, refresh deferred", id);
                        self.deferred.push(EditorEvent::ForceRefresh);
                    }
                }
            }
        }

        if membership {
            self.membership_changed(bands);
        }
        if membership || changed {
            if self.drag.is_some() {
                self.resynthesize(bands);
            } else {
                self.render(bands);
            }
        }
    }

    /// Add a peak band at a screen position
    pub fn add_band_at(&mut self, bands: &mut BandCollection, x: f64, y: f64) -> EditResult<BandId> {
        self.ensure_idle()?;
        let ctx = self.renderable_context()?;
        let (freq, gain) = ctx.axis.from_screen(Point::new(x, y));

        self.events.push(EditorEvent::BeginEdit);
        let id = bands.push(Band::peak(freq, gain));
        log::info!("add_band_at: Added band {} at {:.1} Hz / {:.1} dB", id, freq, gain);
        self.events.push(EditorEvent::BandAdded(id));
        self.sync(bands);
        self.events.push(EditorEvent::EndEdit);
        Ok(id)
    }

    /// Delete a band
    pub fn remove_band(&mut self, bands: &mut BandCollection, id: BandId) -> EditResult<Band> {
        self.ensure_idle()?;
        if !bands.contains(id) {
            return Err(EditError::BandNotFound(id));
        }

        self.events.push(EditorEvent::BeginEdit);
        if self.selected == Some(id) {
            self.set_selected(None);
        }
        let band = bands.remove(id).ok_or(EditError::BandNotFound(id))?;
        log::info!("remove_band: Removed band {}", id);
        self.events.push(EditorEvent::BandRemoved(id));
        self.sync(bands);
        self.events.push(EditorEvent::EndEdit);
        Ok(band)
    }

    /// Make a band the selected one
    pub fn select(&mut self, bands: &BandCollection, id: BandId) -> EditResult<()> {
        if !bands.contains(id) {
            return Err(EditError::BandNotFound(id));
        }
        if self.selected != Some(id) {
            self.set_selected(Some(id));
            self.render(bands);
        }
        Ok(())
    }

    /// Begin dragging a band's thumb
    pub fn drag_start(&mut self, bands: &mut BandCollection, id: BandId) -> EditResult<()> {
        self.ensure_idle()?;
        let ctx = self.renderable_context()?;
        self.sync(bands);

        let band = bands.get(id).ok_or(EditError::BandNotFound(id))?;
        let frequency = band.frequency.select(self.time);
        let gain = band.gain.select(self.time);

        // Snap the thumb onto the keyframes being edited
        let freq_value = band
            .frequency
            .keyframe(frequency.id())
            .map(|kf| kf.value())
            .unwrap_or_else(|| band.frequency_at(ctx.frame(), CURVE_TOTAL_FRAMES));
        let gain_value = band
            .gain
            .keyframe(gain.id())
            .map(|kf| kf.value())
            .unwrap_or_else(|| band.gain_at(ctx.frame(), CURVE_TOTAL_FRAMES));
        let center = ctx.axis.to_screen(freq_value, gain_value);
        let half = self.thumb_size / 2.0;

        log::debug!(
            "drag_start: Band {} frequency {:?} gain {:?}",
            id,
            frequency,
            gain
        );

        self.events.push(EditorEvent::BeginEdit);
        self.set_selected(Some(id));
        self.drag = Some(DragState {
            band: id,
            frequency,
            gain,
            origin: center - Point::new(half, half),
            thumb_size: self.thumb_size,
        });
        self.render(bands);
        Ok(())
    }

    /// Move the dragged thumb by a screen delta and write the new values
    ///
    /// Nothing is written and the thumb stays put when the band or one of the
    /// captured keyframes has been removed since the drag started.
    pub fn drag_delta(&mut self, bands: &mut BandCollection, dx: f64, dy: f64) -> EditResult<()> {
        let ctx = self.context();
        let mut moved = *self.drag.as_ref().ok_or(EditError::NoActiveDrag)?;
        ensure_captured(bands, &moved)?;

        moved.apply_delta(dx, dy, &ctx.axis);
        let (freq, gain) = moved.values(&ctx.axis);
        let written = bands.update(moved.band, |band| {
            let freq_written = band.frequency.set_keyframe_value(moved.frequency.id(), freq);
            let gain_written = band.gain.set_keyframe_value(moved.gain.id(), gain);
            (freq_written, gain_written)
        });
        // Drain our own property change while still dragging so it is ignored
        self.sync(bands);
        match written {
            None => return Err(EditError::BandNotFound(moved.band)),
            Some((false, _)) => return Err(keyframe_not_found(&moved, moved.frequency)),
            Some((_, false)) => return Err(keyframe_not_found(&moved, moved.gain)),
            Some((true, true)) => {}
        }

        self.drag = Some(moved);
        self.events.push(EditorEvent::KeyframesMoved {
            band: moved.band,
            frequency: moved.frequency.id(),
            gain: moved.gain.id(),
        });
        self.resynthesize(bands);
        Ok(())
    }

    /// Finish the drag gesture
    pub fn drag_complete(&mut self, bands: &mut BandCollection) -> EditResult<()> {
        if self.drag.is_none() {
            return Err(EditError::NoActiveDrag);
        }
        self.sync(bands);
        if let Some(drag) = self.drag.take() {
            log::debug!("drag_complete: Band {}", drag.band);
        }
        self.render(bands);
        self.events.push(EditorEvent::EndEdit);
        Ok(())
    }

    /// Begin the editor-height resize gesture
    pub fn resize_start(&mut self) -> EditResult<()> {
        self.ensure_idle()?;
        log::debug!("resize_start: Height {}", self.height);
        self.resizing = true;
        self.events.push(EditorEvent::BeginEdit);
        Ok(())
    }

    /// Grow or shrink the editor by `dy` px, returns the new height
    ///
    /// The height is clamped to [150, 600].
    pub fn resize_delta(&mut self, bands: &BandCollection, dy: f64) -> EditResult<f64> {
        if !self.resizing {
            return Err(EditError::NoActiveResize);
        }
        let height = clamp_editor_height(self.height + dy);
        self.resize(bands, self.width, height);
        Ok(height)
    }

    /// Finish the resize gesture, returns the final height
    pub fn resize_complete(&mut self) -> EditResult<f64> {
        if !self.resizing {
            return Err(EditError::NoActiveResize);
        }
        self.resizing = false;
        log::info!("resize_complete: Editor height {}", self.height);
        self.events.push(EditorEvent::EndEdit);
        Ok(self.height)
    }

    /// Move the playback position (clamped to [0, 1])
    ///
    /// While dragging the scene is left as is until the drag completes.
    pub fn set_time(&mut self, bands: &BandCollection, time: f64) {
        self.time = clamp_time(time);
        if self.drag.is_none() {
            self.render(bands);
        }
    }

    /// Set the symmetric gain range in dB (clamped to the zoom limits)
    pub fn set_zoom(&mut self, bands: &BandCollection, range_db: f64) {
        self.gain_range = clamp_gain_range(range_db);
        self.render(bands);
    }

    pub fn resize(&mut self, bands: &BandCollection, width: f64, height: f64) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("resize: {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.render(bands);
    }

    /// Full layout pass: grid, curve, thumbs and timeline
    pub fn render(&mut self, bands: &BandCollection) {
        let ctx = self.context();
        self.scene = Scene::build(bands, ctx, &self.synthesizer, self.thumb_size, self.selected);
        self.place_dragged_thumb();
    }

    /// Curve-only pass used while dragging
    fn resynthesize(&mut self, bands: &BandCollection) {
        let ctx = self.context();
        if !ctx.is_renderable() {
            self.scene = Scene::empty(ctx);
            return;
        }
        self.scene.curve = self
            .synthesizer
            .synthesize(bands.iter().map(|(_, band)| band), &ctx);
        self.place_dragged_thumb();
    }

    fn place_dragged_thumb(&mut self) {
        if let Some(drag) = self.drag {
            if let Some(thumb) = self.scene.thumb_mut(drag.band) {
                thumb.center = drag.center();
            }
        }
    }

    fn membership_changed(&mut self, bands: &mut BandCollection) {
        bands.relabel();
        if let Some(id) = self.selected {
            if !bands.contains(id) {
                self.set_selected(None);
            }
        }
        if self.selected.is_none() {
            if let Some(id) = default_selection(bands) {
                self.set_selected(Some(id));
            }
        }
    }

    fn set_selected(&mut self, selected: Option<BandId>) {
        if self.selected != selected {
            self.selected = selected;
            self.events.push(EditorEvent::SelectionChanged(selected));
        }
    }

    fn ensure_idle(&self) -> EditResult<()> {
        if self.resizing {
            return Err(EditError::ResizeInProgress);
        }
        match self.drag {
            Some(drag) => Err(EditError::DragInProgress(drag.band)),
            None => Ok(()),
        }
    }

    fn renderable_context(&self) -> EditResult<RenderContext> {
        let ctx = self.context();
        if ctx.is_renderable() {
            Ok(ctx)
        } else {
            Err(EditError::DegenerateViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

fn ensure_captured(bands: &BandCollection, drag: &DragState) -> EditResult<()> {
    let band = bands.get(drag.band).ok_or(EditError::BandNotFound(drag.band))?;
    if band.frequency.keyframe(drag.frequency.id()).is_none() {
        return Err(keyframe_not_found(drag, drag.frequency));
    }
    if band.gain.keyframe(drag.gain.id()).is_none() {
        return Err(keyframe_not_found(drag, drag.gain));
    }
    Ok(())
}

fn keyframe_not_found(drag: &DragState, selection: KeyframeSelection) -> EditError {
    EditError::KeyframeNotFound {
        band: drag.band,
        keyframe: selection.id(),
    }
}

/// Band with the lowest first-keyframe frequency, earliest in collection order on ties
pub fn default_selection(bands: &BandCollection) -> Option<BandId> {
    let mut best: Option<(BandId, f64)> = None;
    for (id, band) in bands.iter() {
        let freq = band.frequency.first_keyframe().value();
        if best.map_or(true, |(_, lowest)| freq < lowest) {
            best = Some((id, freq));
        }
    }
    best.map(|(id, _)| id)
}
