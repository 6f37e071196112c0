//! View function for the EQ curve editor

use iced::widget::{column, row, slider, text, toggler, Canvas};
use iced::{Alignment, Element, Length};

use eqcurve_core::axis::{CURVE_TOTAL_FRAMES, MAX_GAIN_RANGE_DB, MIN_GAIN_RANGE_DB};
use eqcurve_core::BandCollection;

use super::canvas::EqCurveCanvas;
use super::message::EqEditorMessage;
use super::resize_handle::ResizeHandle;
use super::state::EqEditorState;
use crate::theme::{GRID_LABEL_COLOR, RESIZE_HANDLE_HEIGHT};

/// Render the editor: the curve canvas, its resize handle, a readout of the
/// selected band and the time, zoom and quality controls
///
/// ```ignore
/// eq_editor(&self.eq_state, &self.bands).map(Message::EqEditor)
/// ```
pub fn eq_editor<'a>(
    state: &'a EqEditorState,
    bands: &BandCollection,
) -> Element<'a, EqEditorMessage> {
    let plot = Canvas::new(EqCurveCanvas { state })
        .width(Length::Fill)
        .height(Length::Fixed(state.editor_height()));
    let handle = Canvas::new(ResizeHandle)
        .width(Length::Fill)
        .height(Length::Fixed(RESIZE_HANDLE_HEIGHT));

    let session = &state.session;
    let readout = selected_readout(state, bands);
    let time_slider = slider(0.0..=1.0, session.time(), EqEditorMessage::SetTime).step(0.001);
    let zoom_slider = slider(
        MIN_GAIN_RANGE_DB..=MAX_GAIN_RANGE_DB,
        session.gain_range(),
        EqEditorMessage::SetZoom,
    )
    .step(1.0)
    .width(160);

    let controls = row![
        text("Time").size(12).color(GRID_LABEL_COLOR),
        time_slider,
        text(format!("±{:.0} dB", session.gain_range()))
            .size(12)
            .color(GRID_LABEL_COLOR),
        zoom_slider,
        text("HQ").size(12).color(GRID_LABEL_COLOR),
        toggler(state.config.high_quality).on_toggle(EqEditorMessage::SetHighQuality),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    column![
        column![plot, handle],
        text(readout).size(12).color(GRID_LABEL_COLOR),
        controls,
    ]
    .spacing(6)
    .into()
}

/// Summary line for the selected band at the playback position
fn selected_readout(state: &EqEditorState, bands: &BandCollection) -> String {
    let session = &state.session;
    session
        .selected()
        .and_then(|id| bands.get(id))
        .map(|band| band.readout(session.context().frame(), CURVE_TOTAL_FRAMES))
        .unwrap_or_default()
}
