//! End-to-end editor behavior: axis mapping, curve shape, labels and edit
//! brackets driven through the public API only.

use eqcurve_core::axis::CURVE_TOTAL_FRAMES;
use eqcurve_core::config::{load_config, save_config};
use eqcurve_core::{
    AxisMapper, Band, BandCollection, ChannelMode, EditError, EditSession, EditorConfig,
    EditorEvent, FilterShape, RenderContext,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn band(freq: f64, gain: f64, shape: FilterShape) -> Band {
    Band::new(true, shape, freq, gain, 1.0, ChannelMode::Stereo, "")
}

fn editor(bands: &mut BandCollection) -> EditSession {
    let mut session = EditSession::new(&EditorConfig::default());
    session.resize(bands, 1000.0, 400.0);
    session.attach(bands);
    session.take_events();
    session
}

fn assert_single_bracket(events: &[EditorEvent]) {
    let begins = events.iter().filter(|e| **e == EditorEvent::BeginEdit).count();
    let ends = events.iter().filter(|e| **e == EditorEvent::EndEdit).count();
    assert_eq!((begins, ends), (1, 1), "events: {events:?}");
    assert_eq!(events.first(), Some(&EditorEvent::BeginEdit));
    assert_eq!(events.last(), Some(&EditorEvent::EndEdit));
}

#[test]
fn test_axis_round_trip_over_full_range() {
    let axis = AxisMapper::new(1000.0, 400.0, 24.0);
    for i in 0..=200 {
        let freq = 20.0 * 1000f64.powf(i as f64 / 200.0);
        let back = axis.x_to_freq(axis.freq_to_x(freq));
        assert!(((back - freq) / freq).abs() < 1e-6);

        let gain = -24.0 + 48.0 * i as f64 / 200.0;
        let back = axis.y_to_gain(axis.gain_to_y(gain));
        assert!((back - gain).abs() < 1e-6);
    }
}

#[test]
fn test_curve_endpoint_policy() {
    let ctx = RenderContext::new(1000.0, 400.0);
    let mut bands = BandCollection::with_bands([
        band(100.0, 6.0, FilterShape::LowShelf),
        band(1000.0, 0.0, FilterShape::Peak),
        band(8000.0, -6.0, FilterShape::HighShelf),
    ]);
    let mut session = editor(&mut bands);

    let curve = &session.scene().curve;
    let first = curve.first_point().unwrap();
    let last = curve.last_point().unwrap();
    assert!((first.y - ctx.axis.gain_to_y(6.0)).abs() < 1e-9);
    assert!((last.y - ctx.axis.gain_to_y(-6.0)).abs() < 1e-9);

    // Turning the low shelf into a peak flattens the left edge
    let low = bands.ids()[0];
    bands.update(low, |b| b.shape = FilterShape::Peak);
    session.sync(&mut bands);
    let first = session.scene().curve.first_point().unwrap();
    assert!((first.y - ctx.axis.gain_to_y(0.0)).abs() < 1e-9);
}

#[test]
fn test_empty_collection_draws_flat_line() {
    let mut bands = BandCollection::new();
    let session = editor(&mut bands);
    let zero = session.context().axis.gain_to_y(0.0);

    let points = session.scene().curve.anchor_points();
    assert_eq!(points.len(), 2);
    assert_eq!((points[0].x, points[0].y), (0.0, zero));
    assert_eq!((points[1].x, points[1].y), (1000.0, zero));
    assert!(session.selected().is_none());
}

#[test]
fn test_band_labels_follow_frequency() {
    let mut bands = BandCollection::with_bands([
        band(500.0, 0.0, FilterShape::Peak),
        band(100.0, 0.0, FilterShape::Peak),
        band(2000.0, 0.0, FilterShape::Peak),
    ]);
    let mut session = editor(&mut bands);

    let label = |bands: &BandCollection, i: usize| bands.get(bands.ids()[i]).unwrap().label.clone();
    assert_eq!(label(&bands, 0), "Band 2");
    assert_eq!(label(&bands, 1), "Band 1");
    assert_eq!(label(&bands, 2), "Band 3");

    session.add_band_at(&mut bands, 0.0, 200.0).unwrap();
    assert_eq!(label(&bands, 3), "Band 1");
    assert_eq!(label(&bands, 1), "Band 2");
}

#[test]
fn test_drag_commit() {
    init_logging();
    let mut bands = BandCollection::with_bands([band(1000.0, 0.0, FilterShape::Peak)]);
    let id = bands.ids()[0];
    let mut session = editor(&mut bands);
    let axis = session.context().axis;
    let original_x = axis.freq_to_x(1000.0);

    session.drag_start(&mut bands, id).unwrap();
    session.drag_delta(&mut bands, 20.0, 0.0).unwrap();
    session.drag_delta(&mut bands, 30.0, 0.0).unwrap();
    session.drag_complete(&mut bands).unwrap();

    let band = bands.get(id).unwrap();
    assert_eq!(band.frequency.keyframe_count(), 1);
    let expected = axis.x_to_freq(original_x + 50.0);
    let actual = band.frequency_at(0, CURVE_TOTAL_FRAMES);
    assert!(((actual - expected) / expected).abs() < 1e-9);

    let events = session.take_events();
    assert_single_bracket(&events);
    let moves = events
        .iter()
        .filter(|e| matches!(e, EditorEvent::KeyframesMoved { .. }))
        .count();
    assert_eq!(moves, 2);
}

#[test]
fn test_drag_stops_at_viewport_edge() {
    let mut bands = BandCollection::with_bands([band(1000.0, 0.0, FilterShape::Peak)]);
    let id = bands.ids()[0];
    let mut session = editor(&mut bands);
    let axis = session.context().axis;

    session.drag_start(&mut bands, id).unwrap();
    session.drag_delta(&mut bands, 10_000.0, -10_000.0).unwrap();
    session.drag_complete(&mut bands).unwrap();

    // Thumb clamped to the top-right corner, value taken at its center
    let band = bands.get(id).unwrap();
    let half = session.thumb_size() / 2.0;
    assert!((band.frequency_at(0, 1) - axis.x_to_freq(1000.0 - half)).abs() < 1e-6);
    assert!((band.gain_at(0, 1) - axis.y_to_gain(half)).abs() < 1e-9);
}

#[test]
fn test_every_edit_is_bracketed() {
    let mut bands = BandCollection::default();
    let mut session = editor(&mut bands);

    let added = session.add_band_at(&mut bands, 700.0, 300.0).unwrap();
    assert_single_bracket(&session.take_events());

    session.drag_start(&mut bands, added).unwrap();
    session.drag_delta(&mut bands, -5.0, 5.0).unwrap();
    session.drag_complete(&mut bands).unwrap();
    assert_single_bracket(&session.take_events());

    session.remove_band(&mut bands, added).unwrap();
    assert_single_bracket(&session.take_events());

    assert_eq!(
        session.remove_band(&mut bands, added),
        Err(EditError::BandNotFound(added))
    );
    assert!(session.take_events().is_empty());
}

#[test]
fn test_host_changes_to_selected_band_refresh_next_turn() {
    let mut bands = BandCollection::default();
    let mut session = editor(&mut bands);
    let id = session.selected().unwrap();

    bands.update(id, |b| {
        b.gain.set_keyframe_value(b.gain.keyframes()[0].id(), 9.0);
    });
    session.sync(&mut bands);

    // Scene already reflects the change, the refresh notification waits
    let thumb = session.scene().thumb(id).unwrap();
    assert!((thumb.center.y - session.context().axis.gain_to_y(9.0)).abs() < 1e-9);
    assert!(session.take_events().is_empty());

    session.flush_deferred(&bands);
    assert_eq!(session.take_events(), vec![EditorEvent::ForceRefresh]);
}

#[test]
fn test_config_round_trip_and_clamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.yaml");

    let missing: EditorConfig = load_config(&path);
    assert_eq!(missing, EditorConfig::default());

    let config = EditorConfig {
        editor_height: 900.0,
        high_quality: true,
        ..EditorConfig::default()
    };
    save_config(&config, &path).unwrap();
    let loaded: EditorConfig = load_config(&path);
    assert_eq!(loaded, config);
    assert_eq!(loaded.validated_editor_height(), 600.0);

    let session = EditSession::new(&loaded);
    assert_eq!(session.size(), (0.0, 600.0));
}
