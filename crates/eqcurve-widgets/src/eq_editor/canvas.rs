//! Canvas Program for the EQ curve plot
//!
//! Paints the session's [`Scene`] and turns mouse input into
//! [`EqEditorMessage`]s:
//!
//! - left press on a thumb starts a drag, moves send deltas, release ends it
//! - right press on a thumb deletes that band
//! - right press on empty plot area adds a band there

use eqcurve_core::curve::PathSegment;
use eqcurve_core::grid::GridLine;
use eqcurve_core::{BandId, CurvePath, Scene, Thumb};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Point, Rectangle, Size, Theme};

use super::message::EqEditorMessage;
use super::state::EqEditorState;
use crate::theme::{
    BACKGROUND_COLOR, CURVE_COLOR, CURVE_WIDTH, GRID_COLOR, GRID_LABEL_COLOR, GRID_LABEL_SIZE,
    LOW_QUALITY_STEPS, THUMB_BORDER_COLOR, THUMB_COLOR, THUMB_DISABLED_COLOR,
    THUMB_SELECTED_COLOR, TIMELINE_COLOR, ZERO_LINE_COLOR,
};

/// Canvas state for tracking thumb drags
#[derive(Debug, Clone, Copy, Default)]
pub struct EqCanvasInteraction {
    /// Band whose thumb is held down
    pub dragging: Option<BandId>,
    /// Cursor position of the previous drag event (window coordinates)
    pub last_position: Option<Point>,
}

/// Canvas program drawing the EQ plot of one editor
pub struct EqCurveCanvas<'a> {
    pub state: &'a EqEditorState,
}

fn to_iced(point: eqcurve_core::Point) -> Point {
    Point::new(point.x as f32, point.y as f32)
}

fn to_core(point: Point) -> eqcurve_core::Point {
    eqcurve_core::Point::new(f64::from(point.x), f64::from(point.y))
}

impl<'a> EqCurveCanvas<'a> {
    fn scene(&self) -> &Scene {
        self.state.session.scene()
    }

    fn needs_resize(&self, bounds: Rectangle) -> bool {
        let (width, height) = self.state.session.size();
        (f64::from(bounds.width) - width).abs() > 0.5 || (f64::from(bounds.height) - height).abs() > 0.5
    }

    /// Message for an input event, and whether the event is captured
    ///
    /// An active drag sees its events before a pending resize, so the release
    /// that ends it is never swallowed.
    fn route(
        &self,
        interaction: &mut EqCanvasInteraction,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<(EqEditorMessage, bool)> {
        // Drags keep tracking outside the canvas until the button is released
        if let Some(band) = interaction.dragging {
            return match event {
                Event::Mouse(mouse::Event::CursorMoved { position }) => {
                    let last = interaction.last_position.unwrap_or(*position);
                    interaction.last_position = Some(*position);
                    let (dx, dy) = (position.x - last.x, position.y - last.y);
                    if dx == 0.0 && dy == 0.0 {
                        return None;
                    }
                    let message = EqEditorMessage::DragMoved {
                        dx: f64::from(dx),
                        dy: f64::from(dy),
                    };
                    Some((message, false))
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    log::debug!("route: Released band {}", band);
                    interaction.dragging = None;
                    interaction.last_position = None;
                    Some((EqEditorMessage::DragReleased, false))
                }
                _ => None,
            };
        }

        if self.needs_resize(bounds) {
            let message = EqEditorMessage::Resized {
                width: f64::from(bounds.width),
                height: f64::from(bounds.height),
            };
            return Some((message, false));
        }

        let position = cursor.position_in(bounds)?;
        let hit = self.scene().hit_test(to_core(position));
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let band = hit?;
                interaction.dragging = Some(band);
                interaction.last_position = cursor.position();
                Some((EqEditorMessage::DragStarted(band), true))
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                let message = match hit {
                    Some(band) => EqEditorMessage::DeletePoint(band),
                    None => EqEditorMessage::AddPoint {
                        x: f64::from(position.x),
                        y: f64::from(position.y),
                    },
                };
                Some((message, true))
            }
            _ => None,
        }
    }
}

impl<'a> Program<EqEditorMessage> for EqCurveCanvas<'a> {
    type State = EqCanvasInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<EqEditorMessage>> {
        let (message, capture) = self.route(interaction, event, bounds, cursor)?;
        let action = canvas::Action::publish(message);
        Some(if capture { action.and_capture() } else { action })
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.dragging.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.scene().hit_test(to_core(position)).is_some() => {
                mouse::Interaction::Grab
            }
            Some(_) => mouse::Interaction::Crosshair,
            None => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND_COLOR);

        let scene = self.scene();
        if scene.is_empty() {
            return vec![frame.into_geometry()];
        }

        draw_grid(&mut frame, scene, bounds.size());
        draw_curve(&mut frame, &scene.curve, self.state.config.high_quality);
        for thumb in &scene.thumbs {
            draw_thumb(&mut frame, thumb);
        }

        // Playback marker
        let x = scene.timeline_x as f32;
        frame.stroke(
            &Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
            Stroke::default().with_color(TIMELINE_COLOR).with_width(1.5),
        );

        vec![frame.into_geometry()]
    }
}

fn draw_grid(frame: &mut Frame, scene: &Scene, size: Size) {
    let grid_stroke = Stroke::default().with_color(GRID_COLOR).with_width(1.0);

    for line in &scene.grid.vertical {
        let x = line.position as f32;
        frame.stroke(&Path::line(Point::new(x, 0.0), Point::new(x, size.height)), grid_stroke);
        draw_label(frame, line, Point::new(x + 2.0, size.height - 2.0), Vertical::Bottom);
    }

    for line in &scene.grid.horizontal {
        let y = line.position as f32;
        frame.stroke(&Path::line(Point::new(0.0, y), Point::new(size.width, y)), grid_stroke);
        draw_label(frame, line, Point::new(2.0, y - 1.0), Vertical::Bottom);
    }

    if let Some(zero) = &scene.grid.zero_line {
        let y = zero.position as f32;
        frame.stroke(
            &Path::line(Point::new(0.0, y), Point::new(size.width, y)),
            Stroke::default().with_color(ZERO_LINE_COLOR).with_width(1.5),
        );
        draw_label(frame, zero, Point::new(2.0, y - 1.0), Vertical::Bottom);
    }
}

fn draw_label(frame: &mut Frame, line: &GridLine, position: Point, align_y: Vertical) {
    frame.fill_text(Text {
        content: line.label.clone(),
        position,
        size: GRID_LABEL_SIZE.into(),
        color: if line.emphasized { ZERO_LINE_COLOR } else { GRID_LABEL_COLOR },
        align_x: Horizontal::Left.into(),
        align_y: align_y.into(),
        ..Text::default()
    });
}

fn draw_curve(frame: &mut Frame, curve: &CurvePath, high_quality: bool) {
    let Some(start) = curve.start else {
        return;
    };

    let path = if high_quality {
        Path::new(|builder| {
            builder.move_to(to_iced(start));
            for segment in &curve.segments {
                match *segment {
                    PathSegment::Line { to } => builder.line_to(to_iced(to)),
                    PathSegment::Cubic { ctrl1, ctrl2, to } => {
                        builder.bezier_curve_to(to_iced(ctrl1), to_iced(ctrl2), to_iced(to))
                    }
                }
            }
        })
    } else {
        let points = curve.sample(LOW_QUALITY_STEPS);
        Path::new(|builder| {
            builder.move_to(to_iced(start));
            for point in points.iter().skip(1) {
                builder.line_to(to_iced(*point));
            }
        })
    };

    frame.stroke(
        &path,
        Stroke::default().with_color(CURVE_COLOR).with_width(CURVE_WIDTH),
    );
}

fn draw_thumb(frame: &mut Frame, thumb: &Thumb) {
    let top_left = to_iced(thumb.top_left());
    let size = Size::new(thumb.size as f32, thumb.size as f32);
    let fill = if thumb.selected {
        THUMB_SELECTED_COLOR
    } else if thumb.enabled {
        THUMB_COLOR
    } else {
        THUMB_DISABLED_COLOR
    };

    frame.fill_rectangle(top_left, size, fill);
    frame.stroke(
        &Path::rectangle(top_left, size),
        Stroke::default().with_color(THUMB_BORDER_COLOR).with_width(1.0),
    );
}
