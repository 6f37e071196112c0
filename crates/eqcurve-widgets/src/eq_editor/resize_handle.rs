//! Drag handle below the plot that changes the editor height

use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Point, Rectangle, Theme};

use super::message::EqEditorMessage;
use crate::theme::{RESIZE_GRIP_COLOR, RESIZE_HANDLE_COLOR};

/// Canvas state for the handle: last cursor y while held
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeInteraction {
    pub last_y: Option<f32>,
}

/// Canvas program for the editor-height handle
pub struct ResizeHandle;

impl ResizeHandle {
    fn route(
        &self,
        interaction: &mut ResizeInteraction,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<(EqEditorMessage, bool)> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if interaction.last_y.is_some() || !cursor.is_over(bounds) {
                    return None;
                }
                interaction.last_y = cursor.position().map(|p| p.y);
                Some((EqEditorMessage::ResizeStarted, true))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let last = interaction.last_y?;
                let dy = position.y - last;
                if dy == 0.0 {
                    return None;
                }
                interaction.last_y = Some(position.y);
                Some((EqEditorMessage::ResizeMoved { dy: f64::from(dy) }, false))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                interaction.last_y.take()?;
                Some((EqEditorMessage::ResizeReleased, false))
            }
            _ => None,
        }
    }
}

impl Program<EqEditorMessage> for ResizeHandle {
    type State = ResizeInteraction;

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
        if interaction.last_y.is_some() || cursor.is_over(bounds) {
            mouse::Interaction::ResizingVertically
        } else {
            mouse::Interaction::default()
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
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), RESIZE_HANDLE_COLOR);

        // Grip
        let center = frame.center();
        let grip = Stroke::default().with_color(RESIZE_GRIP_COLOR).with_width(1.0);
        for offset in [-2.0, 2.0] {
            let y = center.y + offset;
            frame.stroke(
                &Path::line(Point::new(center.x - 16.0, y), Point::new(center.x + 16.0, y)),
                grip,
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(0.0, 200.0), Size::new(800.0, 8.0))
    }

    #[test]
    fn test_handle_gesture() {
        let mut interaction = ResizeInteraction::default();
        let on_handle = mouse::Cursor::Available(Point::new(400.0, 204.0));
        let press = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let release = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(400.0, 240.0),
        });

        assert_eq!(ResizeHandle.route(&mut interaction, &moved, bounds(), on_handle), None);
        assert_eq!(
            ResizeHandle.route(&mut interaction, &press, bounds(), on_handle),
            Some((EqEditorMessage::ResizeStarted, true))
        );
        assert_eq!(
            ResizeHandle.route(&mut interaction, &moved, bounds(), on_handle),
            Some((EqEditorMessage::ResizeMoved { dy: 36.0 }, false))
        );
        assert_eq!(
            ResizeHandle.route(&mut interaction, &release, bounds(), on_handle),
            Some((EqEditorMessage::ResizeReleased, false))
        );
        assert_eq!(ResizeHandle.route(&mut interaction, &release, bounds(), on_handle), None);
    }

    #[test]
    fn test_press_outside_handle_is_ignored() {
        let mut interaction = ResizeInteraction::default();
        let press = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let elsewhere = mouse::Cursor::Available(Point::new(400.0, 100.0));

        assert_eq!(ResizeHandle.route(&mut interaction, &press, bounds(), elsewhere), None);
        assert_eq!(interaction.last_y, None);
    }
}
