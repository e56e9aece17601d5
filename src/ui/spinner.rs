/// Loading spinner
/// A 40px ring with a highlighted quarter arc, one turn per second
use std::f32::consts::{FRAC_PI_4, TAU};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use iced::widget::canvas::{self, path::Arc, Path, Stroke};
use iced::widget::{canvas as canvas_widget, container};
use iced::{mouse, Color, Element, Length, Radians, Rectangle, Renderer, Theme};

/// Outer diameter in logical pixels
pub const SIZE: f32 = 40.0;
/// Ring thickness
const BORDER: f32 = 4.0;
/// Time for one full revolution
const PERIOD: Duration = Duration::from_millis(1000);

/// Stateless spinner; the angle comes from the wall clock, so every redraw
/// while loading advances it
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner;

/// Rotation in radians after `elapsed`, wrapping every period
pub fn rotation_at(elapsed: Duration) -> f32 {
    let period = PERIOD.as_millis();
    (elapsed.as_millis() % period) as f32 / period as f32 * TAU
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = (SIZE - BORDER) / 2.0;

        // Track
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_color(Color::from_rgb8(0xee, 0xee, 0xee))
                .with_width(BORDER),
        );

        // Quarter arc centred on "up" before rotation
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let rotation = rotation_at(elapsed);
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(-3.0 * FRAC_PI_4 + rotation),
                end_angle: Radians(-FRAC_PI_4 + rotation),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(Color::from_rgb8(0x4f, 0x46, 0xe5))
                .with_width(BORDER),
        );

        vec![frame.into_geometry()]
    }
}

/// Centered spinner with vertical breathing room
pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    container(canvas_widget(Spinner).width(SIZE).height(SIZE))
        .center_x(Length::Fill)
        .padding([32, 0])
        .into()
}
