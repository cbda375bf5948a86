// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use rusttype::Font;
use tracing::trace;

use crate::config::Color;
use crate::raster::{self, Canvas};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `degrees` (clockwise, y down).
    pub fn polar(self, radius: f32, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// How the ends of an open stroke are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Ends exactly at the path end.
    Butt,
    /// Extends past the end by half the stroke width.
    Square,
    /// Half-disc of the stroke width at each end.
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Circular arc stroked along `radius`, the stroke centered on the path.
    Arc {
        center: Point,
        radius: f32,
        stroke_width: f32,
        start_angle: f32,
        sweep_angle: f32,
        cap: StrokeCap,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke_width: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Text centered on `position`.
    Text {
        position: Point,
        text: String,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    },
}

/// Ordered, back to front.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text commands in draw order, for callers that only care about labels.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Color)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
    }

    /// Rasterizes every command. Text is skipped when no font is loaded.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font<'static>>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    raster::fill_rect(canvas, *x, *y, *width, *height, *color);
                }
                DrawCommand::Arc {
                    center,
                    radius,
                    stroke_width,
                    start_angle,
                    sweep_angle,
                    cap,
                    color,
                } => {
                    raster::draw_arc(
                        canvas,
                        *center,
                        *radius,
                        *stroke_width,
                        *start_angle,
                        *sweep_angle,
                        *cap,
                        *color,
                    );
                }
                DrawCommand::Line {
                    from,
                    to,
                    stroke_width,
                    color,
                } => {
                    raster::draw_thick_line_aa(canvas, *from, *to, *stroke_width, *color);
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    raster::draw_circle(canvas, *center, *radius, *color);
                }
                DrawCommand::Text {
                    position,
                    text,
                    font_size,
                    weight,
                    color,
                } => match font {
                    Some(font) => {
                        raster::draw_text(canvas, *position, text, font, *font_size, *weight, *color)
                    }
                    None => trace!(text = text.as_str(), "no font loaded, skipping text"),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_follows_screen_angles() {
        let c = Point::new(10.0, 10.0);
        let right = c.polar(5.0, 0.0);
        let down = c.polar(5.0, 90.0);
        assert!((right.x - 15.0).abs() < 1e-4 && (right.y - 10.0).abs() < 1e-4);
        assert!((down.x - 10.0).abs() < 1e-4 && (down.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn texts_skips_shapes() {
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(Color::WHITE));
        scene.add_command(DrawCommand::Text {
            position: Point::new(0.0, 0.0),
            text: "42".to_string(),
            font_size: 12.0,
            weight: FontWeight::Normal,
            color: Color::RED,
        });
        let texts: Vec<_> = scene.texts().collect();
        assert_eq!(texts, vec![("42", Color::RED)]);
        assert_eq!(scene.len(), 2);
    }
}
