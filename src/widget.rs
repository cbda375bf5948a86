//! Widget composition: where the dial, the label stack and the value editor go
//! inside the frame, and the per-frame scene that puts them together.

use crate::animation::GaugeState;
use crate::config::{Color, GaugeConfig};
use crate::dial;
use crate::scene::{DrawCommand, FontWeight, Point, Scene};

/// Pixels per dp of the device the dial geometry was tuned on.
pub const REFERENCE_DENSITY: f32 = 2.75;

/// Height of the value editor strip under the dial, in dp.
pub const EDITOR_HEIGHT: f32 = 56.0;
const EDITOR_FONT_SIZE: f32 = 18.0;
const EDITOR_BACKGROUND: Color = Color::from_argb(0xff1c_1b1f);

/// Line height as a multiple of font size for the label stack.
const LINE_HEIGHT: f32 = 1.3;

/// The drawing area is shrunk by this factor for the progress arc and its track.
const PROGRESS_SHRINK: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn inset(&self, by: f32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            (self.width - 2.0 * by).max(0.0),
            (self.height - 2.0 * by).max(0.0),
        )
    }

    /// Same center, both sides divided by `factor`.
    pub fn shrunk(&self, factor: f32) -> Rect {
        let (w, h) = (self.width / factor, self.height / factor);
        let c = self.center();
        Rect::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }
}

/// Frame layout in physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeLayout {
    pub density: f32,
    /// The square gauge surface.
    pub surface: Rect,
    /// Surface minus padding; the dial is drawn relative to this square.
    pub content: Rect,
    /// Bounding square of the progress arc.
    pub progress: Rect,
    pub caption_center: Point,
    pub readout_center: Point,
    /// Present when the frame is tall enough to fit it under the surface.
    pub editor: Option<Rect>,
}

impl GaugeLayout {
    pub fn compute(config: &GaugeConfig, width: usize, height: usize, density: f32) -> Self {
        let (width, height) = (width as f32, height as f32);
        let side = (config.canvas_size * density).min(width).min(height);
        let surface = Rect::new((width - side) / 2.0, 0.0, side, side);
        let content = surface.inset(config.padding * density);
        let progress = content.shrunk(PROGRESS_SHRINK);

        // Caption above readout, the pair centered vertically in the content.
        let caption_h = config.small_text_font_size * density * LINE_HEIGHT;
        let readout_h = config.big_text_font_size * density * LINE_HEIGHT;
        let center = content.center();
        let top = center.y - (caption_h + readout_h) / 2.0;
        let caption_center = Point::new(center.x, top + caption_h / 2.0);
        let readout_center = Point::new(center.x, top + caption_h + readout_h / 2.0);

        let editor_h = EDITOR_HEIGHT * density;
        let editor = (height - side >= editor_h).then(|| Rect::new(surface.x, side, side, editor_h));

        Self {
            density,
            surface,
            content,
            progress,
            caption_center,
            readout_center,
            editor,
        }
    }

    /// Logical window size that fits the surface and the editor strip.
    pub fn window_size(config: &GaugeConfig) -> (f64, f64) {
        let side = config.canvas_size as f64;
        (side, side + EDITOR_HEIGHT as f64)
    }

    pub fn dp(&self, value: f32) -> f32 {
        value * self.density
    }

    /// Converts a length tuned in pixels on the reference device.
    pub fn reference_px(&self, px: f32) -> f32 {
        px * self.density / REFERENCE_DENSITY
    }
}

/// Big readout text: the number followed by the unit suffix.
pub fn readout_text(value: i32, suffix: &str) -> String {
    if suffix.is_empty() {
        value.to_string()
    } else {
        format!("{value} {suffix}")
    }
}

/// Builds one frame: surface, dial, label stack and, when there is room, the
/// value editor showing `editing`.
pub fn compose_scene(state: &GaugeState, config: &GaugeConfig, layout: &GaugeLayout, editing: Option<&str>) -> Scene {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(Color::new(0x00, 0x00, 0x00)));
    let surface = layout.surface;
    scene.add_command(DrawCommand::FillRect {
        x: surface.x,
        y: surface.y,
        width: surface.width,
        height: surface.height,
        color: config.surface_color,
    });

    dial::draw_dial(&mut scene, state, config, layout);

    scene.add_command(DrawCommand::Text {
        position: layout.caption_center,
        text: config.small_text.clone(),
        font_size: layout.dp(config.small_text_font_size),
        weight: FontWeight::Normal,
        color: config.small_text_color,
    });
    scene.add_command(DrawCommand::Text {
        position: layout.readout_center,
        text: readout_text(state.displayed_value, &config.big_text_suffix),
        font_size: layout.dp(config.big_text_font_size),
        weight: FontWeight::Bold,
        color: state.big_text_color,
    });

    if let (Some(strip), Some(text)) = (layout.editor, editing) {
        scene.add_command(DrawCommand::FillRect {
            x: strip.x,
            y: strip.y,
            width: strip.width,
            height: strip.height,
            color: EDITOR_BACKGROUND,
        });
        scene.add_command(DrawCommand::Text {
            position: strip.center(),
            text: format!("Value: {text}_"),
            font_size: layout.dp(EDITOR_FONT_SIZE),
            weight: FontWeight::Normal,
            color: config.big_text_color,
        });
    }

    scene
}
