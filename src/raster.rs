// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================
//
// Software rasterizer for the display list: straight-alpha blending into an
// RGBA8 frame, one pass per primitive over its bounding box.

use std::path::Path;

use rusttype::{point, Font, PositionedGlyph, Scale};
use tracing::{debug, warn};

use crate::config::Color;
use crate::error::{GaugeError, Result};
use crate::scene::{FontWeight, Point, StrokeCap};

/// Tried in order when no font path is configured.
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// `frame` holds `width * height` RGBA8 pixels, row-major.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(frame.len(), width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Blends `color` over the pixel with `coverage` scaling its own alpha.
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = (coverage * color.alpha()).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, s) in src.iter().enumerate() {
            let d = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (s * a + d * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Inclusive pixel range covering `[lo, hi]`, clipped to the canvas.
    fn span(&self, lo: f32, hi: f32, limit: usize) -> std::ops::RangeInclusive<i32> {
        let lo = (lo.floor() as i32).max(0);
        let hi = (hi.ceil() as i32).min(limit as i32 - 1);
        lo..=hi
    }
}

pub fn fill_rect(canvas: &mut Canvas, x: f32, y: f32, width: f32, height: f32, color: Color) {
    let (w, h) = (canvas.width, canvas.height);
    for py in canvas.span(y, y + height - 1.0, h) {
        for px in canvas.span(x, x + width - 1.0, w) {
            canvas.blend(px, py, color, 1.0);
        }
    }
}

pub fn draw_thick_line_aa(canvas: &mut Canvas, from: Point, to: Point, thickness: f32, color: Color) {
    let reach = thickness / 2.0 + 1.0;
    let (w, h) = (canvas.width, canvas.height);
    let xs = canvas.span(from.x.min(to.x) - reach, from.x.max(to.x) + reach, w);
    let ys = canvas.span(from.y.min(to.y) - reach, from.y.max(to.y) + reach, h);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len_sq = dx * dx + dy * dy;
    for y in ys {
        for x in xs.clone() {
            let px = x as f32 + 0.5 - from.x;
            let py = y as f32 + 0.5 - from.y;
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = ((px - t * dx).powi(2) + (py - t * dy).powi(2)).sqrt();
            let aa = edge_coverage(dist, thickness / 2.0);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

pub fn draw_circle(canvas: &mut Canvas, center: Point, radius: f32, color: Color) {
    let (w, h) = (canvas.width, canvas.height);
    let xs = canvas.span(center.x - radius - 1.0, center.x + radius + 1.0, w);
    let ys = canvas.span(center.y - radius - 1.0, center.y + radius + 1.0, h);
    for y in ys {
        for x in xs.clone() {
            let dist = ((x as f32 + 0.5 - center.x).powi(2) + (y as f32 + 0.5 - center.y).powi(2)).sqrt();
            let aa = edge_coverage(dist, radius);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

/// Strokes a circular arc. Angles are degrees, clockwise from +x; a negative
/// sweep runs counter-clockwise from `start_angle`.
pub fn draw_arc(
    canvas: &mut Canvas,
    center: Point,
    radius: f32,
    stroke_width: f32,
    start_angle: f32,
    sweep_angle: f32,
    cap: StrokeCap,
    color: Color,
) {
    if sweep_angle == 0.0 || stroke_width <= 0.0 || radius <= 0.0 {
        return;
    }
    let (path_start, path_sweep) = if sweep_angle < 0.0 {
        (start_angle + sweep_angle, -sweep_angle)
    } else {
        (start_angle, sweep_angle)
    };
    let half = stroke_width / 2.0;

    let extend = match cap {
        StrokeCap::Square => (half / radius).to_degrees(),
        StrokeCap::Butt | StrokeCap::Round => 0.0,
    };
    let start = path_start - extend;
    let sweep = (path_sweep + 2.0 * extend).min(360.0);

    let ends = (cap == StrokeCap::Round).then(|| {
        [
            center.polar(radius, path_start),
            center.polar(radius, path_start + path_sweep),
        ]
    });

    // Body and round caps share one pass so overlapping pixels blend once.
    let reach = radius + half + 1.0;
    let (w, h) = (canvas.width, canvas.height);
    let xs = canvas.span(center.x - reach, center.x + reach, w);
    let ys = canvas.span(center.y - reach, center.y + reach, h);
    for y in ys {
        for x in xs.clone() {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            let dx = cx - center.x;
            let dy = cy - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let mut aa = edge_coverage((dist - radius).abs(), half);
            if aa > 0.0 {
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                let offset = (angle - start).rem_euclid(360.0);
                if sweep < 360.0 && offset > sweep {
                    aa = 0.0;
                }
            }
            if let Some(ends) = ends {
                for end in ends {
                    let d = ((cx - end.x).powi(2) + (cy - end.y).powi(2)).sqrt();
                    aa = aa.max(edge_coverage(d, half));
                }
            }
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

/// Coverage of a pixel whose center is `dist` from a shape's core, for a
/// shape extending `half` beyond it with a one pixel soft edge.
fn edge_coverage(dist: f32, half: f32) -> f32 {
    (1.0 - (dist - half + 0.5).clamp(0.0, 1.0)).clamp(0.0, 1.0)
}

fn layout_glyphs<'f>(text: &str, font: &'f Font<'static>, scale: Scale) -> Vec<PositionedGlyph<'f>> {
    let v_metrics = font.v_metrics(scale);
    font.layout(text, scale, point(0.0, v_metrics.ascent)).collect()
}

/// Pixel bounds `(min_x, max_x, min_y, max_y)` of laid out glyphs.
fn glyph_bounds(glyphs: &[PositionedGlyph]) -> Option<(i32, i32, i32, i32)> {
    glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc, bb| {
            let (min_x, max_x, min_y, max_y) = acc.unwrap_or((i32::MAX, i32::MIN, i32::MAX, i32::MIN));
            Some((
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            ))
        })
}

/// Draws `text` centered on `position`. Bold is faked with a one pixel
/// horizontal double strike.
pub fn draw_text(
    canvas: &mut Canvas,
    position: Point,
    text: &str,
    font: &Font<'static>,
    font_size: f32,
    weight: FontWeight,
    color: Color,
) {
    let glyphs = layout_glyphs(text, font, Scale::uniform(font_size));
    let Some((min_x, max_x, min_y, max_y)) = glyph_bounds(&glyphs) else {
        return;
    };
    let offset_x = position.x.round() as i32 - (max_x - min_x) / 2;
    let offset_y = position.y.round() as i32 - (max_y - min_y) / 2;
    let strikes: &[i32] = match weight {
        FontWeight::Normal => &[0],
        FontWeight::Bold => &[0, 1],
    };
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            for strike in strikes {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + strike + gx as i32 + bb.min.x - min_x;
                    let py = offset_y + gy as i32 + bb.min.y - min_y;
                    canvas.blend(px, py, color, v);
                });
            }
        }
    }
}

/// Loads the configured font, or the first system font found.
///
/// A configured path that cannot be read or parsed is an error; finding no
/// fallback is not, the gauge then renders without text.
pub fn load_font(path: Option<&Path>) -> Result<Option<Font<'static>>> {
    if let Some(path) = path {
        let bytes = std::fs::read(path).map_err(|source| GaugeError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| GaugeError::Font {
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), "loaded font");
        return Ok(Some(font));
    }

    for candidate in FALLBACK_FONT_PATHS {
        if let Ok(bytes) = std::fs::read(candidate) {
            if let Some(font) = Font::try_from_vec(bytes) {
                debug!(path = *candidate, "loaded fallback font");
                return Ok(Some(font));
            }
        }
    }
    warn!("no usable font found, labels will not be drawn; pass a font path to fix");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(size: usize) -> Vec<u8> {
        vec![0u8; size * size * 4]
    }

    #[test]
    fn clear_fills_opaque() {
        let mut frame = blank(4);
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.clear(Color::new(1, 2, 3));
        assert_eq!(canvas.pixel(3, 3), Some([1, 2, 3, 0xff]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn arc_only_covers_its_sweep() {
        let mut frame = blank(100);
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        // Lower half only: 0..180 degrees is the bottom with y pointing down.
        draw_arc(
            &mut canvas,
            Point::new(50.0, 50.0),
            40.0,
            6.0,
            0.0,
            180.0,
            StrokeCap::Butt,
            Color::WHITE,
        );
        assert_eq!(canvas.pixel(50, 90), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel(50, 9), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(50, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn negative_sweep_runs_counter_clockwise() {
        let mut frame = blank(100);
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        draw_arc(
            &mut canvas,
            Point::new(50.0, 50.0),
            40.0,
            6.0,
            0.0,
            -180.0,
            StrokeCap::Butt,
            Color::WHITE,
        );
        assert_eq!(canvas.pixel(50, 9).unwrap()[0], 0xff);
        assert_eq!(canvas.pixel(50, 90), Some([0, 0, 0, 0]));
    }

    #[test]
    fn round_caps_blend_once_with_the_body() {
        let mut frame = blank(100);
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        let color = Color::rgba(0xff, 0xff, 0xff, 0x99);
        draw_arc(
            &mut canvas,
            Point::new(50.0, 50.0),
            40.0,
            10.0,
            0.0,
            90.0,
            StrokeCap::Round,
            color,
        );
        let mid_arc = canvas.pixel(78, 78).unwrap();
        assert_eq!(mid_arc, [153, 153, 153, 0xff]);
        // Inside the body, a couple of degrees from the start cap.
        assert_eq!(canvas.pixel(89, 51).unwrap(), mid_arc);
        // Cap beyond the start of the sweep is drawn too.
        assert_eq!(canvas.pixel(89, 47).unwrap(), mid_arc);
    }

    #[test]
    fn translucent_colors_blend() {
        let mut frame = blank(10);
        let mut canvas = Canvas::new(&mut frame, 10, 10);
        fill_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0, Color::rgba(200, 100, 0, 128));
        let [r, g, b, a] = canvas.pixel(5, 5).unwrap();
        assert_eq!((r, g, b, a), (100, 50, 0, 0xff));
    }

    #[test]
    fn line_ignores_offscreen_endpoints() {
        let mut frame = blank(20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        draw_thick_line_aa(
            &mut canvas,
            Point::new(10.0, 10.0),
            Point::new(-500.0, 900.0),
            4.0,
            Color::WHITE,
        );
        assert_eq!(canvas.pixel(10, 10).unwrap()[0], 0xff);
    }

    #[test]
    fn missing_font_file_names_the_path() {
        let missing = Path::new("/definitely/not/a/font.ttf");
        let result = load_font(Some(missing));
        assert!(matches!(result, Err(GaugeError::FontRead { ref path, .. }) if path.as_path() == missing));
    }

    #[test]
    fn garbage_font_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(load_font(Some(&path)), Err(GaugeError::Font { .. })));
    }
}
