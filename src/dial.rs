//! The dial face, progress arc and pointer.
//!
//! All geometry is derived from the square drawing area of a [`GaugeLayout`].
//! Stroke widths and offsets that were tuned by eye on the original device are
//! kept as reference pixels and scaled with [`GaugeLayout::reference_px`].

use crate::animation::GaugeState;
use crate::config::{Color, DialStyle, GaugeConfig, PointerMode};
use crate::scene::{DrawCommand, FontWeight, Point, Scene, StrokeCap};
use crate::widget::{GaugeLayout, Rect};

// ============================================================================
// PALETTE
// ============================================================================

pub const ACCENT: Color = Color::from_argb(0xff63_d6d6);
pub const MINT: Color = Color::from_argb(0xff5c_e3a0);
pub const DEEP_GREEN: Color = Color::from_argb(0xff0c_2c1c);
pub const LABEL_MUTED: Color = Color::from_argb(0xffa2_a5b1);
pub const LABEL_HIGHLIGHT: Color = Color::WHITE;

// ============================================================================
// GEOMETRY
// ============================================================================

/// Start of the progress arc, its track and the outer ring, in degrees.
pub const ARC_START: f32 = 140.0;

/// A reference ring of the bezel: a scaled copy of the drawing square placed at
/// a hand-tuned offset (fractions of its own size) inside the area.
#[derive(Debug, Clone, Copy)]
struct Ring {
    scale: f32,
    offset: (f32, f32),
    start: f32,
    sweep: f32,
    width_dp: f32,
    cap: StrokeCap,
    color: Color,
}

/// Thin scale line just inside the tick labels.
const SCALE_RING: Ring = Ring {
    scale: 0.7,
    offset: (0.22, 0.22),
    start: 141.0,
    sweep: 259.0,
    width_dp: 1.03,
    cap: StrokeCap::Square,
    color: MINT,
};

/// Dark band under the scale ring.
const SHADOW_RING: Ring = Ring {
    scale: 0.665,
    offset: (0.258, 0.258),
    start: 142.0,
    sweep: 256.0,
    width_dp: 8.0,
    cap: StrokeCap::Square,
    color: DEEP_GREEN,
};

/// Outermost rim; drawn after the ticks so it trims their outer ends.
const OUTER_RING: Ring = Ring {
    scale: 1.0,
    offset: (0.0, 0.0),
    start: 140.0,
    sweep: 260.0,
    width_dp: 1.6,
    cap: StrokeCap::Round,
    color: ACCENT,
};

/// Heavy ring at the inner tick ends; drawn after the ticks to trim them.
const INNER_RING: Ring = Ring {
    scale: 0.92,
    offset: (0.045, 0.04),
    start: 141.0,
    sweep: 258.0,
    width_dp: 6.25,
    cap: StrokeCap::Square,
    color: MINT,
};

// Tick segments
const TICK_START: f32 = 150.0;
const TICK_SWEEP: f32 = 240.0;
const TICK_SEGMENTS: usize = 16;
const TICK_WIDTH_REF_PX: f32 = 6.5;
/// Added to the inner ring diameter so ticks start just under that ring.
const TICK_INNER_PAD_REF_PX: f32 = 13.0;

// Scale labels
const SCALE_LABELS: [i32; 11] = [0, 20, 40, 60, 80, 100, 120, 140, 160, 180, 200];
/// The tick sweep is split into this many label steps; labels past the last
/// step are not drawn.
const LABEL_SEGMENTS: usize = 8;
/// Label radius as a multiple of the scale ring radius.
const LABEL_RADIUS_FACTOR: f32 = 1.15;
const LABEL_BASELINE_SHIFT_REF_PX: f32 = 5.0;
const LABEL_FONT_SIZE: f32 = 14.0;

// Guides style
const GUIDE_LINES: usize = 5;
/// How far a guide line reaches in from the rim.
const GUIDE_LENGTH_REF_PX: f32 = 180.0;
const GUIDE_WIDTH_REF_PX: f32 = 4.0;

// Pointer
const POINTER_WIDTH_REF_PX: f32 = 8.0;
/// Vertical drop of the fixed anchor below the area's vertical center.
const POINTER_ANCHOR_DROP_REF_PX: f32 = 350.0;
const TIP_DOT_RADIUS_DP: f32 = 4.0;

// ============================================================================
// DIAL RENDERING
// ============================================================================

/// Appends the whole dial, back to front: track, face, progress arc, pointer,
/// tip highlight.
pub fn draw_dial(scene: &mut Scene, state: &GaugeState, config: &GaugeConfig, layout: &GaugeLayout) {
    add_track(scene, config, layout);
    match config.style {
        DialStyle::Bezel => add_bezel_face(scene, state, layout),
        DialStyle::Guides => add_guide_face(scene, layout),
    }
    let drawn_sweep = progress_sweep(config.style, state.sweep_angle);
    add_progress(scene, config, layout, drawn_sweep);
    add_pointer(scene, state, config.pointer_mode, layout, drawn_sweep);
    add_tip_highlight(scene, layout, drawn_sweep);
}

/// Sweep of the drawn progress arc: the style pad is only added to a non-empty arc.
pub fn progress_sweep(style: DialStyle, sweep_angle: f32) -> f32 {
    if sweep_angle > 0.0 {
        sweep_angle + style.sweep_pad()
    } else {
        sweep_angle
    }
}

/// Numeric scale labels that fit on the tick sweep, with their angles.
pub fn scale_labels() -> impl Iterator<Item = (i32, f32)> {
    let step = TICK_SWEEP / LABEL_SEGMENTS as f32;
    SCALE_LABELS
        .iter()
        .take(LABEL_SEGMENTS + 1)
        .enumerate()
        .map(move |(i, &value)| (value, TICK_START + i as f32 * step))
}

/// Highlighted once the readout has reached the label's value.
pub fn label_color(label_value: i32, displayed_value: i32) -> Color {
    if displayed_value >= label_value {
        LABEL_HIGHLIGHT
    } else {
        LABEL_MUTED
    }
}

fn add_ring(scene: &mut Scene, ring: &Ring, area: Rect, layout: &GaugeLayout) {
    let side = area.width * ring.scale;
    let top_left = Point::new(area.x + side * ring.offset.0, area.y + side * ring.offset.1);
    scene.add_command(DrawCommand::Arc {
        center: Point::new(top_left.x + side / 2.0, top_left.y + side / 2.0),
        radius: side / 2.0,
        stroke_width: layout.dp(ring.width_dp),
        start_angle: ring.start,
        sweep_angle: ring.sweep,
        cap: ring.cap,
        color: ring.color,
    });
}

fn add_track(scene: &mut Scene, config: &GaugeConfig, layout: &GaugeLayout) {
    let style = config.style;
    scene.add_command(DrawCommand::Arc {
        center: layout.progress.center(),
        radius: layout.progress.width / 2.0,
        stroke_width: layout.dp(config.background_indicator_stroke_width),
        start_angle: ARC_START,
        sweep_angle: style.total_sweep() + style.sweep_pad(),
        cap: style.progress_cap(),
        color: config.background_indicator_color,
    });
}

fn add_bezel_face(scene: &mut Scene, state: &GaugeState, layout: &GaugeLayout) {
    let area = layout.content;
    let size = area.width;
    let center = area.center();

    add_ring(scene, &SCALE_RING, area, layout);
    add_ring(scene, &SHADOW_RING, area, layout);

    // Two ticks per segment: one at its start, one at its end.
    let outer = size / 2.0;
    let inner = (size * INNER_RING.scale + layout.reference_px(TICK_INNER_PAD_REF_PX)) / 2.0;
    let per_segment = TICK_SWEEP / TICK_SEGMENTS as f32;
    let tick_width = layout.reference_px(TICK_WIDTH_REF_PX);
    for i in 0..TICK_SEGMENTS {
        let start = TICK_START + i as f32 * per_segment;
        let end = start + per_segment;
        let start_color = if i % 2 == 0 { ACCENT } else { Color::RED };
        for (angle, color) in [(start, start_color), (end, ACCENT)] {
            scene.add_command(DrawCommand::Line {
                from: center.polar(inner, angle),
                to: center.polar(outer, angle),
                stroke_width: tick_width,
                color,
            });
        }
    }

    let label_radius = size * SCALE_RING.scale / 2.0 * LABEL_RADIUS_FACTOR;
    let shift = layout.reference_px(LABEL_BASELINE_SHIFT_REF_PX);
    for (value, angle) in scale_labels() {
        let at = center.polar(label_radius, angle);
        scene.add_command(DrawCommand::Text {
            position: Point::new(at.x, at.y + shift),
            text: value.to_string(),
            font_size: layout.dp(LABEL_FONT_SIZE),
            weight: FontWeight::Bold,
            color: label_color(value, state.displayed_value),
        });
    }

    add_ring(scene, &OUTER_RING, area, layout);
    add_ring(scene, &INNER_RING, area, layout);
}

fn add_guide_face(scene: &mut Scene, layout: &GaugeLayout) {
    let area = layout.content;
    let center = area.center();
    add_ring(scene, &OUTER_RING, area, layout);

    let outer = area.width / 2.0;
    let inner = (outer - layout.reference_px(GUIDE_LENGTH_REF_PX)).max(0.0);
    let total = DialStyle::Guides.total_sweep();
    for i in 0..GUIDE_LINES {
        let angle = ARC_START + total * i as f32 / (GUIDE_LINES - 1) as f32;
        scene.add_command(DrawCommand::Line {
            from: center.polar(inner, angle),
            to: center.polar(outer, angle),
            stroke_width: layout.reference_px(GUIDE_WIDTH_REF_PX),
            color: ACCENT.with_alpha(0.5),
        });
    }
}

fn add_progress(scene: &mut Scene, config: &GaugeConfig, layout: &GaugeLayout, drawn_sweep: f32) {
    scene.add_command(DrawCommand::Arc {
        center: layout.progress.center(),
        radius: layout.progress.width / 2.0,
        stroke_width: layout.dp(config.foreground_indicator_stroke_width),
        start_angle: ARC_START,
        sweep_angle: drawn_sweep,
        cap: config.style.progress_cap(),
        color: config.foreground_indicator_color,
    });
}

/// Where the pointer line ends for the given mode.
pub fn pointer_end(mode: PointerMode, state: &GaugeState, layout: &GaugeLayout, drawn_sweep: f32) -> Point {
    let area = layout.content;
    let center = area.center();
    let radius = area.width / 2.0;
    match mode {
        PointerMode::ArcTip => center.polar(radius, ARC_START + drawn_sweep),
        PointerMode::DoubledSweep => center.polar(radius, ARC_START + 2.0 * state.sweep_angle),
        PointerMode::FixedAnchor => Point::new(
            area.x,
            area.y + area.height / 2.0 + layout.reference_px(POINTER_ANCHOR_DROP_REF_PX),
        ),
    }
}

fn add_pointer(scene: &mut Scene, state: &GaugeState, mode: PointerMode, layout: &GaugeLayout, drawn_sweep: f32) {
    scene.add_command(DrawCommand::Line {
        from: layout.content.center(),
        to: pointer_end(mode, state, layout, drawn_sweep),
        stroke_width: layout.reference_px(POINTER_WIDTH_REF_PX),
        color: ACCENT,
    });
}

fn add_tip_highlight(scene: &mut Scene, layout: &GaugeLayout, drawn_sweep: f32) {
    if drawn_sweep <= 0.0 {
        return;
    }
    scene.add_command(DrawCommand::Circle {
        center: layout
            .progress
            .center()
            .polar(layout.progress.width / 2.0, ARC_START + drawn_sweep),
        radius: layout.dp(TIP_DOT_RADIUS_DP),
        color: Color::WHITE.with_alpha(0.8),
    });
}
