//! Integration tests for storage-gauge.
//!
//! Frames are composed and rasterized into in-memory buffers; no window is opened.

use std::time::Duration;

use storage_gauge::config::{muted_text_color, SURFACE};
use storage_gauge::dial::{LABEL_HIGHLIGHT, LABEL_MUTED};
use storage_gauge::{Canvas, DialStyle, Gauge, GaugeCommand, GaugeConfig, GaugeError, Settings};

const WIDTH: usize = 300;
const HEIGHT: usize = 356;

fn settled(config: GaugeConfig) -> Gauge {
    let mut gauge = Gauge::new(config).expect("valid config");
    gauge.advance(Duration::from_secs(5));
    gauge
}

fn render(gauge: &Gauge) -> Vec<u8> {
    let mut frame = vec![0u8; WIDTH * HEIGHT * 4];
    let mut canvas = Canvas::new(&mut frame, WIDTH, HEIGHT);
    gauge.render(&mut canvas, 1.0, None);
    frame
}

fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
    let idx = (y * WIDTH + x) * 4;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

fn text_color(gauge: &Gauge, label: &str) -> storage_gauge::Color {
    let scene = gauge.scene(WIDTH, HEIGHT, 1.0);
    let found = scene.texts().find(|(text, _)| *text == label).map(|(_, color)| color);
    found.expect("label present")
}

// =============================================================================
// Readout
// =============================================================================

#[test]
fn test_fifty_of_one_sixty() {
    let gauge = settled(
        GaugeConfig::builder()
            .indicator_value(50)
            .max_indicator_value(160)
            .build(),
    );
    let state = gauge.snapshot();
    assert_eq!(state.displayed_value, 50);
    assert!((state.sweep_angle - 75.0).abs() < 1e-4);

    let scene = gauge.scene(WIDTH, HEIGHT, 1.0);
    assert!(scene.texts().any(|(text, _)| text == "50 GB"));
}

#[test]
fn test_out_of_range_values_are_clamped_for_drawing() {
    let mut gauge = settled(GaugeConfig::default());
    gauge.set_value(500);
    gauge.advance(Duration::from_secs(5));
    let state = gauge.snapshot();
    assert_eq!(state.current_value, 500);
    assert_eq!(state.displayed_value, 160);
    assert_eq!(state.sweep_angle, 240.0);

    gauge.set_value(-3);
    gauge.advance(Duration::from_secs(5));
    assert_eq!(gauge.snapshot().displayed_value, 0);
    assert_eq!(gauge.snapshot().sweep_angle, 0.0);
}

#[test]
fn test_zero_fades_the_readout() {
    let mut gauge = settled(GaugeConfig::builder().indicator_value(80).build());
    assert_eq!(text_color(&gauge, "80 GB"), gauge.config().big_text_color);

    gauge.apply(GaugeCommand::SetValue(0));
    gauge.advance(Duration::from_millis(400));
    let fading = gauge.snapshot().big_text_color;
    assert_ne!(fading, gauge.config().big_text_color);
    assert_ne!(fading, muted_text_color());

    gauge.advance(Duration::from_secs(1));
    assert_eq!(text_color(&gauge, "0 GB"), muted_text_color());
}

// =============================================================================
// Scale labels
// =============================================================================

#[test]
fn test_label_highlight_follows_readout() {
    let below = settled(GaugeConfig::builder().indicator_value(99).build());
    assert_eq!(text_color(&below, "100"), LABEL_MUTED);
    assert_eq!(text_color(&below, "80"), LABEL_HIGHLIGHT);

    let at = settled(GaugeConfig::builder().indicator_value(100).build());
    assert_eq!(text_color(&at, "100"), LABEL_HIGHLIGHT);
    assert_eq!(text_color(&at, "120"), LABEL_MUTED);
}

#[test]
fn test_guides_style_has_no_scale_labels() {
    let gauge = settled(GaugeConfig::builder().style(DialStyle::Guides).indicator_value(100).build());
    let texts: Vec<_> = gauge.scene(WIDTH, HEIGHT, 1.0).texts().map(|(t, _)| t.to_string()).collect();
    assert_eq!(texts, ["Remaining", "100 GB", "Value: 100_"]);
    assert_eq!(gauge.snapshot().sweep_angle, 260.0);
}

// =============================================================================
// Rasterization
// =============================================================================

#[test]
fn test_renders_without_a_font() {
    let gauge = settled(GaugeConfig::default());
    let frame = render(&gauge);
    assert_eq!(pixel(&frame, 2, 2), [SURFACE.r, SURFACE.g, SURFACE.b, 0xff]);
    // Editor strip under the square
    assert_ne!(pixel(&frame, 2, 340), [SURFACE.r, SURFACE.g, SURFACE.b, 0xff]);
}

#[test]
fn test_progress_arc_fills_the_top_of_the_dial() {
    let empty = render(&settled(GaugeConfig::default()));
    let full = render(&settled(GaugeConfig::builder().indicator_value(160).build()));

    // Mid-stroke at 270 degrees, straight above the center
    let (x, y) = (150, 33);
    assert!(pixel(&empty, x, y)[1] < 60);
    assert!(pixel(&full, x, y)[1] > 120);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_max_from_settings_is_rejected() {
    let config = Settings::parse("max_value = -1").unwrap().into_config().unwrap();
    assert!(matches!(Gauge::new(config), Err(GaugeError::InvalidMaxValue(-1))));
}
