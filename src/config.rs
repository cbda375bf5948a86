use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;
use clap::ValueEnum;
use serde::Deserialize;

use crate::animation::Easing;
use crate::error::{GaugeError, Result};

// ============================================================================
// COLORS
// ============================================================================

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed `0xAARRGGBB`.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Parses `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional).
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        let bad = || GaugeError::Color(text.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
        match digits.len() {
            6 => Ok(Self::from_argb(0xff00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(bad()),
        }
    }
}

/// Text and stroke color used on top of the dark surface.
pub const ON_SURFACE: Color = Color::new(0xe6, 0xe1, 0xe5);

/// Background behind the dial.
pub const SURFACE: Color = Color::from_argb(0xff0a_0f23);

/// Color the readout fades to while the gauge sits at zero.
pub fn muted_text_color() -> Color {
    ON_SURFACE.with_alpha(0.3)
}

// ============================================================================
// STYLE SELECTION
// ============================================================================

/// Which dial face to draw. Both share the progress arc, pointer and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DialStyle {
    /// Nested bezel rings, 16 two-tone tick segments and numeric scale labels.
    #[default]
    Bezel,
    /// A single reference ring with plain radial guide lines.
    Guides,
}

impl DialStyle {
    pub const fn default_max_value(self) -> i32 {
        match self {
            DialStyle::Bezel => 160,
            DialStyle::Guides => 100,
        }
    }

    /// Degrees covered by the progress arc at full scale.
    pub const fn total_sweep(self) -> f32 {
        match self {
            DialStyle::Bezel => 240.0,
            DialStyle::Guides => 260.0,
        }
    }

    /// Extra degrees added to a non-empty progress arc so its tip overshoots.
    pub const fn sweep_pad(self) -> f32 {
        match self {
            DialStyle::Bezel => 10.0,
            DialStyle::Guides => 0.0,
        }
    }

    pub const fn progress_cap(self) -> crate::scene::StrokeCap {
        match self {
            DialStyle::Bezel => crate::scene::StrokeCap::Butt,
            DialStyle::Guides => crate::scene::StrokeCap::Round,
        }
    }
}

/// Where the pointer line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PointerMode {
    /// Points at the tip of the progress arc.
    #[default]
    ArcTip,
    /// Legacy guide-dial behaviour: rotated by twice the sweep from the start.
    DoubledSweep,
    /// Legacy bezel-dial behaviour: fixed endpoint below the left edge.
    FixedAnchor,
}

// ============================================================================
// GAUGE CONFIGURATION
// ============================================================================

/// Construction-time parameters. Lengths are in density-independent pixels,
/// font sizes in scaled pixels.
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(default = 300.0)]
    pub canvas_size: f32,
    #[builder(default = 0)]
    pub indicator_value: i32,
    /// Falls back to the style's default when unset.
    pub max_indicator_value: Option<i32>,

    #[builder(default)]
    pub style: DialStyle,
    #[builder(default)]
    pub pointer_mode: PointerMode,

    // Indicator arcs
    #[builder(default = ON_SURFACE.with_alpha(0.1))]
    pub background_indicator_color: Color,
    #[builder(default = 36.0)]
    pub background_indicator_stroke_width: f32,
    #[builder(default = Color::from_argb(0x993b_de8d))]
    pub foreground_indicator_color: Color,
    #[builder(default = 36.0)]
    pub foreground_indicator_stroke_width: f32,

    // Label stack
    #[builder(default = 32.0)]
    pub big_text_font_size: f32,
    #[builder(default = ON_SURFACE)]
    pub big_text_color: Color,
    #[builder(default = "GB".to_string(), into)]
    pub big_text_suffix: String,
    #[builder(default = "Remaining".to_string(), into)]
    pub small_text: String,
    #[builder(default = 24.0)]
    pub small_text_font_size: f32,
    #[builder(default = ON_SURFACE.with_alpha(0.3))]
    pub small_text_color: Color,

    // Surface
    #[builder(default = SURFACE)]
    pub surface_color: Color,
    #[builder(default = 4.0)]
    pub padding: f32,

    // Animation
    #[builder(default = Duration::from_millis(1000))]
    pub animation_duration: Duration,
    #[builder(default)]
    pub easing: Easing,

    // Window
    #[builder(default = "Storage".to_string(), into)]
    pub title: String,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(into)]
    pub font_path: Option<PathBuf>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GaugeConfig {
    pub fn max_value(&self) -> i32 {
        self.max_indicator_value
            .unwrap_or_else(|| self.style.default_max_value())
    }

    /// Rejects configurations the drawing routine cannot map to angles.
    pub fn validate(&self) -> Result<()> {
        let max = self.max_value();
        if max <= 0 {
            return Err(GaugeError::InvalidMaxValue(max));
        }
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(GaugeError::InvalidCanvasSize(self.canvas_size));
        }
        if !self.max_framerate.is_finite() || self.max_framerate <= 0.0 {
            return Err(GaugeError::InvalidFramerate(self.max_framerate));
        }
        Ok(())
    }
}
