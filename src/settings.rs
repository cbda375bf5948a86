//! Optional TOML settings file for the demo host.
//!
//! ```toml
//! style = "bezel"
//! pointer = "arc-tip"
//! value = 50
//! max_value = 160
//! animation_ms = 1000
//!
//! [colors]
//! foreground = "#993BDE8D"
//!
//! [text]
//! suffix = "GB"
//! caption = "Remaining"
//! ```
//!
//! Every key is optional; missing keys keep the builder defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::{Color, DialStyle, GaugeConfig, PointerMode};
use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub style: Option<DialStyle>,
    pub pointer: Option<PointerMode>,
    pub value: Option<i32>,
    pub max_value: Option<i32>,
    pub canvas_size: Option<f32>,
    pub animation_ms: Option<u64>,
    pub font: Option<PathBuf>,
    pub title: Option<String>,
    pub colors: ColorSettings,
    pub strokes: StrokeSettings,
    pub text: TextSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorSettings {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub big_text: Option<String>,
    pub small_text: Option<String>,
    pub surface: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeSettings {
    pub background: Option<f32>,
    pub foreground: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextSettings {
    pub suffix: Option<String>,
    pub caption: Option<String>,
    pub big_size: Option<f32>,
    pub small_size: Option<f32>,
}

fn parse_color(text: Option<&String>) -> Result<Option<Color>> {
    text.map(|t| Color::parse_hex(t)).transpose()
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the gauge configuration. Colors are validated here; the
    /// remaining checks happen when the gauge is created.
    pub fn into_config(self) -> Result<GaugeConfig> {
        let background = parse_color(self.colors.background.as_ref())?;
        let foreground = parse_color(self.colors.foreground.as_ref())?;
        let big_text = parse_color(self.colors.big_text.as_ref())?;
        let small_text = parse_color(self.colors.small_text.as_ref())?;
        let surface = parse_color(self.colors.surface.as_ref())?;

        Ok(GaugeConfig::builder()
            .maybe_style(self.style)
            .maybe_pointer_mode(self.pointer)
            .maybe_indicator_value(self.value)
            .maybe_max_indicator_value(self.max_value)
            .maybe_canvas_size(self.canvas_size)
            .maybe_animation_duration(self.animation_ms.map(Duration::from_millis))
            .maybe_font_path(self.font)
            .maybe_title(self.title)
            .maybe_background_indicator_color(background)
            .maybe_foreground_indicator_color(foreground)
            .maybe_big_text_color(big_text)
            .maybe_small_text_color(small_text)
            .maybe_surface_color(surface)
            .maybe_background_indicator_stroke_width(self.strokes.background)
            .maybe_foreground_indicator_stroke_width(self.strokes.foreground)
            .maybe_big_text_suffix(self.text.suffix)
            .maybe_small_text(self.text.caption)
            .maybe_big_text_font_size(self.text.big_size)
            .maybe_small_text_font_size(self.text.small_size)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = Settings::parse("").unwrap().into_config().unwrap();
        assert_eq!(config.max_value(), 160);
        assert_eq!(config.small_text, "Remaining");
    }

    #[test]
    fn reads_every_section() {
        let config = Settings::parse(
            r##"
            style = "guides"
            pointer = "doubled-sweep"
            value = 30
            animation_ms = 250

            [colors]
            foreground = "#ff0000"

            [strokes]
            foreground = 12.5

            [text]
            suffix = "L"
            caption = "Fuel"
            "##,
        )
        .unwrap()
        .into_config()
        .unwrap();

        assert_eq!(config.style, DialStyle::Guides);
        assert_eq!(config.pointer_mode, PointerMode::DoubledSweep);
        assert_eq!(config.max_value(), 100);
        assert_eq!(config.indicator_value, 30);
        assert_eq!(config.animation_duration, Duration::from_millis(250));
        assert_eq!(config.foreground_indicator_color, Color::RED);
        assert_eq!(config.foreground_indicator_stroke_width, 12.5);
        assert_eq!(config.big_text_suffix, "L");
        assert_eq!(config.small_text, "Fuel");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(Settings::parse("colour = 1"), Err(GaugeError::Settings(_))));
    }

    #[test]
    fn bad_colors_are_reported() {
        let settings = Settings::parse("[colors]\nsurface = \"navy\"").unwrap();
        assert!(matches!(settings.into_config(), Err(GaugeError::Color(c)) if c == "navy"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.toml");
        std::fs::write(&path, "max_value = 64\n").unwrap();
        let config = Settings::load(&path).unwrap().into_config().unwrap();
        assert_eq!(config.max_value(), 64);
    }
}
