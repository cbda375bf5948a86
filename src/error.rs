use std::path::PathBuf;

/// Everything that can go wrong while configuring or showing a gauge.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    #[error("max indicator value must be positive, got {0}")]
    InvalidMaxValue(i32),

    #[error("canvas size must be a positive finite length, got {0}")]
    InvalidCanvasSize(f32),

    #[error("max framerate must be a positive finite rate, got {0}")]
    InvalidFramerate(f64),

    #[error("font file {path} could not be parsed")]
    Font { path: PathBuf },

    #[error("font file {path} could not be read: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
    Color(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface: {0}")]
    Surface(#[from] pixels::Error),
}

pub type Result<T, E = GaugeError> = std::result::Result<T, E>;
