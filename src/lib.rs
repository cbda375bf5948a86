// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod clamp;
pub mod config;
pub mod dial;
pub mod error;
pub mod input;
pub mod raster;
pub mod scene;
pub mod settings;
pub mod widget;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use tracing::{debug, info, warn};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

pub use animation::{Easing, GaugeAnimator, GaugeState};
pub use config::{Color, DialStyle, GaugeConfig, PointerMode};
pub use error::{GaugeError, Result};
pub use input::{EditKey, ValueEditor};
pub use raster::Canvas;
pub use scene::Scene;
pub use settings::Settings;
pub use widget::GaugeLayout;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Updates a running gauge window accepts over its command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeCommand {
    SetValue(i32),
    /// Moves the current value by the given amount.
    Step(i32),
}

/// A storage gauge: configuration, animation state and the value editor.
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    animator: GaugeAnimator,
    editor: ValueEditor,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Result<Self> {
        config.validate()?;
        let animator = GaugeAnimator::new(&config);
        let editor = ValueEditor::new(config.indicator_value);
        Ok(Self {
            config,
            animator,
            editor,
        })
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Retargets the gauge; out-of-range values are clamped for drawing but
    /// kept as the current value. Text being typed in the editor is kept.
    pub fn set_value(&mut self, value: i32) {
        self.animator.set_value(value);
        self.editor.follow(value);
    }

    pub fn apply(&mut self, command: GaugeCommand) {
        debug!(?command, "applying command");
        match command {
            GaugeCommand::SetValue(value) => self.set_value(value),
            GaugeCommand::Step(delta) => {
                let current = self.animator.snapshot().current_value;
                self.set_value(current.saturating_add(delta));
            }
        }
    }

    /// Feeds one key to the value editor, committing to the gauge on Enter
    /// and the arrow keys.
    pub fn handle_key(&mut self, key: EditKey) {
        if let Some(value) = self.editor.handle(key) {
            self.animator.set_value(value);
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.animator.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn snapshot(&self) -> GaugeState {
        self.animator.snapshot()
    }

    pub fn editor(&self) -> &ValueEditor {
        &self.editor
    }

    /// Display list for a `width` x `height` pixel frame.
    pub fn scene(&self, width: usize, height: usize, density: f32) -> Scene {
        let layout = GaugeLayout::compute(&self.config, width, height, density);
        widget::compose_scene(&self.snapshot(), &self.config, &layout, Some(self.editor.text()))
    }

    /// Rasterizes the current frame. Text is skipped without a font.
    pub fn render(&self, canvas: &mut Canvas, density: f32, font: Option<&Font<'static>>) {
        let scene = self.scene(canvas.width(), canvas.height(), density);
        scene.render(canvas, font);
    }

    pub fn show(&mut self) -> Result<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(&mut self, receiver: Receiver<GaugeCommand>) -> Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(&mut self, receiver: Option<Receiver<GaugeCommand>>) -> Result<()> {
        let font = raster::load_font(self.config.font_path.as_deref())?;
        let (logical_width, logical_height) = GaugeLayout::window_size(&self.config);

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(logical_width, logical_height))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        info!(
            title = %self.config.title,
            width = fb_width,
            height = fb_height,
            scale = window.scale_factor(),
            "gauge window opened"
        );

        let target_fps = self.config.max_framerate;
        let frame_duration = Duration::from_secs_f64(1.0 / target_fps);
        let mut last_frame = Instant::now();
        let mut last_tick = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("gauge window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        match pixels.resize_buffer(new_size.width, new_size.height) {
                            Ok(()) => {
                                fb_width = new_size.width as usize;
                                fb_height = new_size.height as usize;
                            }
                            Err(err) => warn!(%err, "failed to resize frame buffer"),
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!(%err, "failed to resize surface");
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                        if let Some(key) = edit_key(&event.logical_key) {
                            self.handle_key(key);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(command) = receiver.try_recv() {
                                self.apply(command);
                            }
                        }

                        let now = Instant::now();
                        self.advance(now - last_tick);
                        last_tick = now;

                        let density = window_clone.scale_factor() as f32;
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        self.render(&mut canvas, density, font.as_ref());
                        if let Err(err) = pixels.render() {
                            warn!(%err, "failed to present frame");
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

fn edit_key(key: &Key) -> Option<EditKey> {
    match key {
        Key::Named(NamedKey::Enter) => Some(EditKey::Enter),
        Key::Named(NamedKey::Backspace) => Some(EditKey::Backspace),
        Key::Named(NamedKey::ArrowUp) => Some(EditKey::Up),
        Key::Named(NamedKey::ArrowDown) => Some(EditKey::Down),
        Key::Character(text) => text.chars().next().map(EditKey::Char),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_max() {
        let config = GaugeConfig::builder().max_indicator_value(0).build();
        assert!(matches!(Gauge::new(config), Err(GaugeError::InvalidMaxValue(0))));
    }

    #[test]
    fn commands_retarget_the_gauge() {
        let mut gauge = Gauge::new(GaugeConfig::default()).unwrap();
        gauge.apply(GaugeCommand::SetValue(40));
        gauge.apply(GaugeCommand::Step(-15));
        gauge.advance(Duration::from_secs(2));
        let state = gauge.snapshot();
        assert_eq!(state.current_value, 25);
        assert_eq!(state.displayed_value, 25);
        assert_eq!(gauge.editor().text(), "25");
    }

    #[test]
    fn keys_commit_through_the_editor() {
        let mut gauge = Gauge::new(GaugeConfig::default()).unwrap();
        for c in "90".chars() {
            gauge.handle_key(EditKey::Char(c));
        }
        assert_eq!(gauge.snapshot().current_value, 0);
        gauge.handle_key(EditKey::Enter);
        assert_eq!(gauge.snapshot().current_value, 90);
        gauge.handle_key(EditKey::Up);
        assert_eq!(gauge.snapshot().current_value, 100);
    }

    #[test]
    fn commands_keep_text_being_typed() {
        let mut gauge = Gauge::new(GaugeConfig::default()).unwrap();
        for c in "12".chars() {
            gauge.handle_key(EditKey::Char(c));
        }
        gauge.apply(GaugeCommand::SetValue(70));
        assert_eq!(gauge.editor().text(), "12");
        assert_eq!(gauge.snapshot().current_value, 70);

        gauge.handle_key(EditKey::Enter);
        assert_eq!(gauge.snapshot().current_value, 12);
        gauge.apply(GaugeCommand::Step(5));
        assert_eq!(gauge.editor().text(), "17");
    }

    #[test]
    fn maps_window_keys() {
        assert_eq!(edit_key(&Key::Named(NamedKey::Enter)), Some(EditKey::Enter));
        assert_eq!(edit_key(&Key::Character("7".into())), Some(EditKey::Char('7')));
        assert_eq!(edit_key(&Key::Named(NamedKey::Escape)), None);
    }
}
