//! Time-based eased transitions and the gauge state they drive.
//!
//! Every change of the clamped value restarts three transitions (readout,
//! sweep, readout color) from wherever they currently are, so a burst of
//! inputs never makes the dial jump.

use std::time::Duration;

use tracing::debug;

use crate::clamp::{clamp_value, percentage, sweep_angle};
use crate::config::{muted_text_color, Color, GaugeConfig};

// ============================================================================
// EASING
// ============================================================================

/// Easing curves applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// Material "standard" curve, cubic bezier (0.4, 0.0, 0.2, 1.0).
    #[default]
    FastOutSlowIn,
    /// Cubic bezier (0.0, 0.0, 0.2, 1.0).
    LinearOutSlowIn,
    /// Arbitrary CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Maps `t` in `[0, 1]` (clamped) to eased progress. Endpoints are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solves x(s) = t for the curve parameter, then evaluates y(s).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let mut s = t;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - t;
        if err.abs() < 1e-6 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; bisect instead.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = t;
    for _ in 0..32 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

// ============================================================================
// INTERPOLATION
// ============================================================================

pub trait Interpolate: Copy + PartialEq {
    fn interpolate(from: Self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Interpolate for Color {
    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| f32::interpolate(a as f32, b as f32, t).round() as u8;
        Color::rgba(
            channel(from.r, to.r),
            channel(from.g, to.g),
            channel(from.b, to.b),
            channel(from.a, to.a),
        )
    }
}

/// A restartable transition toward a target over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// A settled transition resting at `value`.
    pub fn new(value: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    pub fn value(&self) -> T {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to;
        }
        T::interpolate(self.from, self.to, self.easing.apply(progress))
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Restarts from the current interpolated value. A no-op for an unchanged target.
    pub fn retarget(&mut self, to: T) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

// ============================================================================
// GAUGE STATE
// ============================================================================

/// What the drawing routine sees for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeState {
    /// Value as supplied by the caller, possibly out of range.
    pub current_value: i32,
    /// `current_value` clamped into `[0, max_value]`.
    pub clamped_value: i32,
    pub max_value: i32,
    /// Eased value before truncation.
    pub animated_value: f32,
    /// Integer readout shown in the label stack and used for label highlighting.
    pub displayed_value: i32,
    /// Degrees of progress arc, before any style pad.
    pub sweep_angle: f32,
    pub big_text_color: Color,
}

/// Owns the transitions behind a gauge and advances them frame by frame.
#[derive(Debug, Clone)]
pub struct GaugeAnimator {
    max_value: i32,
    total_sweep: f32,
    current_value: i32,
    clamped_value: i32,
    big_text_color: Color,
    value: Tween<f32>,
    sweep: Tween<f32>,
    color: Tween<Color>,
}

impl GaugeAnimator {
    /// Starts from an empty dial and eases toward the configured value.
    /// `config` must already be validated.
    pub fn new(config: &GaugeConfig) -> Self {
        let (duration, easing) = (config.animation_duration, config.easing);
        let mut animator = Self {
            max_value: config.max_value(),
            total_sweep: config.style.total_sweep(),
            current_value: 0,
            clamped_value: 0,
            big_text_color: config.big_text_color,
            value: Tween::new(0.0, duration, easing),
            sweep: Tween::new(0.0, duration, easing),
            color: Tween::new(muted_text_color(), duration, easing),
        };
        animator.set_value(config.indicator_value);
        animator
    }

    pub fn set_value(&mut self, raw: i32) {
        self.current_value = raw;
        let clamped = clamp_value(raw, self.max_value);
        if clamped != self.clamped_value {
            debug!(
                raw,
                clamped,
                percent = percentage(clamped as f32, self.max_value),
                from = self.value.value(),
                "retargeting gauge"
            );
        }
        self.clamped_value = clamped;

        self.value.retarget(clamped as f32);
        self.sweep
            .retarget(sweep_angle(clamped as f32, self.max_value, self.total_sweep));
        self.color.retarget(if clamped == 0 {
            muted_text_color()
        } else {
            self.big_text_color
        });
    }

    pub fn advance(&mut self, dt: Duration) {
        self.value.advance(dt);
        self.sweep.advance(dt);
        self.color.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        !(self.value.is_complete() && self.sweep.is_complete() && self.color.is_complete())
    }

    pub fn snapshot(&self) -> GaugeState {
        let animated_value = self.value.value();
        GaugeState {
            current_value: self.current_value,
            clamped_value: self.clamped_value,
            max_value: self.max_value,
            animated_value,
            // Truncation toward zero, so the settled readout is exact.
            displayed_value: animated_value as i32,
            sweep_angle: self.sweep.value(),
            big_text_color: self.color.value(),
        }
    }
}
