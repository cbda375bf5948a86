//! Maps a raw indicator value onto the dial.
//!
//! `max` must be positive; [`GaugeConfig::validate`](crate::GaugeConfig::validate)
//! guarantees that before any of these are reached through a [`Gauge`](crate::Gauge).

/// Clamps `raw` into `[0, max]`.
pub fn clamp_value(raw: i32, max: i32) -> i32 {
    raw.clamp(0, max.max(0))
}

/// Share of the maximum in percent, `0.0..=100.0` for clamped input.
pub fn percentage(value: f32, max: i32) -> f32 {
    value / max as f32 * 100.0
}

/// Degrees of arc for `value` on a dial whose full scale spans `total_sweep`.
pub fn sweep_angle(value: f32, max: i32, total_sweep: f32) -> f32 {
    value / max as f32 * total_sweep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        assert_eq!(clamp_value(50, 160), 50);
        assert_eq!(clamp_value(160, 160), 160);
        assert_eq!(clamp_value(400, 160), 160);
        assert_eq!(clamp_value(-3, 160), 0);
    }

    #[test]
    fn sweep_matches_the_reference_case() {
        // 50 of 160 on a 240 degree dial
        let sweep = sweep_angle(50.0, 160, 240.0);
        assert!((sweep - 75.0).abs() < 1e-4);
        assert!((percentage(50.0, 160) - 31.25).abs() < 1e-4);
    }

    #[test]
    fn sweep_hits_the_endpoints() {
        assert_eq!(sweep_angle(0.0, 100, 260.0), 0.0);
        assert!((sweep_angle(100.0, 100, 260.0) - 260.0).abs() < 1e-4);
    }
}
