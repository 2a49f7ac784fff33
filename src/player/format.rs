use std::time::Duration;

/// `m:ss` with zero-padded seconds and unpadded minutes, e.g. `3:07`.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Position as a percentage of `total`, clamped to `[0, 100]`.
///
/// A zero `total` (nothing known about the track length yet) reads as 0.
pub fn progress_percent(position: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
}
