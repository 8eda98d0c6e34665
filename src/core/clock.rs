//=========================================================================
// Clock & Progress Tracker
//=========================================================================
//
// Converts wall-clock milliseconds into the two timing signals scenes
// consume:
//
//   progress       = clamp((now - scene_start) / duration, 0, 1)
//   animation_time = (now mod 1000) / 1000
//
// Progress is advisory pacing for a scene (typewriter reveals, walk
// positions). It is capped at 1 and never wraps; playback never advances
// on its own when it saturates.
//
// Animation time is a phase value that repeats every second of wall
// clock regardless of scene boundaries.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== Constants ===========================================================

/// Default length of a scene's progress ramp, in milliseconds.
pub const SCENE_DURATION_MS: f64 = 5200.0;

/// Period of the repeating animation-time signal, in milliseconds.
pub const ANIMATION_PERIOD_MS: f64 = 1000.0;

//=== Timing Functions ====================================================

/// Returns the clamped progress of a scene that started at `scene_start`.
///
/// Non-finite inputs and non-positive durations saturate to `1.0` so a
/// misconfigured duration shows the scene fully revealed rather than
/// frozen at its first frame.
pub fn scene_progress(now: f64, scene_start: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 || !duration_ms.is_finite() {
        return 1.0;
    }

    let raw = (now - scene_start) / duration_ms;
    if raw.is_nan() {
        return 1.0;
    }

    raw.clamp(0.0, 1.0) as f32
}

/// Returns the repeating animation phase for `now`, in `[0, 1)`.
pub fn animation_time(now: f64) -> f32 {
    let phase = now.rem_euclid(ANIMATION_PERIOD_MS) / ANIMATION_PERIOD_MS;

    // rem_euclid can round up to the period itself for tiny negatives
    if phase >= 1.0 || !phase.is_finite() {
        0.0
    } else {
        phase as f32
    }
}

//=== MonotonicClock ======================================================

/// Wall clock used by the frame driver.
///
/// Reports milliseconds elapsed since construction as `f64`, the unit all
/// playback operations take their `now` argument in.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=== scene_progress ==================================================

    #[test]
    fn progress_starts_at_zero() {
        assert_eq!(scene_progress(1000.0, 1000.0, SCENE_DURATION_MS), 0.0);
    }

    #[test]
    fn progress_halfway() {
        let p = scene_progress(2600.0, 0.0, SCENE_DURATION_MS);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn progress_caps_at_one() {
        assert_eq!(scene_progress(60_000.0, 0.0, SCENE_DURATION_MS), 1.0);
    }

    #[test]
    fn progress_before_start_is_zero() {
        assert_eq!(scene_progress(100.0, 500.0, SCENE_DURATION_MS), 0.0);
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let start = 250.0;
        let mut previous = 0.0f32;

        for step in -100..800 {
            let now = step as f64 * 13.7;
            let p = scene_progress(now, start, SCENE_DURATION_MS);
            assert!((0.0..=1.0).contains(&p), "progress {} out of range", p);
            assert!(p >= previous, "progress decreased at now={}", now);
            previous = p;
        }
    }

    #[test]
    fn progress_degenerate_duration_saturates() {
        assert_eq!(scene_progress(0.0, 0.0, 0.0), 1.0);
        assert_eq!(scene_progress(0.0, 0.0, -5.0), 1.0);
        assert_eq!(scene_progress(0.0, 0.0, f64::NAN), 1.0);
    }

    #[test]
    fn skip_offset_reads_fully_revealed() {
        let now = 4321.0;
        let start = now - SCENE_DURATION_MS;
        assert_eq!(scene_progress(now, start, SCENE_DURATION_MS), 1.0);
    }

    //=== animation_time ==================================================

    #[test]
    fn animation_time_repeats_every_second() {
        assert_eq!(animation_time(0.0), 0.0);
        assert!((animation_time(250.0) - 0.25).abs() < 1e-6);
        assert!((animation_time(1250.0) - 0.25).abs() < 1e-6);
        assert_eq!(animation_time(3000.0), 0.0);
    }

    #[test]
    fn animation_time_stays_in_unit_interval() {
        for step in -50..500 {
            let t = animation_time(step as f64 * 7.3);
            assert!((0.0..1.0).contains(&t), "animation time {} out of range", t);
        }
    }

    #[test]
    fn animation_time_wraps_negative_time() {
        assert!((animation_time(-250.0) - 0.75).abs() < 1e-6);
    }

    //=== MonotonicClock ==================================================

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
