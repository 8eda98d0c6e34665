//=========================================================================
// Terminal Effect
//=========================================================================
//
// One-shot celebration overlay shown when playback wraps from the last
// scene back to the first: a heart that scales up while fading out,
// followed by a short linger before the start screen returns.
//
//   start ──[ animation: scale 1→5, opacity 1→0 ]──[ linger ]── finish
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

//=== Internal Dependencies ===============================================

use crate::core::canvas::{Canvas, Color};

//=== Constants ===========================================================

/// Length of the scale-up animation, in milliseconds.
pub const CELEBRATION_MS: f64 = 900.0;

/// Pause after the animation before returning to the start screen.
pub const CELEBRATION_LINGER_MS: f64 = 420.0;

/// Heart fill.
pub const HEART_COLOR: Color = Color::hex(0xFF6B6B);

const HEART_CENTER: (f32, f32) = (80.0, 60.0);
const MAX_EXTRA_SCALE: f32 = 4.0;
const HEART_SEGMENTS: usize = 48;

//=== Celebration =========================================================

/// Timing of one celebration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub start: f64,
    pub duration: f64,
    pub linger: f64,
}

impl Celebration {
    pub fn new(start: f64, duration: f64, linger: f64) -> Self {
        Self { start, duration, linger }
    }

    /// Animation progress in `[0, 1]`; stays at 1 through the linger.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Heart scale factor, from 1 up to 5.
    pub fn scale(&self, now: f64) -> f32 {
        1.0 + self.progress(now) * MAX_EXTRA_SCALE
    }

    /// Overlay opacity, fading from 1 to 0.
    pub fn opacity(&self, now: f64) -> f32 {
        1.0 - self.progress(now)
    }

    /// When the start screen should come back.
    pub fn finishes_at(&self) -> f64 {
        self.start + self.duration + self.linger
    }

    /// Draws the heart for `now` into `layer` (which the caller composites
    /// at [`Celebration::opacity`]).
    pub fn render(&self, layer: &mut Canvas, now: f64) {
        draw_heart(layer, HEART_CENTER.0, HEART_CENTER.1, self.scale(now), HEART_COLOR);
    }
}

//=== Heart Shape =========================================================

/// Fills a heart centered on `(cx, cy)`. At `scale == 1.0` it is roughly
/// 24 pixels wide.
pub fn draw_heart(canvas: &mut Canvas, cx: f32, cy: f32, scale: f32, color: Color) {
    let unit = 0.75 * scale;

    let points: Vec<(f32, f32)> = (0..HEART_SEGMENTS)
        .map(|i| {
            let t = i as f32 / HEART_SEGMENTS as f32 * TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            (cx + x * unit, cy - y * unit)
        })
        .collect();

    canvas.fill_polygon(&points, color);
}

//=========================================================================
// Unit Tests
//=========================================================================
