//=========================================================================
// Transition Controller
//=========================================================================
//
// Cross-fade state between two scenes.
//
// Lifecycle:
//   begin(from, to, now, commit) ──> active for `duration` ms
//                                      │ active().sample(now) → Blend
//                                      ▼
//   finish() at commit time       or  cancel() on skip
//
// Only opacity blends. Both scenes render their full output each frame,
// outgoing first, so the incoming layer visually occludes.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::timer::TimerHandle;

//=== Constants ===========================================================

/// Default cross-fade length, in milliseconds.
pub const TRANSITION_MS: f64 = 700.0;

//=== Blend ===============================================================

/// Opacity pair for one cross-fade frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Elapsed share of the transition in `[0, 1]`.
    pub progress: f32,

    /// Opacity of the scene being left (`1 - progress`).
    pub outgoing: f32,

    /// Opacity of the scene being entered (`progress`).
    pub incoming: f32,
}

impl Blend {
    fn at(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            progress,
            outgoing: 1.0 - progress,
            incoming: progress,
        }
    }
}

//=== Transition ==========================================================

/// One in-flight cross-fade.
///
/// Owns the handle of the timer that will commit it, so whoever cancels
/// the transition can cancel the commit too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub start: f64,
    pub duration: f64,
    pub commit: TimerHandle,
}

impl Transition {
    /// Elapsed share of the fade, clamped to `[0, 1]`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now: f64) -> Blend {
        Blend::at(self.progress(now))
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

//=== TransitionController ================================================

/// Holds at most one active transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionController {
    duration: f64,
    active: Option<Transition>,
}

impl TransitionController {
    /// Creates an idle controller whose fades last `duration` ms.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or not finite.
    pub fn new(duration: f64) -> Self {
        assert!(
            duration.is_finite() && duration >= 0.0,
            "Transition duration must be finite and non-negative, got {}",
            duration
        );
        Self { duration, active: None }
    }

    /// Starts a fade from `from` to `to`.
    ///
    /// Returns `false` and changes nothing if a fade is already running;
    /// requests are rejected, never queued.
    pub fn begin(&mut self, from: usize, to: usize, now: f64, commit: TimerHandle) -> bool {
        if self.active.is_some() {
            debug!(target: "playback", "Transition already active, ignoring {} -> {}", from, to);
            return false;
        }

        self.active = Some(Transition {
            from,
            to,
            start: now,
            duration: self.duration,
            commit,
        });
        true
    }

    pub fn active(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Removes the fade if `commit` is the handle it was scheduled with.
    ///
    /// A mismatched handle means the timer belongs to a fade that was
    /// already canceled; it is left alone and `None` is returned.
    pub fn finish(&mut self, commit: TimerHandle) -> Option<Transition> {
        match self.active {
            Some(t) if t.commit == commit => self.active.take(),
            _ => None,
        }
    }

    /// Drops the active fade without committing it.
    pub fn cancel(&mut self) -> Option<Transition> {
        self.active.take()
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(TRANSITION_MS)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timer::TimerQueue;

    fn handles(n: usize) -> Vec<TimerHandle> {
        let mut timers = TimerQueue::new();
        (0..n).map(|_| timers.schedule(0.0, ())).collect()
    }

    //=== Transition ======================================================

    #[test]
    fn blend_at_start_shows_outgoing_only() {
        let h = handles(1);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 1000.0, h[0]);

        let blend = ctl.active().unwrap().sample(1000.0);
        assert_eq!(blend.outgoing, 1.0);
        assert_eq!(blend.incoming, 0.0);
    }

    #[test]
    fn blend_midway() {
        let h = handles(1);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 0.0, h[0]);

        let blend = ctl.active().unwrap().sample(350.0);
        assert!((blend.progress - 0.5).abs() < 1e-6);
        assert!((blend.outgoing + blend.incoming - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blend_is_clamped_after_expiry_and_before_start() {
        let h = handles(1);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 1000.0, h[0]);

        let late = ctl.active().unwrap().sample(99_999.0);
        assert_eq!((late.outgoing, late.incoming), (0.0, 1.0));

        let early = ctl.active().unwrap().sample(0.0);
        assert_eq!((early.outgoing, early.incoming), (1.0, 0.0));
    }

    #[test]
    fn completes_at_duration() {
        let h = handles(1);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 1000.0, h[0]);

        let fade = ctl.active().unwrap();
        assert!(!fade.is_complete(1699.0));
        assert!(fade.is_complete(1700.0));
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let h = handles(1);
        let mut ctl = TransitionController::new(0.0);
        ctl.begin(0, 1, 5.0, h[0]);
        assert!(ctl.active().unwrap().is_complete(5.0));
    }

    #[test]
    #[should_panic(expected = "Transition duration must be finite")]
    fn negative_duration_panics() {
        TransitionController::new(-1.0);
    }

    //=== Controller ======================================================

    #[test]
    fn second_begin_is_rejected() {
        let h = handles(2);
        let mut ctl = TransitionController::default();

        assert!(ctl.begin(0, 1, 0.0, h[0]));
        assert!(!ctl.begin(1, 2, 10.0, h[1]));

        let active = ctl.active().unwrap();
        assert_eq!((active.from, active.to, active.start), (0, 1, 0.0));
        assert_eq!(active.commit, h[0]);
    }

    #[test]
    fn finish_requires_matching_handle() {
        let h = handles(2);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 0.0, h[0]);

        assert!(ctl.finish(h[1]).is_none());
        assert!(ctl.is_active());

        let done = ctl.finish(h[0]).unwrap();
        assert_eq!(done.to, 1);
        assert!(!ctl.is_active());
    }

    #[test]
    fn cancel_clears_and_returns() {
        let h = handles(1);
        let mut ctl = TransitionController::default();
        ctl.begin(3, 4, 0.0, h[0]);

        let canceled = ctl.cancel().unwrap();
        assert_eq!(canceled.commit, h[0]);
        assert!(ctl.active().is_none());
        assert!(ctl.cancel().is_none());
    }

    #[test]
    fn begin_after_finish_is_accepted() {
        let h = handles(2);
        let mut ctl = TransitionController::default();
        ctl.begin(0, 1, 0.0, h[0]);
        ctl.finish(h[0]);

        assert!(ctl.begin(1, 2, 701.0, h[1]));
    }
}
