//=========================================================================
// Playback State Machine
//=========================================================================
//
// Owns the current scene, the active transition, the celebration overlay
// and every pending timer.
//
// States:
// ```text
//            start()              advance()
//   Idle ───────────> Playing ─────────────> Transitioning
//    ▲                 ▲  │ skip()                │ commit timer
//    │                 │  ▼                       │
//    │                 │ Ended <──── skip() ──────┤
//    │                 │  │ advance()             │
//    │                 └──┴───────────────────────┘ (to != first)
//    │                                            │ (last → first)
//    └──── celebration timer ──── Celebrating <───┘
// ```
//
// Timing is driven entirely by the `now` arguments (ms). The frame driver
// passes wall clock; tests pass literals.
//
// Deferred work (transition commit, end of celebration) lives in a
// TimerQueue polled at the start of each tick. A commit only applies if
// its handle still matches the active transition, so a skip that
// interleaves with a due commit always wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::{self, SCENE_DURATION_MS};
use crate::core::effect::{Celebration, CELEBRATION_LINGER_MS, CELEBRATION_MS};
use crate::core::input::Control;
use crate::core::narration::{Narration, NarrationSink};
use crate::core::scene::SceneRegistry;
use crate::core::timer::{TimerHandle, TimerQueue};
use crate::core::transition::{Transition, TransitionController, TRANSITION_MS};

//=== PlaybackConfig ======================================================

/// Playback durations, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Length of a scene's progress ramp (default 5200).
    pub scene_duration_ms: f64,

    /// Cross-fade length (default 700).
    pub transition_ms: f64,

    /// Celebration animation length (default 900).
    pub celebration_ms: f64,

    /// Pause after the celebration before the start screen (default 420).
    pub celebration_linger_ms: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scene_duration_ms: SCENE_DURATION_MS,
            transition_ms: TRANSITION_MS,
            celebration_ms: CELEBRATION_MS,
            celebration_linger_ms: CELEBRATION_LINGER_MS,
        }
    }
}

//=== Phase ===============================================================

/// Observable playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Start screen; the frame driver stops scheduling.
    Idle,

    /// One scene visible.
    Playing,

    /// Two scenes cross-fading.
    Transitioning,

    /// Final scene shown fully revealed after a skip.
    Ended,

    /// Wrap-around celebration overlay running.
    Celebrating,
}

//=== PlaybackTimer =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackTimer {
    CommitTransition,
    CelebrationFinished,
}

//=== PlaybackState =======================================================

/// Mutable playback state. One instance per player, never global.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    current: usize,
    playing: bool,
    ended: bool,
    scene_start: f64,
    scene_progress: f32,
    transitions: TransitionController,
    celebration: Option<Celebration>,
    celebrations: u32,
}

impl PlaybackState {
    fn new(transition_ms: f64) -> Self {
        Self {
            current: 0,
            playing: false,
            ended: false,
            scene_start: 0.0,
            scene_progress: 0.0,
            transitions: TransitionController::new(transition_ms),
            celebration: None,
            celebrations: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.playing {
            Phase::Idle
        } else if self.celebration.is_some() {
            Phase::Celebrating
        } else if self.transitions.is_active() {
            Phase::Transitioning
        } else if self.ended {
            Phase::Ended
        } else {
            Phase::Playing
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Wall-clock ms at which the current scene became active.
    pub fn scene_start(&self) -> f64 {
        self.scene_start
    }

    /// Progress as of the last [`Playback::update`], in `[0, 1]`.
    pub fn scene_progress(&self) -> f32 {
        self.scene_progress
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transitions.active()
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// How many celebrations have been triggered since construction.
    pub fn celebration_count(&self) -> u32 {
        self.celebrations
    }
}

//=== FramePlan ===========================================================

/// One scene to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub scene: usize,
    pub opacity: f32,
    pub animation_time: f32,
    pub progress: f32,
}

/// What the frame driver should draw for one tick, bottom layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    /// Shared animation phase for this tick.
    pub animation_time: f32,

    /// `true` while idle; no scene layers are present.
    pub start_screen: bool,

    /// Scenes to composite in order (outgoing before incoming).
    pub layers: Vec<Layer>,

    /// Celebration overlay drawn above all layers.
    pub celebration: Option<Celebration>,
}

//=== Playback ============================================================

/// The scene playback engine.
///
/// Owns the registry, state, timers and narration sink. All operations
/// take the current wall-clock time in ms.
///
/// # Examples
///
/// ```rust
/// # use pixel_journey::prelude::*;
/// # struct Blank;
/// # impl Scene for Blank {
/// #     fn id(&self) -> SceneId { SceneId::new("blank") }
/// #     fn narration(&self) -> &str { "" }
/// #     fn render(&self, _: &mut Canvas, _: f32, _: f32) {}
/// # }
/// let scenes = SceneRegistry::builder().scene(Blank).scene(Blank).build().unwrap();
/// let mut playback = Playback::new(scenes, PlaybackConfig::default(), LogNarration);
///
/// playback.start(0.0);
/// playback.advance(1000.0);
/// playback.update(1700.0);
///
/// assert_eq!(playback.state().current_index(), 1);
/// ```
pub struct Playback<N: NarrationSink> {
    scenes: SceneRegistry,
    state: PlaybackState,
    timers: TimerQueue<PlaybackTimer>,
    config: PlaybackConfig,
    narration: N,
}

impl<N: NarrationSink> Playback<N> {
    //--- Construction -----------------------------------------------------

    /// Creates an idle player.
    ///
    /// # Panics
    ///
    /// Panics if any configured duration is negative or not finite.
    pub fn new(scenes: SceneRegistry, config: PlaybackConfig, narration: N) -> Self {
        for (name, value) in [
            ("Scene duration", config.scene_duration_ms),
            ("Celebration duration", config.celebration_ms),
            ("Celebration linger", config.celebration_linger_ms),
        ] {
            assert!(
                value.is_finite() && value >= 0.0,
                "{} must be finite and non-negative, got {}",
                name,
                value
            );
        }

        Self {
            state: PlaybackState::new(config.transition_ms),
            scenes,
            timers: TimerQueue::new(),
            config,
            narration,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn narration_sink(&self) -> &N {
        &self.narration
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    //--- Controls ---------------------------------------------------------

    /// Routes a user control to the matching operation.
    ///
    /// Returns whether the control changed state.
    pub fn apply(&mut self, control: Control, now: f64) -> bool {
        match control {
            Control::Start => self.start(now),
            Control::Advance => self.advance(now),
            Control::Skip => self.skip(now),
        }
    }

    /// Idle → Playing on the first scene.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state.playing {
            debug!(target: "playback", "Start ignored in {:?}", self.phase());
            return false;
        }

        self.timers.clear();
        self.state.transitions.cancel();
        self.state.celebration = None;
        self.state.playing = true;

        info!(target: "playback", "Playback started ({} scenes)", self.scenes.len());
        self.enter_scene(0, now);
        true
    }

    /// Requests a cross-fade to the next scene.
    ///
    /// Silently rejected while idle, celebrating, or already fading.
    pub fn advance(&mut self, now: f64) -> bool {
        match self.phase() {
            Phase::Playing | Phase::Ended => {}
            phase => {
                debug!(target: "playback", "Advance ignored in {:?}", phase);
                return false;
            }
        }

        let from = self.state.current;
        let to = self.scenes.next_index(from);
        let commit = self
            .timers
            .schedule(now + self.config.transition_ms, PlaybackTimer::CommitTransition);

        if !self.state.transitions.begin(from, to, now, commit) {
            self.timers.cancel(commit);
            return false;
        }

        debug!(
            target: "playback",
            "Transition {} ({}) -> {} ({}) at {:.1}ms",
            from,
            self.scenes.id(from),
            to,
            self.scenes.id(to),
            now
        );
        true
    }

    /// Jumps to the final scene, fully revealed.
    ///
    /// Accepted only while a scene is on screen (`Playing`, `Transitioning`
    /// or `Ended`). The start screen and the celebration overlay have no
    /// skip control, so a skip there is ignored and returns `false`.
    ///
    /// Cancels any in-flight transition together with its commit timer.
    pub fn skip(&mut self, now: f64) -> bool {
        match self.phase() {
            Phase::Playing | Phase::Transitioning | Phase::Ended => {}
            phase => {
                debug!(target: "playback", "Skip ignored in {:?}", phase);
                return false;
            }
        }

        if let Some(canceled) = self.state.transitions.cancel() {
            self.timers.cancel(canceled.commit);
            debug!(
                target: "playback",
                "Skip canceled transition {} -> {}",
                canceled.from,
                canceled.to
            );
        }

        let last = self.scenes.last_index();
        info!(target: "playback", "Skipping to final scene {} ({})", last, self.scenes.id(last));

        self.state.current = last;
        self.state.ended = true;
        self.state.scene_start = now - self.config.scene_duration_ms;
        self.state.scene_progress = 1.0;
        self.publish_narration();
        true
    }

    //--- Per-Frame --------------------------------------------------------

    /// Fires timers due at `now` and refreshes scene progress.
    pub fn update(&mut self, now: f64) {
        self.poll_timers(now);
        self.refresh_progress(now);
    }

    /// Fires every timer due at `now`. Returns how many fired.
    pub fn poll_timers(&mut self, now: f64) -> usize {
        let mut fired = 0;
        while let Some((handle, timer)) = self.timers.pop_due(now) {
            fired += 1;
            match timer {
                PlaybackTimer::CommitTransition => self.commit_transition(handle, now),
                PlaybackTimer::CelebrationFinished => self.finish_celebration(),
            }
        }
        fired
    }

    /// Describes what to draw at `now`.
    pub fn frame(&self, now: f64) -> FramePlan {
        let animation_time = clock::animation_time(now);

        if !self.state.playing {
            return FramePlan {
                animation_time,
                start_screen: true,
                layers: Vec::new(),
                celebration: None,
            };
        }

        let layers = match self.state.transitions.active() {
            Some(transition) => {
                let blend = transition.sample(now);
                vec![
                    Layer {
                        scene: transition.from,
                        opacity: blend.outgoing,
                        animation_time,
                        progress: self.state.scene_progress,
                    },
                    Layer {
                        scene: transition.to,
                        opacity: blend.incoming,
                        animation_time,
                        progress: 0.0,
                    },
                ]
            }
            None => vec![Layer {
                scene: self.state.current,
                opacity: 1.0,
                animation_time,
                progress: self.state.scene_progress,
            }],
        };

        FramePlan {
            animation_time,
            start_screen: false,
            layers,
            celebration: self.state.celebration,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn refresh_progress(&mut self, now: f64) {
        if self.state.playing {
            self.state.scene_progress =
                clock::scene_progress(now, self.state.scene_start, self.config.scene_duration_ms);
        }
    }

    fn enter_scene(&mut self, index: usize, now: f64) {
        self.state.current = index % self.scenes.len();
        self.state.ended = false;
        self.state.scene_start = now;
        self.state.scene_progress = 0.0;
        self.publish_narration();
    }

    fn publish_narration(&mut self) {
        let scene = self.scenes.get(self.state.current);
        trace!(target: "playback", "Publishing narration for {}", scene.id());
        self.narration.publish(Narration::for_scene(scene));
    }

    fn commit_transition(&mut self, handle: TimerHandle, now: f64) {
        let Some(transition) = self.state.transitions.finish(handle) else {
            debug!(target: "playback", "Dropping stale transition commit {:?}", handle);
            return;
        };
        if !transition.is_complete(now) {
            warn!(target: "playback", "Commit {:?} fired before the fade completed", handle);
        }

        self.enter_scene(transition.to, now);
        debug!(
            target: "playback",
            "Committed scene {} ({}) at {:.1}ms",
            transition.to,
            self.scenes.id(transition.to),
            now
        );

        if transition.from == self.scenes.last_index() && transition.to == 0 {
            self.begin_celebration(now);
        }
    }

    fn begin_celebration(&mut self, now: f64) {
        let celebration =
            Celebration::new(now, self.config.celebration_ms, self.config.celebration_linger_ms);

        self.timers
            .schedule(celebration.finishes_at(), PlaybackTimer::CelebrationFinished);
        self.state.celebration = Some(celebration);
        self.state.celebrations += 1;

        info!(target: "playback", "Journey complete, celebrating");
    }

    fn finish_celebration(&mut self) {
        self.state.celebration = None;
        self.state.playing = false;
        self.state.ended = false;
        info!(target: "playback", "Returning to start screen");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
