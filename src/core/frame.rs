//=========================================================================
// Frame Driver
//=========================================================================
//
// Runs one tick of the player per display refresh.
//
// Tick order:
// ```text
//   collect platform events ──(window closed)──> FrameControl::Exit
//        ↓
//   context from phase → InputSystem → controls → Playback::apply
//        ↓
//   Playback::update (timers, then progress)
//        ↓
//   clear raster → start screen | layers (scratch → composite) → overlay
// ```
//
// Scenes never draw straight into the output raster. Each layer renders
// into a cleared scratch canvas that is then composited at the layer's
// opacity, outgoing scene first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use crossbeam_channel::Receiver;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::canvas::{Canvas, Color, LOGICAL_WIDTH};
use crate::core::effect::{draw_heart, HEART_COLOR};
use crate::core::input::{InputContext, InputSystem};
use crate::core::narration::NarrationSink;
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::playback::{FramePlan, Phase, Playback};

//=== FrameControl ========================================================

/// What the platform should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Playback is live; request the next frame immediately.
    Continue,

    /// Start screen is up; only input or a slow refresh needs a frame.
    Idle,

    /// Shut down.
    Exit,
}

//=== FrameDriver =========================================================

/// Owns the player, the input mapping and the output raster.
pub struct FrameDriver<N: NarrationSink> {
    playback: Playback<N>,
    input: InputSystem,
    events: EventCollector,
    canvas: Canvas,
    scratch: Canvas,
    frames: u64,
}

impl<N: NarrationSink> FrameDriver<N> {
    pub(crate) fn new(
        playback: Playback<N>,
        input: InputSystem,
        receiver: Receiver<PlatformEvent>,
    ) -> Self {
        Self {
            playback,
            input,
            events: EventCollector::new(receiver),
            canvas: Canvas::logical(),
            scratch: Canvas::logical(),
            frames: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn playback(&self) -> &Playback<N> {
        &self.playback
    }

    /// Raster produced by the last tick.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Ticks run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    //--- tick() -----------------------------------------------------------

    /// Runs one frame at wall-clock `now` (ms).
    pub fn tick(&mut self, now: f64) -> FrameControl {
        if self.events.collect_frame() == TickControl::Exit {
            info!(target: "playback", "Frame driver exiting after {} frames", self.frames);
            return FrameControl::Exit;
        }

        self.apply_input(now);
        self.playback.update(now);

        let plan = self.playback.frame(now);
        self.render(&plan, now);
        self.frames += 1;

        match self.playback.phase() {
            Phase::Idle => FrameControl::Idle,
            _ => FrameControl::Continue,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Maps this frame's presses one at a time, so a press that changes
    /// the phase switches the context for the presses behind it.
    /// Releases never map and are skipped.
    fn apply_input(&mut self, now: f64) {
        for batch in self.events.batches() {
            for event in batch.iter().filter(|e| e.is_press()) {
                self.input.set_context(context_for(self.playback.phase()));

                if let Some(control) = self.input.map_event(event) {
                    let applied = self.playback.apply(control, now);
                    debug!(
                        target: "input",
                        "{:?} at {:.1}ms ({})",
                        control,
                        now,
                        if applied { "applied" } else { "ignored" }
                    );
                }
            }
        }
    }

    fn render(&mut self, plan: &FramePlan, now: f64) {
        self.canvas.clear();

        if plan.start_screen {
            render_start_screen(&mut self.canvas, plan.animation_time);
            return;
        }

        for layer in &plan.layers {
            trace!(
                target: "playback",
                "Layer scene={} opacity={:.3} progress={:.3}",
                layer.scene,
                layer.opacity,
                layer.progress
            );

            self.scratch.clear();
            self.playback
                .scenes()
                .get(layer.scene)
                .render(&mut self.scratch, layer.animation_time, layer.progress);
            self.canvas.composite(&self.scratch, layer.opacity);
        }

        if let Some(celebration) = &plan.celebration {
            self.scratch.clear();
            celebration.render(&mut self.scratch, now);
            self.canvas.composite(&self.scratch, celebration.opacity(now));
        }
    }
}

//=== Context Selection ===================================================

fn context_for(phase: Phase) -> InputContext {
    match phase {
        Phase::Idle => InputContext::StartScreen,
        _ => InputContext::Playback,
    }
}

//=== Start Screen ========================================================

const NIGHT_TOP: Color = Color::hex(0x0B0B2A);
const NIGHT_BOTTOM: Color = Color::hex(0x2E1F4F);
const STAR: Color = Color::hex(0xFFF6C8);
const PROMPT: Color = Color::hex(0xFFE29A);

const STARS: [(i32, i32); 9] = [
    (12, 14),
    (31, 40),
    (48, 9),
    (67, 27),
    (102, 12),
    (119, 36),
    (137, 19),
    (150, 48),
    (22, 62),
];

/// Night backdrop with a pulsing heart and a blinking prompt.
pub fn render_start_screen(canvas: &mut Canvas, animation_time: f32) {
    canvas.vertical_gradient(0, canvas.height() as i32, NIGHT_TOP, NIGHT_BOTTOM);

    for (i, &(x, y)) in STARS.iter().enumerate() {
        let twinkle = ((animation_time + i as f32 * 0.37) * TAU).sin();
        if twinkle > -0.6 {
            canvas.put(x, y, STAR);
        }
    }

    let pulse = 1.6 + 0.2 * (animation_time * TAU).sin();
    draw_heart(canvas, LOGICAL_WIDTH as f32 / 2.0, 66.0, pulse, HEART_COLOR);

    if animation_time < 0.6 {
        for i in 0..3 {
            canvas.fill_rect(72 + i * 7, 112, 3, 3, PROMPT);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
