//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that does not touch the OS: timing, raster, scenes, playback
// and input mapping.
//
// Architecture:
// ```text
//   FrameDriver (one tick per redraw)
//     ├─ EventCollector   platform events → input batches
//     ├─ InputSystem      input events → Control
//     ├─ Playback         state machine, timers, narration
//     │    ├─ SceneRegistry
//     │    ├─ TransitionController
//     │    └─ Celebration
//     └─ Canvas ×2        output raster + scratch layer
// ```
//
// All core state is owned by the FrameDriver; nothing here is global.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod canvas;
pub mod clock;
pub mod effect;
pub mod frame;
pub mod input;
pub mod narration;
pub mod platform_bridge;
pub mod playback;
pub mod scene;
pub mod timer;
pub mod transition;

//=== Public API ==========================================================

pub use canvas::{Canvas, Color};
pub use frame::{FrameControl, FrameDriver};
pub use narration::{LogNarration, Narration, NarrationSink};
pub use playback::{Phase, Playback, PlaybackConfig};
