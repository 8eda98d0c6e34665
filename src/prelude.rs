//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the types needed to write scenes and run a story.
//
// Usage:
//   use pixel_journey::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::platform_bridge::PlatformError;

// Raster
pub use crate::core::canvas::{Canvas, Color, LOGICAL_HEIGHT, LOGICAL_WIDTH};

// Scenes
pub use crate::core::scene::{RegistryError, Scene, SceneId, SceneRegistry};

// Playback
pub use crate::core::narration::{LogNarration, Narration, NarrationSink};
pub use crate::core::playback::{Phase, Playback, PlaybackConfig};

// Input
pub use crate::core::input::{Control, InputContext, InputSystem, KeyCode, Modifiers, MouseButton};
