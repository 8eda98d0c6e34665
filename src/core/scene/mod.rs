//=========================================================================
// Scene System
//=========================================================================
//
// Drawable scenes and the fixed registry that orders them.
//
// Architecture:
//   SceneRegistry
//     └─ scenes: Vec<Box<dyn Scene>>   (built once, never mutated)
//
// Flow:
//   FrameDriver → Playback::frame() → SceneRegistry::get() → Scene::render()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::canvas::Canvas;

//=== Module Declarations =================================================

mod registry;

//=== Public API ==========================================================

pub use registry::{RegistryError, SceneRegistry, SceneRegistryBuilder};

//=== SceneId =============================================================

/// Opaque identity token for a scene.
///
/// Content uses it to special-case narration; the engine only logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(&'static str);

impl SceneId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

//=== Scene Trait =========================================================

/// One narrative beat: identity, narration, and a render procedure.
///
/// Scenes are read-only. `render` may be called several times per frame
/// (twice during a cross-fade), so it must not keep state between calls
/// and must not block.
///
/// # Minimal Implementation
///
/// ```rust
/// # use pixel_journey::prelude::*;
/// struct Sunset;
///
/// impl Scene for Sunset {
///     fn id(&self) -> SceneId {
///         SceneId::new("sunset")
///     }
///
///     fn narration(&self) -> &str {
///         "The sky turned orange.\nWe stayed until dark."
///     }
///
///     fn render(&self, canvas: &mut Canvas, _animation_time: f32, progress: f32) {
///         let sky = Color::hex(0xFF9E4F).lerp(Color::hex(0x1A1A3A), progress);
///         canvas.fill(sky);
///     }
/// }
/// ```
pub trait Scene {
    /// Identity token.
    fn id(&self) -> SceneId;

    /// Multi-line narration; `\n` separates lines.
    fn narration(&self) -> &str;

    /// Decorative text appended after the narration.
    ///
    /// Default implementation has none.
    fn flourish(&self) -> Option<&str> {
        None
    }

    /// Paints one frame.
    ///
    /// - `animation_time`: repeating phase in `[0, 1)`, one cycle per second
    /// - `progress`: elapsed share of the scene in `[0, 1]`, capped at 1
    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32);
}
