//=========================================================================
// Engine
//=========================================================================
//
// Entry point that wires scenes, playback, input and the window together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(scenes)──>  Engine  ──run()──>  [Event Loop]
//         │                                │
//         ├─ with_scene_duration()         ├─ bounded input channel
//         ├─ with_transition_duration()    ├─ unbounded narration channel
//         ├─ with_scale()                  ├─ Playback + FrameDriver
//         ├─ with_channel_capacity()       └─ Platform (blocks until exit)
//         └─ with_title()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, unbounded};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::frame::FrameDriver;
use crate::core::input::InputSystem;
use crate::core::platform_bridge::PlatformError;
use crate::core::playback::{Playback, PlaybackConfig};
use crate::core::scene::SceneRegistry;
use crate::platform::{Platform, PlatformConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring an [`Engine`].
///
/// # Default Values
///
/// - **Scene duration**: 5200 ms
/// - **Transition duration**: 700 ms
/// - **Celebration**: 900 ms, then a 420 ms linger
/// - **Window scale**: 4 (640×576 for the 160×144 raster)
/// - **Channel capacity**: 128 input batches
/// - **Title**: "Pixel Journey"
///
/// # Examples
///
/// ```no_run
/// use pixel_journey::EngineBuilder;
///
/// let scenes = pixel_journey::content::journey().unwrap();
///
/// EngineBuilder::new()
///     .with_scale(3)
///     .with_transition_duration(500.0)
///     .build(scenes)
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder {
    playback: PlaybackConfig,
    scale: u32,
    channel_capacity: usize,
    title: String,
    input: Option<InputSystem>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            scale: 4,
            channel_capacity: 128,
            title: "Pixel Journey".to_owned(),
            input: None,
        }
    }

    /// Sets how long a scene's progress takes to reach 1, in ms.
    ///
    /// Default: 5200.0
    ///
    /// # Panics
    ///
    /// Panics if `ms` is not positive and finite.
    pub fn with_scene_duration(mut self, ms: f64) -> Self {
        assert!(ms.is_finite() && ms > 0.0, "Scene duration must be positive, got {}", ms);
        self.playback.scene_duration_ms = ms;
        self
    }

    /// Sets the cross-fade length, in ms.
    ///
    /// Default: 700.0
    ///
    /// # Panics
    ///
    /// Panics if `ms` is negative or not finite.
    pub fn with_transition_duration(mut self, ms: f64) -> Self {
        assert!(
            ms.is_finite() && ms >= 0.0,
            "Transition duration must be non-negative, got {}",
            ms
        );
        self.playback.transition_ms = ms;
        self
    }

    /// Sets the celebration animation and linger lengths, in ms.
    ///
    /// Default: 900.0 and 420.0
    ///
    /// # Panics
    ///
    /// Panics if either value is negative or not finite.
    pub fn with_celebration(mut self, animation_ms: f64, linger_ms: f64) -> Self {
        assert!(
            animation_ms.is_finite() && animation_ms >= 0.0 && linger_ms.is_finite() && linger_ms >= 0.0,
            "Celebration durations must be non-negative, got {} and {}",
            animation_ms,
            linger_ms
        );
        self.playback.celebration_ms = animation_ms;
        self.playback.celebration_linger_ms = linger_ms;
        self
    }

    /// Sets the integer window upscale factor.
    ///
    /// Default: 4
    ///
    /// # Panics
    ///
    /// Panics if `scale == 0`.
    pub fn with_scale(mut self, scale: u32) -> Self {
        assert!(scale > 0, "Window scale must be positive");
        self.scale = scale;
        self
    }

    /// Sets the platform → frame driver channel capacity.
    ///
    /// Input batches beyond capacity are dropped with a warning.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the base window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the default key and mouse bindings.
    pub fn with_input(mut self, input: InputSystem) -> Self {
        self.input = Some(input);
        self
    }

    /// Builds the engine around `scenes`.
    pub fn build(self, scenes: SceneRegistry) -> Engine {
        info!(
            "Building engine ({} scenes, scale: {}, channel: {})",
            scenes.len(),
            self.scale,
            self.channel_capacity
        );

        Engine {
            scenes,
            playback: self.playback,
            input: self.input.unwrap_or_default(),
            platform: PlatformConfig {
                title: self.title,
                scale: self.scale,
            },
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A configured player, ready to open its window.
///
/// ```text
/// Engine::run() (main thread)
///   └─► Platform (winit event loop)
///         └─► FrameDriver::tick() per redraw
///               └─► Playback ──narration──► Platform (stdout, title)
/// ```
pub struct Engine {
    scenes: SceneRegistry,
    playback: PlaybackConfig,
    input: InputSystem,
    platform: PlatformConfig,
    channel_capacity: usize,
}

impl Engine {
    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    pub fn playback_config(&self) -> &PlaybackConfig {
        &self.playback
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop, window or pixel surface
    /// cannot be created, or if the event loop fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (narration_tx, narration_rx) = unbounded();
        info!("Channels created (input capacity: {})", self.channel_capacity);

        let playback = Playback::new(self.scenes, self.playback, narration_tx);
        let driver = FrameDriver::new(playback, self.input, event_rx);

        let platform = Platform::new(self.platform, event_tx, driver, narration_rx);
        let result = platform.run();

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
