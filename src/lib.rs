//=========================================================================
// Pixel Journey - Library Root
//
// A frame-driven player for illustrated, narrated pixel-art stories.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems (scenes, playback, raster) for custom content
// - Keep the windowing layer (`platform`) private
//
// Typical usage:
// ```no_run
// use pixel_journey::{content, EngineBuilder};
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     EngineBuilder::new().build(content::journey()?).run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that does not touch the OS: timing, raster,
// scenes, playback and input mapping.
//
// `content` is the bundled story built on top of `core`.
//
pub mod content;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window, the pixel surface and the event loop.
// `engine` wires the core and the platform together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
