//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing layer and the frame driver.
//
// Components:
// - `interface`: event types and error definitions
// - `event_collector`: core-side draining of platform events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
