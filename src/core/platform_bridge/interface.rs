//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core contract: the events the platform emits and the errors
// it can fail with.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Presses and releases buffered since the previous frame, in order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Windowing and presentation errors.
///
/// All are fatal: without a window or a surface there is nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop returned an error while running.
    EventLoopExecution(String),

    /// The OS refused to open a window.
    WindowCreation(String),

    /// The pixel surface could not be created or presented.
    Surface(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Surface(e) => write!(f, "Pixel surface error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
