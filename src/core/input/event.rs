//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-side representation of user input, independent of winit.
//
// Only the keys and buttons the player reacts to are named; everything
// else collapses to `Unidentified` at the platform boundary.
//
// Cursor motion is not represented; only presses and releases matter.
//
// Event Flow:
// ```text
// winit KeyEvent / MouseInput
//         ↓  (platform::InputProcessor)
//    InputEvent (this module)
//         ↓  (ActionMapper, per InputContext)
//    Control (Start / Advance / Skip)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Wheel click.
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Letters ----------------------------------------------------------

    KeyS,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,

    /// Any key the player does not react to.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
///
/// Bindings match modifiers exactly: a binding on `Space` does not fire
/// for `Shift+Space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== InputEvent ==========================================================

/// One discrete input occurrence reported by the platform.
///
/// Order within a frame is significant: two presses in one frame map to
/// two controls, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// `true` for presses (key or button down).
    pub fn is_press(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::MouseButtonDown { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
