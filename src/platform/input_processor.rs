//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard and mouse events into engine InputEvents.
//
// Architecture:
//   winit events → InputProcessor → InputEvent → InputBuffer
//
// Modifier state is cached from ModifiersChanged and stamped onto every
// subsequent press. OS auto-repeat presses are dropped so holding a key
// never fires a control twice. Keys the player does not react to are
// filtered out here.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

/// Stateful winit → engine event converter.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State ---------------------------------------------------

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.current_modifiers = Modifiers::from(state);
    }

    //--- Event Processing -------------------------------------------------

    pub(crate) fn process_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(event.physical_key, event.state, event.repeat)
    }

    /// Converts a physical key transition.
    ///
    /// Returns `None` for auto-repeat presses and for unmapped keys.
    pub(crate) fn process_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if repeat {
            return None;
        }

        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if key == KeyCode::Unidentified {
            return None;
        }

        let modifiers = self.current_modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// winit already normalizes platform keys (Cmd → Ctrl on macOS).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::KeyS => KeyCode::KeyS,

            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,

            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        state.set(ModifiersState::SHIFT, shift);
        state.set(ModifiersState::CONTROL, ctrl);
        state.set(ModifiersState::ALT, alt);
        state
    }

    fn code(code: WinitKeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    //=== Modifiers =======================================================

    #[test]
    fn starts_with_no_modifiers() {
        let click = InputProcessor::new()
            .process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        assert_eq!(
            click,
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE }
        );
    }

    #[test]
    fn modifiers_persist_across_events() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        let key = processor.process_key(code(WinitKeyCode::Space), ElementState::Pressed, false);
        let click = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);

        assert_eq!(
            key,
            Some(InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::SHIFT })
        );
        assert_eq!(
            click,
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::SHIFT }
        );
    }

    #[test]
    fn modifiers_are_replaced_not_merged() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, true, false));
        processor.update_modifiers(make_modifiers(false, false, true));

        let key = processor.process_key(code(WinitKeyCode::Enter), ElementState::Pressed, false);
        assert_eq!(key, Some(InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::ALT }));
    }

    //=== Keys ============================================================

    #[test]
    fn press_and_release() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_key(code(WinitKeyCode::KeyS), ElementState::Pressed, false),
            Some(InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::NONE })
        );
        assert_eq!(
            processor.process_key(code(WinitKeyCode::KeyS), ElementState::Released, false),
            Some(InputEvent::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::NONE })
        );
    }

    #[test]
    fn auto_repeat_is_dropped() {
        let processor = InputProcessor::new();
        let event = processor.process_key(code(WinitKeyCode::ArrowRight), ElementState::Pressed, true);
        assert_eq!(event, None);
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();

        assert_eq!(processor.process_key(code(WinitKeyCode::F13), ElementState::Pressed, false), None);
        assert_eq!(
            processor.process_key(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                ElementState::Pressed,
                false
            ),
            None
        );
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowDown), KeyCode::ArrowDown);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Unidentified);
    }

    //=== Mouse ===========================================================

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }

    #[test]
    fn mouse_release() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released),
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE }
        );
    }
}
