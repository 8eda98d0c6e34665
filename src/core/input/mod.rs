//=========================================================================
// Input System
//=========================================================================
//
// Turns a frame's worth of input events into playback controls.
//
// Architecture:
// ```text
//   InputEvent ─→ InputSystem::map_event()
//                    │  ActionMapper (active InputContext)
//                    ▼
//                 Option<Control>
// ```
//
// The frame driver sets the context from the playback phase before each
// event, so a press is always interpreted against the state it lands in.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
mod action_mapper;
pub mod event;

//=== Public API ==========================================================

pub use action::{Action, Control, InputContext};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Context-sensitive mapping from input events to [`Control`]s.
pub struct InputSystem {
    mapper: ActionMapper<Control>,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates a system with no bindings, in the start screen context.
    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
        }
    }

    /// Creates a system with the standard bindings:
    ///
    /// | Context       | Input                              | Control   |
    /// |---------------|------------------------------------|-----------|
    /// | `StartScreen` | Enter, Space, left click           | `Start`   |
    /// | `Playback`    | Space, Enter, ArrowRight, left click | `Advance` |
    /// | `Playback`    | KeyS, ArrowDown                    | `Skip`    |
    pub fn with_default_bindings() -> Self {
        use InputContext::{Playback, StartScreen};

        let mut system = Self::new();

        for key in [KeyCode::Enter, KeyCode::Space] {
            system.bind_key(key, Control::Start, StartScreen);
        }
        system.bind_mouse(MouseButton::Left, Control::Start, StartScreen);

        for key in [KeyCode::Space, KeyCode::Enter, KeyCode::ArrowRight] {
            system.bind_key(key, Control::Advance, Playback);
        }
        system.bind_mouse(MouseButton::Left, Control::Advance, Playback);

        for key in [KeyCode::KeyS, KeyCode::ArrowDown] {
            system.bind_key(key, Control::Skip, Playback);
        }

        system
    }

    //--- Bindings ---------------------------------------------------------

    pub fn bind_key(&mut self, key: KeyCode, control: Control, context: InputContext) {
        self.mapper.bind_key(key, control, context);
    }

    pub fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        control: Control,
        context: InputContext,
    ) {
        self.mapper.bind_key_with_mods(key, modifiers, control, context);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, control: Control, context: InputContext) {
        self.mapper.bind_mouse(button, control, context);
    }

    /// Drops every binding in `context`.
    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    //--- Context ----------------------------------------------------------

    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.current_context() != context {
            debug!(target: "input", "Input context -> {:?}", context);
            self.mapper.set_context(context);
        }
    }

    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Per-Frame --------------------------------------------------------

    /// Maps one event in the active context.
    pub fn map_event(&self, event: &InputEvent) -> Option<Control> {
        let control = self.mapper.map_event(event);
        if let Some(control) = control {
            trace!(target: "input", "{:?} -> {:?}", event, control);
        }
        control
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn click() -> InputEvent {
        InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE }
    }

    fn controls(system: &InputSystem, events: Vec<InputEvent>) -> Vec<Control> {
        events.iter().filter_map(|event| system.map_event(event)).collect()
    }

    //=== Default Bindings ================================================

    #[test]
    fn start_screen_bindings() {
        let system = InputSystem::default();
        assert_eq!(system.context(), InputContext::StartScreen);

        assert_eq!(
            controls(&system, vec![key(KeyCode::Enter), key(KeyCode::Space), click()]),
            vec![Control::Start; 3]
        );
        assert!(controls(&system, vec![key(KeyCode::KeyS), key(KeyCode::ArrowRight)]).is_empty());
    }

    #[test]
    fn playback_bindings() {
        let mut system = InputSystem::default();
        system.set_context(InputContext::Playback);

        assert_eq!(
            controls(
                &system,
                vec![key(KeyCode::Space), key(KeyCode::Enter), key(KeyCode::ArrowRight), click()]
            ),
            vec![Control::Advance; 4]
        );
        assert_eq!(
            controls(&system, vec![key(KeyCode::KeyS), key(KeyCode::ArrowDown)]),
            vec![Control::Skip; 2]
        );
    }

    #[test]
    fn modified_presses_do_not_match_defaults() {
        let mut system = InputSystem::default();
        system.set_context(InputContext::Playback);

        let shifted = InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::SHIFT };
        assert!(controls(&system, vec![shifted]).is_empty());
    }

    //=== Event Mapping ===================================================

    #[test]
    fn order_is_preserved() {
        let mut system = InputSystem::default();
        system.set_context(InputContext::Playback);

        let events = vec![key(KeyCode::ArrowRight), key(KeyCode::KeyS), key(KeyCode::Space)];
        assert_eq!(controls(&system, events), vec![Control::Advance, Control::Skip, Control::Advance]);
    }

    #[test]
    fn releases_and_unknown_keys_are_skipped() {
        let system = InputSystem::default();
        let events = vec![
            InputEvent::KeyUp { key: KeyCode::Enter, modifiers: Modifiers::NONE },
            key(KeyCode::Unidentified),
        ];
        assert!(controls(&system, events).is_empty());
    }

    #[test]
    fn empty_system_maps_nothing() {
        let system = InputSystem::new();
        assert!(controls(&system, vec![key(KeyCode::Enter)]).is_empty());
    }

    #[test]
    fn custom_binding_with_modifiers() {
        let mut system = InputSystem::default();
        system.bind_key_with_mods(KeyCode::ArrowRight, Modifiers::SHIFT, Control::Skip, InputContext::Playback);
        system.set_context(InputContext::Playback);

        let shifted = InputEvent::KeyDown { key: KeyCode::ArrowRight, modifiers: Modifiers::SHIFT };
        assert_eq!(controls(&system, vec![shifted]), vec![Control::Skip]);
    }

    #[test]
    fn clear_context_removes_defaults() {
        let mut system = InputSystem::default();
        system.clear_context(InputContext::StartScreen);
        assert!(controls(&system, vec![key(KeyCode::Enter)]).is_empty());
    }
}
