//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps input events to actions based on bindings and the active context.
//
// Architecture:
//   (key/button, modifiers, context) → HashMap → Action
//
// Only presses resolve. Releases and cursor motion never map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::{InputEvent, KeyCode, Modifiers, MouseButton},
};

//=== ActionMapper ========================================================

/// Resolves presses to actions via exact (input, modifiers, context) lookups.
pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<(KeyCode, Modifiers, InputContext), A>,
    mouse_bindings: HashMap<(MouseButton, Modifiers, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings, in the default context.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
            current_context: InputContext::default(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds an unmodified key press.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.bind_key_with_mods(key, Modifiers::NONE, action, context);
    }

    /// Binds a key press with an exact modifier combination.
    pub(crate) fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.key_bindings.insert((key, modifiers, context), action);
    }

    /// Binds an unmodified mouse button press.
    pub(crate) fn bind_mouse(&mut self, button: MouseButton, action: A, context: InputContext) {
        self.mouse_bindings.insert((button, Modifiers::NONE, context), action);
    }

    /// Removes every binding in `context`.
    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, _, ctx), _| ctx != context);
        self.mouse_bindings.retain(|&(_, _, ctx), _| ctx != context);
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a press in the active context to its action.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<A> {
        match *event {
            InputEvent::KeyDown { key, modifiers } => self
                .key_bindings
                .get(&(key, modifiers, self.current_context))
                .copied(),
            InputEvent::MouseButtonDown { button, modifiers } => self
                .mouse_bindings
                .get(&(button, modifiers, self.current_context))
                .copied(),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
