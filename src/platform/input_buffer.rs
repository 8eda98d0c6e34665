//=========================================================================
// Input Buffer
//=========================================================================
//
// Holds the input events that arrive between two redraws.
//
// Events are kept in arrival order. An event identical to the one just
// before it (same key, same state, same modifiers) is dropped; with
// auto-repeat already filtered this only happens on duplicate OS reports.
//
// The buffer is drained once per frame at RedrawRequested.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    /// Appends `event` unless it repeats the previous one.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Takes this frame's events, or `None` if there were none.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::Space));
        buffer.push(key_down(KeyCode::Space));
        buffer.push(key_down(KeyCode::KeyS));

        assert_eq!(buffer.drain(), Some(vec![key_down(KeyCode::Space), key_down(KeyCode::KeyS)]));
    }

    #[test]
    fn press_release_press_is_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::Space));
        buffer.push(key_up(KeyCode::Space));
        buffer.push(key_down(KeyCode::Space));

        assert_eq!(
            buffer.drain(),
            Some(vec![key_down(KeyCode::Space), key_up(KeyCode::Space), key_down(KeyCode::Space)])
        );
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::Enter));

        assert!(buffer.drain().is_some());
        assert_eq!(buffer.drain(), None);
    }
}
