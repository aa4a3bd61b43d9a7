// Input manager - routes winit keyboard events into the game's snapshot

use super::bindings::KeyBindings;
use super::state::InputState;
use log::debug;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Owns the binding table and the per-frame input snapshot
pub struct InputManager {
    bindings: KeyBindings,
    state: InputState,
}

impl InputManager {
    /// Create a manager with the default key layout
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::with_defaults())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical key codes participate in bindings
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(action) = self.bindings.action_for(key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // OS key repeat must not retrigger press edges
                if !event.repeat {
                    debug!("Action '{}' pressed", action.name());
                    self.state.press(action);
                }
            }
            ElementState::Released => {
                debug!("Action '{}' released", action.name());
                self.state.release(action);
            }
        }
    }

    /// Advance the snapshot to a new frame.
    /// Call once per frame after the simulation has consumed the state.
    pub fn update(&mut self) {
        self.state.update();
    }

    /// The snapshot the simulation reads
    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    // winit's KeyEvent cannot be constructed outside winit, so these tests
    // drive the snapshot directly, same as the game's own tests do.

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new();
        assert!(!manager.bindings().is_empty());
        assert!(!manager.state().is_held(Action::MoveLeft));
    }

    #[test]
    fn test_direct_state_manipulation() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::MoveLeft);
        assert!(manager.state().is_held(Action::MoveLeft));
    }

    #[test]
    fn test_update_expires_edges() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::MapSlot1);
        assert!(manager.state().just_pressed(Action::MapSlot1));

        manager.update();
        assert!(!manager.state().just_pressed(Action::MapSlot1));
        assert!(manager.state().is_held(Action::MapSlot1));
    }

    #[test]
    fn test_rebinding_through_manager() {
        use winit::keyboard::KeyCode;

        let mut manager = InputManager::new();
        manager.bindings_mut().bind(KeyCode::KeyQ, Action::Quit);
        assert_eq!(
            manager.bindings().action_for(KeyCode::KeyQ),
            Some(Action::Quit)
        );
    }
}
