// Frame-to-frame input state snapshot

use super::action::Action;
use std::collections::HashSet;

/// The set of actions currently active, as seen by one simulation frame
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions whose key is currently down
    pressed: HashSet<Action>,

    /// Actions whose key went down since the last `update`
    just_pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Is the action's key currently held down?
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Did the action's key go down this frame?
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register a key-down edge
    pub(crate) fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register a key-up edge
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Advance to the next frame, expiring the just-pressed edges.
    /// Call once per frame after the simulation has read the snapshot.
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Drop all state, as if every key were released
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_held_and_just_pressed() {
        let mut state = InputState::new();
        state.press(Action::MoveLeft);
        assert!(state.is_held(Action::MoveLeft));
        assert!(state.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_update_expires_just_pressed_but_not_held() {
        let mut state = InputState::new();
        state.press(Action::MoveLeft);
        state.update();
        assert!(state.is_held(Action::MoveLeft));
        assert!(!state.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_release_clears_held() {
        let mut state = InputState::new();
        state.press(Action::MoveLeft);
        state.update();
        state.release(Action::MoveLeft);
        assert!(!state.is_held(Action::MoveLeft));
    }

    #[test]
    fn test_repeated_press_is_not_a_new_edge() {
        let mut state = InputState::new();
        state.press(Action::Quit);
        state.update();
        state.press(Action::Quit);
        assert!(
            !state.just_pressed(Action::Quit),
            "A held key must not retrigger just_pressed"
        );
    }

    #[test]
    fn test_press_after_release_is_a_new_edge() {
        let mut state = InputState::new();
        state.press(Action::Quit);
        state.update();
        state.release(Action::Quit);
        state.press(Action::Quit);
        assert!(state.just_pressed(Action::Quit));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = InputState::new();
        state.press(Action::MoveUp);
        state.press(Action::MoveLeft);
        state.reset();
        assert!(!state.is_held(Action::MoveUp));
        assert!(!state.is_held(Action::MoveLeft));
        assert!(!state.just_pressed(Action::MoveLeft));
    }
}
