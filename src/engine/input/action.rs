// Logical input actions, decoupled from physical keys

use winit::keyboard::KeyCode;

/// Everything the game can be told to do through input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Meta actions
    Quit,
    MapSlot1,
    MapSlot2,
    ToggleHitboxes,
}

impl Action {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Quit => "quit",
            Action::MapSlot1 => "map_slot_1",
            Action::MapSlot2 => "map_slot_2",
            Action::ToggleHitboxes => "toggle_hitboxes",
        }
    }
}

/// Default keyboard layout: arrows and WASD both steer the hero
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement (arrow keys)
        (KeyCode::ArrowUp, Action::MoveUp),
        (KeyCode::ArrowDown, Action::MoveDown),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        // Movement (WASD mirror)
        (KeyCode::KeyW, Action::MoveUp),
        (KeyCode::KeyS, Action::MoveDown),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        // Meta
        (KeyCode::Escape, Action::Quit),
        (KeyCode::Digit1, Action::MapSlot1),
        (KeyCode::Digit2, Action::MapSlot2),
        (KeyCode::F3, Action::ToggleHitboxes),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::MoveUp, Action::MoveUp);
        assert_ne!(Action::MoveUp, Action::MoveDown);
    }

    #[test]
    fn test_action_names_are_unique() {
        let actions = [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Quit,
            Action::MapSlot1,
            Action::MapSlot2,
            Action::ToggleHitboxes,
        ];

        for (i, a) in actions.iter().enumerate() {
            for (j, b) in actions.iter().enumerate() {
                if i != j {
                    assert_ne!(a.name(), b.name(), "Action names must be unique");
                }
            }
        }
    }

    #[test]
    fn test_default_bindings_cover_movement() {
        let bindings = default_bindings();

        for action in [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
        ] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "No default key for {:?}",
                action
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys_in_defaults() {
        let bindings = default_bindings();
        let mut seen_keys = std::collections::HashSet::new();
        for (key, _) in bindings {
            assert!(
                seen_keys.insert(key),
                "Duplicate key found in default bindings"
            );
        }
    }
}
