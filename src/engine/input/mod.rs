// Input handling system
//
// Physical keys are mapped through a binding table onto logical actions, and
// the game only ever reads a per-frame snapshot of those actions.
//
// ## Architecture
//
// - `action`: Defines game actions and the default key layout
// - `bindings`: Key-to-action binding table with remapping
// - `state`: The per-frame snapshot (held keys and press edges)
// - `manager`: Routes winit keyboard events into the snapshot
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, InputManager};
//
// let mut input = InputManager::new();
//
// // In the event loop, feed keyboard events through
// input.process_keyboard_event(&key_event);
//
// // Query the snapshot from the simulation
// if input.state().is_held(Action::MoveLeft) {
//     // walk left
// }
//
// // At the end of each frame, expire the press edges
// input.update();
// ```

pub mod action;
pub mod bindings;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use bindings::KeyBindings;
pub use manager::InputManager;
pub use state::InputState;
