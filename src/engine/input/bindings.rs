// Key-to-action binding table

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps physical keys to logical actions.
///
/// Several keys may map to the same action; one key maps to at most one
/// action, and rebinding a key replaces its previous target.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    /// Empty table with nothing bound
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Table pre-loaded with the default layout
    pub fn with_defaults() -> Self {
        let mut bindings = Self::empty();
        for (key, action) in default_bindings() {
            bindings.bind(key, action);
        }
        bindings
    }

    /// Bind a key to an action, replacing any previous binding for that key
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Remove the binding for a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Look up the action a key triggers
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}
