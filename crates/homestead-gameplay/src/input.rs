//! Input mapping from keys to farm actions.
//!
//! Keys are plain characters. Each action has a primary key and an optional
//! secondary key, and bindings can be changed at runtime.

use homestead_common::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur in the input system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Key already bound to another action
    #[error("key {key:?} already bound to action: {action:?}")]
    KeyAlreadyBound {
        /// The key that's already bound
        key: char,
        /// The action it's bound to
        action: Action,
    },
}

/// Farm actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move up (W key by default)
    MoveUp,
    /// Move down (S key by default)
    MoveDown,
    /// Move left (A key by default)
    MoveLeft,
    /// Move right (D key by default)
    MoveRight,
    /// Till the tile under the player (T)
    Till,
    /// Untill the tile under the player (U)
    Untill,
    /// Plant the selected seed (P)
    Plant,
    /// Harvest the plant under the player (H)
    Harvest,
    /// Remove the plant under the player (R)
    RemovePlant,
    /// Sleep until the next day (N)
    NextDay,
}

impl Action {
    /// All actions.
    pub const ALL: [Self; 10] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Till,
        Self::Untill,
        Self::Plant,
        Self::Harvest,
        Self::RemovePlant,
        Self::NextDay,
    ];

    /// Returns the name used to refer to this action in commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::Till => "till",
            Self::Untill => "untill",
            Self::Plant => "plant",
            Self::Harvest => "harvest",
            Self::RemovePlant => "remove_plant",
            Self::NextDay => "next_day",
        }
    }

    /// Looks up an action by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Returns the movement direction for move actions.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: char,
    /// Optional secondary key
    pub secondary: Option<char>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: char) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: char, secondary: char) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Check if a key matches this binding.
    #[must_use]
    pub fn matches(&self, key: char) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Action to key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<Action, KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default keys.
    #[must_use]
    pub fn new() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        bindings.set_default_bindings();
        bindings
    }

    /// Set default key bindings.
    pub fn set_default_bindings(&mut self) {
        self.bindings.clear();
        for (action, key) in [
            (Action::MoveUp, 'w'),
            (Action::MoveDown, 's'),
            (Action::MoveLeft, 'a'),
            (Action::MoveRight, 'd'),
            (Action::Till, 't'),
            (Action::Untill, 'u'),
            (Action::Plant, 'p'),
            (Action::Harvest, 'h'),
            (Action::RemovePlant, 'r'),
            (Action::NextDay, 'n'),
        ] {
            self.bindings.insert(action, KeyBinding::new(key));
        }
    }

    /// Rebind an action.
    ///
    /// Fails if one of the new keys already belongs to another action.
    pub fn rebind(&mut self, action: Action, binding: KeyBinding) -> Result<(), InputError> {
        let keys = std::iter::once(binding.primary).chain(binding.secondary);
        for key in keys {
            if let Some(owner) = self.action_for(key).filter(|&owner| owner != action) {
                return Err(InputError::KeyAlreadyBound { key, action: owner });
            }
        }
        self.bindings.insert(action, binding);
        Ok(())
    }

    /// Look up the action bound to a key.
    #[must_use]
    pub fn action_for(&self, key: char) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(_, binding)| binding.matches(key))
            .map(|(&action, _)| action)
    }
}
