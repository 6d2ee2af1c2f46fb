// Keyboard shortcut bindings
use std::str::FromStr;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Focus the quick search / barcode input.
    FocusSearch,
    /// Close every open modal.
    CloseModals,
}

/// One key plus an optional Ctrl requirement, parsed from strings such as
/// `Ctrl+K` or `Escape`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub ctrl: bool,
    pub key: String,
}

impl FromStr for KeyBinding {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ctrl = false;
        let mut key = None;
        for part in s.split('+').map(str::trim) {
            match part {
                "" => return Err(ClientError::ConfigError(format!("empty key in shortcut '{}'", s))),
                p if p.eq_ignore_ascii_case("ctrl") || p.eq_ignore_ascii_case("control") => ctrl = true,
                p if key.is_none() => key = Some(p),
                _ => return Err(ClientError::ConfigError(format!("shortcut '{}' names more than one key", s))),
            }
        }
        let key = key.ok_or_else(|| ClientError::ConfigError(format!("shortcut '{}' has no key", s)))?;
        // Single characters arrive lower-case when only Ctrl is held.
        let key = if key.chars().count() == 1 { key.to_lowercase() } else { key.to_string() };
        Ok(KeyBinding { ctrl, key })
    }
}

impl KeyBinding {
    /// Ctrl bindings need Ctrl held; plain bindings fire whatever modifiers are held.
    pub fn matches(&self, key: &str, ctrl: bool) -> bool {
        self.key == key && (!self.ctrl || ctrl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMap {
    bindings: Vec<(KeyBinding, ShortcutAction)>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyBinding { ctrl: true, key: "k".to_string() }, ShortcutAction::FocusSearch),
                (KeyBinding { ctrl: false, key: "Escape".to_string() }, ShortcutAction::CloseModals),
            ],
        }
    }
}

impl ShortcutMap {
    pub fn from_config(search: &str, close_modals: &str) -> Result<Self, ClientError> {
        Ok(Self {
            bindings: vec![
                (search.parse()?, ShortcutAction::FocusSearch),
                (close_modals.parse()?, ShortcutAction::CloseModals),
            ],
        })
    }

    /// Every action bound to this key press, in binding order.
    pub fn resolve(&self, key: &str, ctrl: bool) -> Vec<ShortcutAction> {
        self.bindings
            .iter()
            .filter(|(binding, _)| binding.matches(key, ctrl))
            .map(|(_, action)| *action)
            .collect()
    }
}
