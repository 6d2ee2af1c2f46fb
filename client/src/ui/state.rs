// View-owned UI state: loading indicator, open modals, search focus and
// transient element animations. The owning view passes it around or puts it
// behind its own reactive handle; nothing here is global.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::shortcuts::ShortcutAction;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Shake,
    Pulse,
}

impl Animation {
    pub fn classes(&self) -> &'static str {
        match self {
            Animation::Shake => "animate__animated animate__shakeX",
            Animation::Pulse => "animate__animated animate__pulse",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    loading: bool,
    open_modals: BTreeSet<String>,
    search_focus_requested: bool,
    animations: BTreeMap<String, Animation>,
}

impl UiState {
    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    pub fn hide_loading(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn open_modal(&mut self, id: impl Into<String>) {
        self.open_modals.insert(id.into());
    }

    pub fn close_modal(&mut self, id: &str) {
        self.open_modals.remove(id);
    }

    pub fn is_modal_open(&self, id: &str) -> bool {
        self.open_modals.contains(id)
    }

    /// Closes everything and returns the ids that were open.
    pub fn close_all_modals(&mut self) -> Vec<String> {
        std::mem::take(&mut self.open_modals).into_iter().collect()
    }

    pub fn request_search_focus(&mut self) {
        self.search_focus_requested = true;
    }

    /// Consumes a pending focus request.
    pub fn take_search_focus(&mut self) -> bool {
        std::mem::take(&mut self.search_focus_requested)
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::FocusSearch => self.request_search_focus(),
            ShortcutAction::CloseModals => {
                let closed = self.close_all_modals();
                if !closed.is_empty() {
                    tracing::debug!(count = closed.len(), "Closed modals");
                }
            }
        }
    }

    /// Starts an animation on `element`; the view clears it after
    /// [`ANIMATION_DURATION`].
    pub fn animate(&mut self, element: impl Into<String>, animation: Animation) {
        self.animations.insert(element.into(), animation);
    }

    pub fn clear_animation(&mut self, element: &str) {
        self.animations.remove(element);
    }

    pub fn animation_classes(&self, element: &str) -> &'static str {
        self.animations.get(element).map(Animation::classes).unwrap_or("")
    }
}
