// Framework-agnostic UI helpers used by the desktop shell
pub mod forms;
pub mod shortcuts;
pub mod state;

pub use forms::{FieldError, FieldRule, FormValidation};
pub use shortcuts::{KeyBinding, ShortcutAction, ShortcutMap};
pub use state::{Animation, UiState, ANIMATION_DURATION};
