//! Input interpretation for the schedule list.
//!
//! Pure decision logic: a click or key press plus the current snapshot is
//! mapped onto [`SelectionState`] mutations or a [`KeyCommand`] for the caller
//! to carry out. Nothing here renders or talks to collaborators.

use log::debug;

use crate::item::SelectableItem;
use crate::keybinds::{Key, KeyCombo, Modifiers};
use crate::selection::SelectionState;

/// How a click on a list entry should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickKind {
    /// Plain click: toggle the entry.
    #[default]
    Plain,
    /// Shift+click: extend from the anchor to this entry.
    ShiftExtend,
    /// Ctrl/Cmd+click: toggle the entry.
    CtrlToggle,
}

impl ClickKind {
    /// Derive the click kind from held modifiers. Shift wins over Ctrl/Cmd.
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift {
            Self::ShiftExtend
        } else if modifiers.primary() {
            Self::CtrlToggle
        } else {
            Self::Plain
        }
    }
}

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Focus is on the list or page.
    #[default]
    List,
    /// An input-bearing control has focus; select-all is suppressed.
    TextInput,
}

/// Action requested by a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Leave selection mode.
    ExitMode,
    /// Select everything, or clear if everything is already selected.
    ToggleSelectAll,
    /// Start the bulk delete flow.
    RequestDelete,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Apply a click on the entry `id` at `index` of `snapshot`.
///
/// Returns `false` (and changes nothing) while selection mode is off.
/// A shift-click without an anchor degrades to a plain toggle. After every
/// dispatch the clicked index becomes the new anchor, so repeated shift-clicks
/// chain from the last clicked position.
pub fn handle<T: SelectableItem>(
    state: &SelectionState,
    kind: ClickKind,
    id: &str,
    index: usize,
    snapshot: &[T],
) -> bool {
    if !state.is_active() {
        return false;
    }

    match (kind, state.anchor()) {
        (ClickKind::ShiftExtend, Some(anchor)) => {
            debug!("range select {}..={} (clicked {})", anchor, index, id);
            state.select_range(anchor, index, snapshot);
        }
        _ => {
            let selected = state.toggle(id);
            debug!("toggled {} -> {}", id, selected);
        }
    }

    state.set_anchor(index);
    true
}

/// Map a key press onto a selection command.
///
/// Only active while selection mode is on. Escape always exits, Ctrl/Cmd+A
/// toggles select-all unless a text field has focus, and Delete starts the
/// bulk delete only when something is selected.
pub fn interpret_key(state: &SelectionState, key: &KeyCombo, focus: Focus) -> Option<KeyCommand> {
    if !state.is_active() {
        return None;
    }

    match key.key {
        Key::Escape => Some(KeyCommand::ExitMode),
        Key::Char(c)
            if key.modifiers.primary() && c.eq_ignore_ascii_case(&'a') && focus != Focus::TextInput =>
        {
            Some(KeyCommand::ToggleSelectAll)
        }
        Key::Delete if state.count() > 0 => Some(KeyCommand::RequestDelete),
        _ => None,
    }
}
