//! Common imports for integrating the selection core.

pub use crate::bulk::{ConfirmSummary, DeleteOutcome, SkipReason};
pub use crate::collab::{ConfirmModal, DataSource, DeleteApi, Notifier, Reload, RenderSync, Toast, ToastKind};
pub use crate::controller::{ClickKind, EventResult, Focus};
pub use crate::error::{DeleteFailure, SelectError};
pub use crate::item::SelectableItem;
pub use crate::keybinds::{Key, KeyCombo, Modifiers};
pub use crate::labels::Labels;
pub use crate::selection::SelectionState;
pub use crate::view::{ItemFlags, SelectionView};
pub use crate::{SelectionManager, SelectionManagerBuilder};
