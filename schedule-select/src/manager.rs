//! The wired selection manager.

use std::sync::Arc;

use log::debug;

use crate::bulk::{BulkActionCoordinator, DeleteOutcome};
use crate::collab::{ConfirmModal, DataSource, DeleteApi, Notifier, Reload, RenderSync};
use crate::controller::{self, ClickKind, EventResult, Focus, KeyCommand};
use crate::error::SelectError;
use crate::item::SelectableItem;
use crate::keybinds::KeyCombo;
use crate::labels::Labels;
use crate::selection::SelectionState;
use crate::view::{SelectionView, ViewSync};

/// Selection manager for one admin session.
///
/// Owns the session's [`SelectionState`] and is the registration surface the
/// rendering layer calls into: clicks, key presses, group switches and the
/// toolbar buttons. Every state change ends with a render through the
/// [`RenderSync`] collaborator.
///
/// Cheap to clone; clones share the same state.
///
/// # Example
///
/// ```ignore
/// let manager = SelectionManager::builder()
///     .data_source(board.clone())
///     .delete_api(client)
///     .reload(board.clone())
///     .notifier(console.clone())
///     .confirm_modal(console.clone())
///     .renderer(console)
///     .build()?;
///
/// manager.enter_mode();
/// manager.click(ClickKind::Plain, 2);
/// manager.request_delete().await;
/// ```
#[derive(Clone)]
pub struct SelectionManager<T: SelectableItem> {
    state: SelectionState,
    source: Arc<dyn DataSource<T>>,
    view: ViewSync,
    bulk: BulkActionCoordinator<T>,
}

impl<T: SelectableItem> SelectionManager<T> {
    /// Creates a new builder.
    pub fn builder() -> SelectionManagerBuilder<T> {
        SelectionManagerBuilder::new()
    }

    /// The shared selection state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Check if selection mode is active.
    pub fn is_selection_mode(&self) -> bool {
        self.state.is_active()
    }

    /// Number of selected IDs.
    pub fn selection_count(&self) -> usize {
        self.state.count()
    }

    /// Check if a bulk delete is running.
    pub fn is_deleting(&self) -> bool {
        self.bulk.is_in_flight()
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    /// Enter selection mode with an empty selection.
    pub fn enter_mode(&self) -> SelectionView {
        debug!("entering selection mode");
        self.state.enter();
        self.refresh()
    }

    /// Leave selection mode, dropping the selection.
    pub fn exit_mode(&self) -> SelectionView {
        debug!("leaving selection mode");
        self.state.exit();
        self.refresh()
    }

    /// Enter or leave selection mode.
    pub fn toggle_mode(&self) -> SelectionView {
        if self.state.is_active() {
            self.exit_mode()
        } else {
            self.enter_mode()
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a click on the entry at `index` of the current snapshot.
    ///
    /// Returns `false` when selection mode is off or the index is out of range.
    pub fn click(&self, kind: ClickKind, index: usize) -> bool {
        let snapshot = self.source.snapshot();
        let Some(item) = snapshot.get(index) else {
            return false;
        };
        let handled = controller::handle(&self.state, kind, &item.id(), index, &snapshot);
        if handled {
            self.view.sync(&self.state, &snapshot);
        }
        handled
    }

    /// Handle a key press.
    ///
    /// The Delete key runs the whole bulk delete flow before returning.
    pub async fn handle_key(&self, key: &KeyCombo, focus: Focus) -> EventResult {
        let Some(command) = controller::interpret_key(&self.state, key, focus) else {
            return EventResult::Ignored;
        };
        debug!("key {} -> {:?}", key, command);

        match command {
            KeyCommand::ExitMode => {
                self.exit_mode();
            }
            KeyCommand::ToggleSelectAll => {
                self.toggle_select_all();
            }
            KeyCommand::RequestDelete => {
                self.request_delete().await;
            }
        }
        EventResult::Consumed
    }

    /// Select every entry of the snapshot, or clear if all are selected.
    pub fn toggle_select_all(&self) -> SelectionView {
        let snapshot = self.source.snapshot();
        self.state.toggle_select_all(&snapshot);
        self.view.sync(&self.state, &snapshot)
    }

    /// The active group changed; selection mode stays but the selection goes.
    pub fn on_group_change(&self) {
        if self.state.is_active() {
            debug!("group changed, clearing selection");
            self.state.clear();
            self.refresh();
        }
    }

    /// Run the confirmation-gated bulk delete.
    pub async fn request_delete(&self) -> DeleteOutcome {
        let outcome = self.bulk.request_delete().await;
        debug!("bulk delete finished: {:?}", outcome);
        outcome
    }

    /// Re-render against the current snapshot.
    pub fn refresh(&self) -> SelectionView {
        let snapshot = self.source.snapshot();
        self.view.sync(&self.state, &snapshot)
    }
}

/// Builder for a [`SelectionManager`].
///
/// Every collaborator is required; [`build`](Self::build) fails with
/// [`SelectError::Configuration`] naming the first one that is missing.
/// Labels fall back to [`Labels::default`].
pub struct SelectionManagerBuilder<T: SelectableItem> {
    source: Option<Arc<dyn DataSource<T>>>,
    api: Option<Arc<dyn DeleteApi>>,
    reload: Option<Arc<dyn Reload>>,
    notifier: Option<Arc<dyn Notifier>>,
    modal: Option<Arc<dyn ConfirmModal>>,
    renderer: Option<Arc<dyn RenderSync>>,
    labels: Labels,
}

impl<T: SelectableItem> SelectionManagerBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            source: None,
            api: None,
            reload: None,
            notifier: None,
            modal: None,
            renderer: None,
            labels: Labels::default(),
        }
    }

    /// Sets the snapshot source.
    pub fn data_source(mut self, source: Arc<dyn DataSource<T>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the remote collection entries are deleted from.
    pub fn delete_api(mut self, api: Arc<dyn DeleteApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Sets the reload hook run after a successful delete.
    pub fn reload(mut self, reload: Arc<dyn Reload>) -> Self {
        self.reload = Some(reload);
        self
    }

    /// Sets the toast notifier.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets the confirmation modal.
    pub fn confirm_modal(mut self, modal: Arc<dyn ConfirmModal>) -> Self {
        self.modal = Some(modal);
        self
    }

    /// Sets the renderer.
    pub fn renderer(mut self, renderer: Arc<dyn RenderSync>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sets the text labels.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Builds the manager.
    pub fn build(self) -> Result<SelectionManager<T>, SelectError> {
        let source = self.source.ok_or(SelectError::missing("data source"))?;
        let api = self.api.ok_or(SelectError::missing("delete api"))?;
        let reload = self.reload.ok_or(SelectError::missing("reload"))?;
        let notifier = self.notifier.ok_or(SelectError::missing("notifier"))?;
        let modal = self.modal.ok_or(SelectError::missing("confirm modal"))?;
        let renderer = self.renderer.ok_or(SelectError::missing("renderer"))?;

        let state = SelectionState::new();
        let view = ViewSync::new(renderer, Arc::new(self.labels));
        let bulk = BulkActionCoordinator::new(
            state.clone(),
            Arc::clone(&source),
            api,
            reload,
            notifier,
            modal,
            view.clone(),
        );

        Ok(SelectionManager {
            state,
            source,
            view,
            bulk,
        })
    }
}

impl<T: SelectableItem> Default for SelectionManagerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
