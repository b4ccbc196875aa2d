//! Projection of the selection state into visual flags.

use std::sync::Arc;

use crate::collab::RenderSync;
use crate::item::SelectableItem;
use crate::labels::Labels;
use crate::selection::SelectionState;

/// Visual flags for one rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFlags {
    /// Entry ID.
    pub id: String,
    /// Entry can be clicked to select (selection mode is on).
    pub selectable: bool,
    /// Entry is currently selected.
    pub selected: bool,
}

/// Everything a renderer needs to show the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    /// Flags per snapshot entry, in snapshot order.
    pub items: Vec<ItemFlags>,
    /// Number of selected IDs.
    pub count: usize,
    /// Every entry of a non-empty snapshot is selected.
    pub all_selected: bool,
    /// Selection toolbar is shown and the mode button is pressed.
    pub toolbar_active: bool,
    /// Delete button text, including the count.
    pub delete_label: String,
    /// Delete button is clickable.
    pub delete_enabled: bool,
    /// Select-all / deselect-all toggle text.
    pub select_all_label: String,
}

impl SelectionView {
    /// Project the state against a snapshot. Pure and idempotent.
    pub fn project<T: SelectableItem>(state: &SelectionState, snapshot: &[T], labels: &Labels) -> Self {
        let active = state.is_active();
        let items = snapshot
            .iter()
            .map(|item| {
                let id = item.id();
                let selected = active && state.is_selected(&id);
                ItemFlags {
                    id,
                    selectable: active,
                    selected,
                }
            })
            .collect();
        let count = state.count();
        let all_selected = state.is_all_selected(snapshot);

        Self {
            items,
            count,
            all_selected,
            toolbar_active: active,
            delete_label: labels.delete_button(count),
            delete_enabled: count > 0,
            select_all_label: labels.select_all_button(all_selected).to_string(),
        }
    }

    /// Flags for one entry.
    pub fn flags(&self, id: &str) -> Option<&ItemFlags> {
        self.items.iter().find(|flags| flags.id == id)
    }
}

/// Hands projections to the rendering collaborator.
#[derive(Clone)]
pub struct ViewSync {
    renderer: Arc<dyn RenderSync>,
    labels: Arc<Labels>,
}

impl ViewSync {
    /// Create a view sync for the given renderer.
    pub fn new(renderer: Arc<dyn RenderSync>, labels: Arc<Labels>) -> Self {
        Self { renderer, labels }
    }

    /// Project and render. Returns the projection that was rendered.
    pub fn sync<T: SelectableItem>(&self, state: &SelectionState, snapshot: &[T]) -> SelectionView {
        let view = SelectionView::project(state, snapshot, &self.labels);
        self.renderer.render(&view);
        view
    }

    /// Labels used for projections.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}
