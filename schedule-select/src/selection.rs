//! Selection state for the schedule list.
//!
//! Selection uses string IDs so it stays meaningful while the snapshot is
//! reloaded underneath it. The anchor is a snapshot index and is only a hint
//! for the next range selection.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::item::SelectableItem;

#[derive(Debug, Default)]
struct SelectionInner {
    /// Selection mode flag.
    active: bool,
    /// Currently selected IDs.
    selected: HashSet<String>,
    /// Starting index for the next range selection.
    anchor: Option<usize>,
}

/// Shared selection state.
///
/// Cheap to clone; every clone refers to the same underlying state, which is
/// how the controller and the bulk coordinator share one selection per
/// session. Nothing is ever added while selection mode is off, so an inactive
/// state always has an empty selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    inner: Arc<RwLock<SelectionInner>>,
}

impl SelectionState {
    /// Create a new inactive, empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    /// Enter selection mode. Always starts from an empty selection.
    pub fn enter(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.active = true;
            guard.selected.clear();
            guard.anchor = None;
        }
    }

    /// Leave selection mode, dropping the selection and anchor.
    pub fn exit(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.active = false;
            guard.selected.clear();
            guard.anchor = None;
        }
    }

    /// Check if selection mode is active.
    pub fn is_active(&self) -> bool {
        self.inner.read().map(|g| g.active).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Membership
    // -------------------------------------------------------------------------

    /// Add an ID to the selection.
    pub fn add(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write()
            && guard.active
        {
            guard.selected.insert(id.to_string());
        }
    }

    /// Remove an ID from the selection.
    pub fn remove(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.remove(id);
        }
    }

    /// Toggle an ID. Returns whether it is selected afterwards.
    pub fn toggle(&self, id: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if guard.selected.remove(id) {
            false
        } else if guard.active {
            guard.selected.insert(id.to_string());
            true
        } else {
            false
        }
    }

    /// Add every snapshot entry whose index lies between `from` and `to`
    /// (inclusive, in either order). Indices past the end are ignored.
    ///
    /// This is a union with the existing selection, never a replacement.
    pub fn select_range<T: SelectableItem>(&self, from: usize, to: usize, snapshot: &[T]) {
        let Some(last) = snapshot.len().checked_sub(1) else {
            return;
        };
        let start = from.min(to);
        let end = from.max(to).min(last);
        if start > end {
            return;
        }

        if let Ok(mut guard) = self.inner.write()
            && guard.active
        {
            for item in &snapshot[start..=end] {
                guard.selected.insert(item.id());
            }
        }
    }

    /// Select every entry in the snapshot and drop the anchor.
    pub fn select_all<T: SelectableItem>(&self, snapshot: &[T]) {
        if let Ok(mut guard) = self.inner.write()
            && guard.active
        {
            guard.selected.extend(snapshot.iter().map(|item| item.id()));
            guard.anchor = None;
        }
    }

    /// Clear the selection and anchor. Selection mode is left as is.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.clear();
            guard.anchor = None;
        }
    }

    /// Select all when anything in the snapshot is unselected, otherwise clear.
    pub fn toggle_select_all<T: SelectableItem>(&self, snapshot: &[T]) {
        if self.is_all_selected(snapshot) {
            self.clear();
        } else {
            self.select_all(snapshot);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selected.contains(id))
            .unwrap_or(false)
    }

    /// Get the number of selected IDs.
    pub fn count(&self) -> usize {
        self.inner.read().map(|g| g.selected.len()).unwrap_or(0)
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .inner
            .read()
            .map(|g| g.selected.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// True when the snapshot is non-empty and every one of its IDs is selected.
    pub fn is_all_selected<T: SelectableItem>(&self, snapshot: &[T]) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        self.inner
            .read()
            .map(|g| snapshot.iter().all(|item| g.selected.contains(&item.id())))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Anchor
    // -------------------------------------------------------------------------

    /// Get the anchor index for range selection.
    pub fn anchor(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.anchor)
    }

    /// Set the anchor index. Ignored while selection mode is off.
    pub fn set_anchor(&self, index: usize) {
        if let Ok(mut guard) = self.inner.write()
            && guard.active
        {
            guard.anchor = Some(index);
        }
    }
}
