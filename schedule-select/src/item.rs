//! SelectableItem trait for entries that can appear in a selectable snapshot.

/// Trait for entries that can be selected in the schedule list.
///
/// Selection tracks entries by their string ID, so an ID must be unique within
/// a snapshot and stable across reloads.
pub trait SelectableItem: Send + Sync + Clone + 'static {
    /// Stable, unique identifier.
    fn id(&self) -> String;

    /// One-line text shown for this entry in the delete confirmation.
    fn summary(&self) -> String {
        self.id()
    }
}

impl SelectableItem for String {
    fn id(&self) -> String {
        self.clone()
    }
}
