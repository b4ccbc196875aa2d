//! Configurable text for the selection toolbar and delete confirmation.

use serde::{Deserialize, Serialize};

/// Text strings used by the toolbar, the confirmation and the toasts.
///
/// Every field is optional when deserializing; missing ones fall back to the
/// defaults. Templates understand `{delete}`, `{count}` and `{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Delete button text; rendered as `"{delete_label} ({count})"`.
    pub delete_label: String,
    /// Toggle text while not everything is selected.
    pub select_all_label: String,
    /// Toggle text once everything is selected.
    pub deselect_all_label: String,
    /// Confirmation title.
    pub confirm_title: String,
    /// Line above the list of entries in the confirmation.
    pub confirm_heading: String,
    /// Trailing line when the confirmation list is truncated.
    pub more_line: String,
    /// Label of the confirm button.
    pub confirm_button: String,
    /// Toast shown after a successful delete.
    pub deleted_toast: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            delete_label: "Delete".into(),
            select_all_label: "Select all".into(),
            deselect_all_label: "Deselect all".into(),
            confirm_title: "{delete} {count} entries?".into(),
            confirm_heading: "The following entries will be deleted:".into(),
            more_line: "and {n} more…".into(),
            confirm_button: "Delete".into(),
            deleted_toast: "Deleted: {count}".into(),
        }
    }
}

impl Labels {
    /// Delete button text for the given selection count.
    pub fn delete_button(&self, count: usize) -> String {
        format!("{} ({})", self.delete_label, count)
    }

    /// Select-all toggle text.
    pub fn select_all_button(&self, all_selected: bool) -> &str {
        if all_selected {
            &self.deselect_all_label
        } else {
            &self.select_all_label
        }
    }

    /// Confirmation title for `count` entries.
    pub fn confirm_title(&self, count: usize) -> String {
        fill(&self.confirm_title, &self.delete_label, count, 0)
    }

    /// Truncation line for `n` entries not listed.
    pub fn more_line(&self, n: usize) -> String {
        fill(&self.more_line, &self.delete_label, 0, n)
    }

    /// Success toast for `count` deleted entries.
    pub fn deleted_toast(&self, count: usize) -> String {
        fill(&self.deleted_toast, &self.delete_label, count, 0)
    }
}

fn fill(template: &str, delete: &str, count: usize, n: usize) -> String {
    template
        .replace("{delete}", delete)
        .replace("{count}", &count.to_string())
        .replace("{n}", &n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_texts() {
        let labels = Labels::default();
        assert_eq!(labels.delete_button(3), "Delete (3)");
        assert_eq!(labels.confirm_title(7), "Delete 7 entries?");
        assert_eq!(labels.more_line(2), "and 2 more…");
        assert_eq!(labels.deleted_toast(4), "Deleted: 4");
        assert_eq!(labels.select_all_button(false), "Select all");
        assert_eq!(labels.select_all_button(true), "Deselect all");
    }

    #[test]
    fn test_custom_delete_label_flows_into_title() {
        let labels = Labels {
            delete_label: "Удалить".into(),
            confirm_title: "{delete} {count} занятий?".into(),
            ..Default::default()
        };
        assert_eq!(labels.delete_button(2), "Удалить (2)");
        assert_eq!(labels.confirm_title(2), "Удалить 2 занятий?");
    }
}
