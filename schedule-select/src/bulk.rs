//! Confirmation-gated bulk delete.
//!
//! The flow reads the selection, drops IDs that are no longer in the current
//! snapshot, asks the user to confirm, then issues one delete per entry
//! concurrently. The batch succeeds only if every request succeeds.
//!
//! There is no per-entry bookkeeping: on failure the user sees the first error
//! and the selection is left exactly as it was, including entries that the
//! server did delete. A retry re-sends those and the stale-ID filter drops any
//! that vanished after a reload.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, info, warn};

use crate::collab::{ConfirmModal, DataSource, DeleteApi, Notifier, Reload, Toast};
use crate::error::DeleteFailure;
use crate::item::SelectableItem;
use crate::labels::Labels;
use crate::selection::SelectionState;
use crate::view::ViewSync;

/// Maximum number of entries listed in the confirmation body.
pub const SUMMARY_LIMIT: usize = 5;

/// Text handed to the confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmSummary {
    /// Title, including the number of entries.
    pub title: String,
    /// Line above the listed entries.
    pub heading: String,
    /// Display text of the first entries.
    pub lines: Vec<String>,
    /// Trailing "and N more" line when entries were left out.
    pub more: Option<String>,
    /// Confirm button label.
    pub confirm_label: String,
}

impl ConfirmSummary {
    /// Build the summary for the resolved entries.
    pub fn build<T: SelectableItem>(entries: &[T], labels: &Labels) -> Self {
        let lines = entries
            .iter()
            .take(SUMMARY_LIMIT)
            .map(|entry| entry.summary())
            .collect();
        let more = entries
            .len()
            .checked_sub(SUMMARY_LIMIT)
            .filter(|&rest| rest > 0)
            .map(|rest| labels.more_line(rest));

        Self {
            title: labels.confirm_title(entries.len()),
            heading: labels.confirm_heading.clone(),
            lines,
            more,
            confirm_label: labels.confirm_button.clone(),
        }
    }

    /// Plain-text body: heading, one line per entry, then the "more" line.
    pub fn body(&self) -> String {
        let mut body = self.heading.clone();
        for line in &self.lines {
            body.push_str("\n  ");
            body.push_str(line);
        }
        if let Some(more) = &self.more {
            body.push_str("\n  ");
            body.push_str(more);
        }
        body
    }
}

/// Why a delete request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing is selected.
    EmptySelection,
    /// Every selected ID is stale.
    NothingResolved,
    /// Another bulk delete is still running.
    InFlight,
}

/// How a bulk delete ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing was asked or sent.
    Skipped(SkipReason),
    /// The user declined the confirmation.
    Cancelled,
    /// Every request succeeded.
    Deleted(usize),
    /// At least one request failed; carries the first failure's message.
    Failed(String),
}

/// Keep the entries of `snapshot` whose IDs are selected, in snapshot order.
pub fn resolve<T: SelectableItem>(state: &SelectionState, snapshot: &[T]) -> Vec<T> {
    snapshot
        .iter()
        .filter(|item| state.is_selected(&item.id()))
        .cloned()
        .collect()
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs the bulk delete against the shared selection.
#[derive(Clone)]
pub struct BulkActionCoordinator<T: SelectableItem> {
    state: SelectionState,
    source: Arc<dyn DataSource<T>>,
    api: Arc<dyn DeleteApi>,
    reload: Arc<dyn Reload>,
    notifier: Arc<dyn Notifier>,
    modal: Arc<dyn ConfirmModal>,
    view: ViewSync,
    in_flight: Arc<AtomicBool>,
}

impl<T: SelectableItem> BulkActionCoordinator<T> {
    /// Create a coordinator over the shared selection.
    pub fn new(
        state: SelectionState,
        source: Arc<dyn DataSource<T>>,
        api: Arc<dyn DeleteApi>,
        reload: Arc<dyn Reload>,
        notifier: Arc<dyn Notifier>,
        modal: Arc<dyn ConfirmModal>,
        view: ViewSync,
    ) -> Self {
        Self {
            state,
            source,
            api,
            reload,
            notifier,
            modal,
            view,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if a bulk delete is running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Confirm and delete every selected entry still present in the snapshot.
    ///
    /// On success the selection is cleared, the list reloaded and an info
    /// toast shown. On failure only an error toast is shown; the selection is
    /// untouched and no reload happens.
    pub async fn request_delete(&self) -> DeleteOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            warn!("bulk delete already in flight, ignoring request");
            return DeleteOutcome::Skipped(SkipReason::InFlight);
        };

        if self.state.count() == 0 {
            debug!("bulk delete requested with empty selection");
            return DeleteOutcome::Skipped(SkipReason::EmptySelection);
        }

        let snapshot = self.source.snapshot();
        let entries = resolve(&self.state, &snapshot);
        let stale = self.state.count().saturating_sub(entries.len());
        if stale > 0 {
            debug!("dropping {} stale selected id(s)", stale);
        }
        if entries.is_empty() {
            return DeleteOutcome::Skipped(SkipReason::NothingResolved);
        }

        let summary = ConfirmSummary::build(&entries, self.view.labels());
        if !self.modal.confirm(summary).await {
            debug!("bulk delete of {} entries cancelled", entries.len());
            return DeleteOutcome::Cancelled;
        }

        // The list may have been reloaded while the modal was open.
        let confirmed: Vec<String> = entries.iter().map(|entry| entry.id()).collect();
        let ids: Vec<String> = resolve(&self.state, &self.source.snapshot())
            .iter()
            .map(|entry| entry.id())
            .filter(|id| confirmed.contains(id))
            .collect();
        if ids.is_empty() {
            debug!("every confirmed entry vanished before the delete was sent");
            return DeleteOutcome::Skipped(SkipReason::NothingResolved);
        }

        let count = ids.len();
        info!("deleting {} entries", count);

        match self.delete_all(ids).await {
            Ok(()) => {
                self.state.clear();
                self.reload.reload().await;
                let snapshot = self.source.snapshot();
                self.view.sync(&self.state, &snapshot);
                self.notifier
                    .notify(Toast::info(self.view.labels().deleted_toast(count)));
                DeleteOutcome::Deleted(count)
            }
            Err(failure) => {
                self.notifier.notify(Toast::error(failure.message.clone()));
                DeleteOutcome::Failed(failure.message)
            }
        }
    }

    /// Send every delete concurrently and wait for all of them to settle.
    ///
    /// Returns the first failure to arrive, if any.
    async fn delete_all(&self, ids: Vec<String>) -> Result<(), DeleteFailure> {
        let api = &self.api;
        let mut pending: FuturesUnordered<_> = ids
            .into_iter()
            .map(|id| async move {
                let result = api.delete(&id).await;
                (id, result)
            })
            .collect();

        let mut first_failure = None;
        while let Some((id, result)) = pending.next().await {
            if let Err(failure) = result {
                warn!("delete of {} failed: {}", id, failure);
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
        }

        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("entry {}", i)).collect()
    }

    #[test]
    fn test_summary_lists_everything_up_to_limit() {
        let summary = ConfirmSummary::build(&rows(5), &Labels::default());
        assert_eq!(summary.title, "Delete 5 entries?");
        assert_eq!(summary.lines.len(), 5);
        assert_eq!(summary.more, None);
    }

    #[test]
    fn test_summary_truncates_after_limit() {
        let summary = ConfirmSummary::build(&rows(8), &Labels::default());
        assert_eq!(summary.lines, rows(5));
        assert_eq!(summary.more.as_deref(), Some("and 3 more…"));
        assert!(summary.body().ends_with("and 3 more…"));
        assert!(summary.body().starts_with("The following entries will be deleted:"));
    }

    #[test]
    fn test_resolve_keeps_snapshot_order_and_drops_stale() {
        let snapshot = rows(4);
        let state = SelectionState::new();
        state.enter();
        state.add("entry 3");
        state.add("gone");
        state.add("entry 1");

        let resolved = resolve(&state, &snapshot);
        assert_eq!(resolved, vec!["entry 1".to_string(), "entry 3".to_string()]);
    }

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = InFlight::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlight::acquire(&flag).is_none());
        drop(guard);
        assert!(InFlight::acquire(&flag).is_some());
    }
}
