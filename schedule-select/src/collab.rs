//! Collaborator traits the core is wired to.
//!
//! The core never fetches, renders or talks to the network itself. The
//! integrator supplies implementations of these traits when building a
//! [`SelectionManager`](crate::SelectionManager).

use async_trait::async_trait;

use crate::bulk::ConfirmSummary;
use crate::error::DeleteFailure;
use crate::item::SelectableItem;
use crate::view::SelectionView;

/// Source of the current snapshot: the ordered entries of the active group.
///
/// Called on every dispatch; implementations must always return the current
/// group's entries, never a cached copy of an earlier group.
pub trait DataSource<T: SelectableItem>: Send + Sync {
    /// Entries of the active group, in display order.
    fn snapshot(&self) -> Vec<T>;
}

/// Remote collection that entries are deleted from.
#[async_trait]
pub trait DeleteApi: Send + Sync {
    /// Delete one entry by ID.
    async fn delete(&self, id: &str) -> Result<(), DeleteFailure>;
}

/// Re-fetches and re-renders the list.
///
/// The core only triggers a reload; it does not interpret the outcome.
#[async_trait]
pub trait Reload: Send + Sync {
    /// Reload the list.
    async fn reload(&self);
}

/// Toast kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral notification.
    Info,
    /// Something went wrong.
    Error,
}

/// A toast notification.
///
/// # Example
///
/// ```
/// use schedule_select::collab::{Toast, ToastKind};
///
/// let toast = Toast::error("Connection failed");
/// assert_eq!(toast.kind, ToastKind::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown to the user.
    pub message: String,
    /// How the toast should be styled.
    pub kind: ToastKind,
}

impl Toast {
    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
        }
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

/// Shows toasts.
pub trait Notifier: Send + Sync {
    /// Show a toast.
    fn notify(&self, toast: Toast);
}

/// Blocking confirmation dialog.
#[async_trait]
pub trait ConfirmModal: Send + Sync {
    /// Present the summary and wait for the user.
    ///
    /// Returns `true` only on an explicit confirmation; dismissing or
    /// cancelling returns `false`.
    async fn confirm(&self, summary: ConfirmSummary) -> bool;
}

/// Applies the visual selection state to the rendered list.
pub trait RenderSync: Send + Sync {
    /// Render the projected view.
    fn render(&self, view: &SelectionView);
}
