//! The schedule site as the delete target and reload source.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};
use schedule_lib::ScheduleClient;
use schedule_select::collab::{DeleteApi, Notifier, Reload, Toast};
use schedule_select::error::DeleteFailure;

use crate::board::ScheduleBoard;

/// Deletes through the API and refetches into the board.
pub struct RemoteSchedule {
    client: ScheduleClient,
    board: Arc<ScheduleBoard>,
    notifier: Arc<dyn Notifier>,
}

impl RemoteSchedule {
    pub fn new(client: ScheduleClient, board: Arc<ScheduleBoard>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            board,
            notifier,
        }
    }

    /// Fetch every item into the board.
    pub async fn fetch(&self) -> Result<usize, schedule_lib::Error> {
        let items = self.client.items().await?;
        let count = items.len();
        self.board.set_items(items);
        info!("fetched {} schedule entries from {}", count, self.client.base_url());
        Ok(count)
    }
}

#[async_trait]
impl DeleteApi for RemoteSchedule {
    async fn delete(&self, id: &str) -> Result<(), DeleteFailure> {
        let id: i64 = id
            .parse()
            .map_err(|_| DeleteFailure::new(format!("Invalid entry id: {}", id)))?;
        self.client
            .delete_item(id)
            .await
            .map_err(|e| delete_failure(id, &e))
    }
}

/// Toast text for a failed delete. A 400 from the site is almost always a
/// missing or stale CSRF token.
fn delete_failure(id: i64, e: &schedule_lib::Error) -> DeleteFailure {
    match e.status_code() {
        Some(404) => {
            warn!("entry {} was already gone", id);
            DeleteFailure::new(format!("Entry {} no longer exists", id))
        }
        Some(400) => {
            warn!("delete of {} rejected: {}", id, e);
            DeleteFailure::new(format!("{} (check the CSRF token with `config`)", e))
        }
        _ => DeleteFailure::new(e.to_string()),
    }
}

#[async_trait]
impl Reload for RemoteSchedule {
    async fn reload(&self) {
        if let Err(e) = self.fetch().await {
            error!("reload failed: {}", e);
            self.notifier.notify(Toast::error(format!("Reload failed: {}", e)));
        }
    }
}
