//! Schedule listing and deletion.

use reqwest::Method;

use crate::ScheduleClient;
use crate::error::{ApiError, Error};
use crate::model::ScheduleItem;

/// Path of the full schedule feed.
pub const SCHEDULE_DATA_PATH: &str = "/admin/schedule/data";

/// Path of a single schedule entry.
pub fn item_path(id: i64) -> String {
    format!("/admin/schedule/item/{}", id)
}

impl ScheduleClient {
    /// Fetches every schedule entry, ordered by day and time.
    pub async fn items(&self) -> Result<Vec<ScheduleItem>, Error> {
        let url = self.endpoint(SCHEDULE_DATA_PATH);
        let response = self.send(self.request(Method::GET, &url)).await?;
        let body = response.text().await.map_err(ApiError::from)?;

        let items = serde_json::from_str::<Vec<ScheduleItem>>(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
        Ok(items)
    }

    /// Fetches the entries of one day, keeping the feed order.
    pub async fn items_for_day(&self, day: u8) -> Result<Vec<ScheduleItem>, Error> {
        let items = self.items().await?;
        Ok(items.into_iter().filter(|item| item.day_of_week == day).collect())
    }

    /// Deletes one entry.
    pub async fn delete_item(&self, id: i64) -> Result<(), Error> {
        let url = self.endpoint(&item_path(id));
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}
