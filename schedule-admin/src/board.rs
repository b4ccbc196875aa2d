//! The fetched schedule and the day being edited.

use std::sync::RwLock;

use schedule_lib::model::{ScheduleItem, is_valid_day};
use schedule_select::collab::DataSource;
use schedule_select::item::SelectableItem;

/// A schedule item as a selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry(pub ScheduleItem);

impl SelectableItem for ScheduleEntry {
    fn id(&self) -> String {
        self.0.id.to_string()
    }

    fn summary(&self) -> String {
        self.0.summary_line()
    }
}

struct BoardInner {
    items: Vec<ScheduleItem>,
    day: u8,
}

/// Every fetched schedule item plus the active day.
///
/// The snapshot is the active day's items in feed order.
pub struct ScheduleBoard {
    inner: RwLock<BoardInner>,
}

impl ScheduleBoard {
    pub fn new(day: u8) -> Self {
        Self {
            inner: RwLock::new(BoardInner {
                items: Vec::new(),
                day: if is_valid_day(day) { day } else { 0 },
            }),
        }
    }

    /// The active day.
    pub fn day(&self) -> u8 {
        self.inner.read().map(|inner| inner.day).unwrap_or(0)
    }

    /// Switch the active day. Returns `false` if the day is invalid or unchanged.
    pub fn set_day(&self, day: u8) -> bool {
        if !is_valid_day(day) {
            return false;
        }
        match self.inner.write() {
            Ok(mut inner) if inner.day != day => {
                inner.day = day;
                true
            }
            _ => false,
        }
    }

    /// Replace every item with a fresh fetch.
    pub fn set_items(&self, items: Vec<ScheduleItem>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.items = items;
        }
    }

    /// Number of items across all days.
    pub fn total(&self) -> usize {
        self.inner.read().map(|inner| inner.items.len()).unwrap_or(0)
    }

    /// Entries of the active day.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        inner
            .items
            .iter()
            .filter(|item| item.day_of_week == inner.day)
            .cloned()
            .map(ScheduleEntry)
            .collect()
    }
}

impl DataSource<ScheduleEntry> for ScheduleBoard {
    fn snapshot(&self) -> Vec<ScheduleEntry> {
        self.entries()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: i64, day: u8, time: &str) -> ScheduleItem {
        ScheduleItem {
            id,
            day_of_week: day,
            time: time.to_string(),
            activity: "Boxing".to_string(),
            discipline: Some("boxing".to_string()),
            coach: None,
            age: None,
        }
    }

    #[test]
    fn test_snapshot_is_active_day_in_feed_order() {
        let board = ScheduleBoard::new(1);
        board.set_items(vec![
            item(3, 1, "19:00"),
            item(1, 0, "10:00"),
            item(2, 1, "18:00"),
        ]);

        let ids: Vec<String> = board.snapshot().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["3", "2"]);
        assert_eq!(board.total(), 3);
    }

    #[test]
    fn test_set_day() {
        let board = ScheduleBoard::new(0);
        assert!(!board.set_day(0));
        assert!(!board.set_day(7));
        assert!(board.set_day(6));
        assert_eq!(board.day(), 6);
    }

    #[test]
    fn test_invalid_start_day_falls_back_to_monday() {
        assert_eq!(ScheduleBoard::new(9).day(), 0);
    }

    #[test]
    fn test_entry_summary_is_summary_line() {
        let entry = ScheduleEntry(item(5, 0, "18:00"));
        assert_eq!(entry.id(), "5");
        assert_eq!(entry.summary(), "18:00 — Boxing");
    }
}
