//! Stdin/stdout collaborators: renderer, toasts and the confirmation prompt.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use schedule_lib::model::day_name;
use schedule_select::bulk::ConfirmSummary;
use schedule_select::collab::{ConfirmModal, Notifier, RenderSync, Toast, ToastKind};
use schedule_select::item::SelectableItem;
use schedule_select::view::SelectionView;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;

use crate::board::{ScheduleBoard, ScheduleEntry};

type Input = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// The terminal the admin works in.
///
/// Owns the input lines so the command loop and the confirmation prompt read
/// from the same stream.
pub struct Console {
    input: Mutex<Input>,
    board: Arc<ScheduleBoard>,
}

impl Console {
    /// Console reading from stdin.
    pub fn stdin(board: Arc<ScheduleBoard>) -> Self {
        let reader = tokio::io::BufReader::new(tokio::io::stdin());
        Self::new(Box::new(reader), board)
    }

    pub fn new(input: Box<dyn AsyncBufRead + Unpin + Send>, board: Arc<ScheduleBoard>) -> Self {
        Self {
            input: Mutex::new(input.lines()),
            board,
        }
    }

    /// Next input line, or `None` at end of input.
    pub async fn read_line(&self) -> Option<String> {
        match self.input.lock().await.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!("failed to read input: {}", e);
                None
            }
        }
    }

    /// Print a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

/// `y` or `yes`, in any case.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Toolbar line and one row per entry.
pub fn format_view(view: &SelectionView, entries: &[ScheduleEntry], day: u8) -> String {
    let mut out = format!("== {} ==", day_name(day).unwrap_or("?"));
    if view.toolbar_active {
        out.push_str(&format!(
            "  [selecting] {}{}  |  {}",
            view.delete_label,
            if view.delete_enabled { "" } else { " (disabled)" },
            view.select_all_label
        ));
    }

    if entries.is_empty() {
        out.push_str("\n  (no entries)");
    }
    for (index, entry) in entries.iter().enumerate() {
        let id = entry.id();
        let marker = match view.flags(&id) {
            Some(flags) if flags.selectable && flags.selected => "[x] ",
            Some(flags) if flags.selectable => "[ ] ",
            _ => "",
        };
        out.push_str(&format!("\n  {:>2}. {}{}", index, marker, entry.summary()));
    }
    out
}

/// Toast as printed to the console.
pub fn format_toast(toast: &Toast) -> String {
    match toast.kind {
        ToastKind::Info => format!("[info] {}", toast.message),
        ToastKind::Error => format!("[error] {}", toast.message),
    }
}

impl RenderSync for Console {
    fn render(&self, view: &SelectionView) {
        println!("{}", format_view(view, &self.board.entries(), self.board.day()));
    }
}

impl Notifier for Console {
    fn notify(&self, toast: Toast) {
        debug!("toast: {:?}", toast);
        println!("{}", format_toast(&toast));
    }
}

#[async_trait]
impl ConfirmModal for Console {
    async fn confirm(&self, summary: ConfirmSummary) -> bool {
        println!("{}", summary.title);
        println!("{}", summary.body());
        self.prompt(&format!("{}? [y/N] ", summary.confirm_label));

        match self.read_line().await {
            Some(answer) => is_confirmation(&answer),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use schedule_select::labels::Labels;
    use schedule_select::selection::SelectionState;

    use super::*;
    use crate::board::tests::item;

    fn entries() -> Vec<ScheduleEntry> {
        vec![ScheduleEntry(item(1, 0, "10:00")), ScheduleEntry(item(2, 0, "18:00"))]
    }

    fn console(input: &'static str) -> Console {
        Console::new(Box::new(input.as_bytes()), Arc::new(ScheduleBoard::new(0)))
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }

    #[test]
    fn test_format_outside_selection_mode() {
        let entries = entries();
        let view = SelectionView::project(&SelectionState::new(), &entries, &Labels::default());

        let text = format_view(&view, &entries, 0);
        assert_eq!(text, "== Monday ==\n   0. 10:00 — Boxing\n   1. 18:00 — Boxing");
    }

    #[test]
    fn test_format_in_selection_mode() {
        let entries = entries();
        let state = SelectionState::new();
        state.enter();
        state.add("2");
        let view = SelectionView::project(&state, &entries, &Labels::default());

        let text = format_view(&view, &entries, 0);
        assert!(text.starts_with("== Monday ==  [selecting] Delete (1)  |  Select all"));
        assert!(text.contains("0. [ ] 10:00"));
        assert!(text.contains("1. [x] 18:00"));
    }

    #[test]
    fn test_format_toast() {
        assert_eq!(format_toast(&Toast::info("Deleted: 2")), "[info] Deleted: 2");
        assert_eq!(format_toast(&Toast::error("HTTP 500: boom")), "[error] HTTP 500: boom");
    }

    #[tokio::test]
    async fn test_confirm_reads_answer() {
        let summary = ConfirmSummary::build(&entries(), &Labels::default());

        assert!(console("yes\n").confirm(summary.clone()).await);
        assert!(!console("no\n").confirm(summary.clone()).await);
        assert!(!console("").confirm(summary).await);
    }

    #[tokio::test]
    async fn test_read_line_shares_one_stream() {
        let console = console("list\ny\n");
        assert_eq!(console.read_line().await.as_deref(), Some("list"));
        assert_eq!(console.read_line().await.as_deref(), Some("y"));
        assert_eq!(console.read_line().await, None);
    }
}
