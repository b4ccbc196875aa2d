//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use schedule_select::prelude::*;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub label: String,
}

impl Row {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: format!("18:00 — {}", id),
        }
    }
}

impl SelectableItem for Row {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn summary(&self) -> String {
        self.label.clone()
    }
}

#[derive(Default)]
pub struct Board {
    rows: RwLock<Vec<Row>>,
}

impl Board {
    pub fn with(ids: &[&str]) -> Self {
        let board = Self::default();
        board.set(ids);
        board
    }

    pub fn set(&self, ids: &[&str]) {
        if let Ok(mut rows) = self.rows.write() {
            *rows = ids.iter().map(|id| Row::new(id)).collect();
        }
    }
}

impl DataSource<Row> for Board {
    fn snapshot(&self) -> Vec<Row> {
        self.rows.read().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[derive(Default)]
pub struct FakeApi {
    failures: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeApi {
    pub fn failing(id: &str, message: &str) -> Self {
        Self {
            failures: HashMap::from([(id.to_string(), message.to_string())]),
            ..Default::default()
        }
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().map(|c| c.clone()).unwrap_or_default();
        calls.sort();
        calls
    }
}

#[async_trait]
impl DeleteApi for FakeApi {
    async fn delete(&self, id: &str) -> Result<(), DeleteFailure> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(id.to_string());
        }
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }
        match self.failures.get(id) {
            Some(message) => Err(DeleteFailure::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct CountingReload {
    count: AtomicUsize,
}

impl CountingReload {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Reload for CountingReload {
    async fn reload(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct Toasts {
    shown: Mutex<Vec<Toast>>,
}

impl Toasts {
    pub fn shown(&self) -> Vec<Toast> {
        self.shown.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Notifier for Toasts {
    fn notify(&self, toast: Toast) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(toast);
        }
    }
}

type ShowHook = Box<dyn FnOnce() + Send>;

pub struct Modal {
    answer: bool,
    seen: Mutex<Vec<ConfirmSummary>>,
    on_show: Mutex<Option<ShowHook>>,
}

impl Modal {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
            on_show: Mutex::new(None),
        }
    }

    /// Run `hook` while the modal is open, before the user answers.
    pub fn while_open(&self, hook: impl FnOnce() + Send + 'static) {
        if let Ok(mut slot) = self.on_show.lock() {
            *slot = Some(Box::new(hook));
        }
    }

    pub fn seen(&self) -> Vec<ConfirmSummary> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ConfirmModal for Modal {
    async fn confirm(&self, summary: ConfirmSummary) -> bool {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(summary);
        }
        let hook = self.on_show.lock().ok().and_then(|mut slot| slot.take());
        if let Some(hook) = hook {
            hook();
        }
        self.answer
    }
}

#[derive(Default)]
pub struct Renders {
    views: Mutex<Vec<SelectionView>>,
}

impl Renders {
    pub fn count(&self) -> usize {
        self.views.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<SelectionView> {
        self.views.lock().ok().and_then(|v| v.last().cloned())
    }
}

impl RenderSync for Renders {
    fn render(&self, view: &SelectionView) {
        if let Ok(mut views) = self.views.lock() {
            views.push(view.clone());
        }
    }
}

pub struct Harness {
    pub board: Arc<Board>,
    pub api: Arc<FakeApi>,
    pub reload: Arc<CountingReload>,
    pub toasts: Arc<Toasts>,
    pub modal: Arc<Modal>,
    pub renders: Arc<Renders>,
    pub manager: SelectionManager<Row>,
}

impl Harness {
    pub fn new(ids: &[&str], api: FakeApi, modal: Modal) -> Self {
        let board = Arc::new(Board::with(ids));
        let api = Arc::new(api);
        let reload = Arc::new(CountingReload::default());
        let toasts = Arc::new(Toasts::default());
        let modal = Arc::new(modal);
        let renders = Arc::new(Renders::default());

        let manager = SelectionManager::<Row>::builder()
            .data_source(board.clone())
            .delete_api(api.clone())
            .reload(reload.clone())
            .notifier(toasts.clone())
            .confirm_modal(modal.clone())
            .renderer(renders.clone())
            .build()
            .expect("all collaborators are wired");

        Self {
            board,
            api,
            reload,
            toasts,
            modal,
            renders,
            manager,
        }
    }

    pub fn confirming(ids: &[&str]) -> Self {
        Self::new(ids, FakeApi::default(), Modal::answering(true))
    }

    /// Enter selection mode and plain-click each index.
    pub fn select(&self, indices: &[usize]) {
        self.manager.enter_mode();
        for &index in indices {
            self.manager.click(ClickKind::Plain, index);
        }
    }
}
