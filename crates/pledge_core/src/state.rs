use std::fmt;
use std::num::NonZeroUsize;

use crate::pagination::{Cursor, Paginator};
use crate::record::Dataset;
use crate::view_model::{project, AppViewModel, NotificationView, TableStatus};

pub type RequestId = u64;
pub type NoticeId = u64;

/// Shown for every provider-level failure; the raw error only goes to the log.
pub const LOAD_FAILED_TEXT: &str = "Failed to load projects. Please try again later.";
pub const NO_DATA_TEXT: &str = "No projects data received.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub default_rows_per_page: NonZeroUsize,
    /// Values offered by the rows-per-page selector.
    pub rows_per_page_options: Vec<usize>,
    pub notification_ms: u64,
    pub page_error_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_rows_per_page: NonZeroUsize::MIN.saturating_add(4),
            rows_per_page_options: vec![5, 10, 15, 20],
            notification_ms: 3000,
            page_error_ms: 3000,
        }
    }
}

/// Why a load failed, as reported by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    InvalidUrl,
    Network,
    HttpStatus(u16),
    Timeout,
    TooLarge,
    Parse,
    Cancelled,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::InvalidUrl => write!(f, "invalid url"),
            LoadFailure::Network => write!(f, "network error"),
            LoadFailure::HttpStatus(code) => write!(f, "http status {code}"),
            LoadFailure::Timeout => write!(f, "timeout"),
            LoadFailure::TooLarge => write!(f, "response too large"),
            LoadFailure::Parse => write!(f, "unparseable response"),
            LoadFailure::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Idle,
    Loading { request_id: RequestId },
    Ready,
    Failed { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    id: NoticeId,
    message: String,
    duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    config: TableConfig,
    paginator: Paginator,
    load: LoadState,
    page_input: String,
    page_error: Option<Notice>,
    notification: Option<Notice>,
    last_request_id: RequestId,
    last_notice_id: NoticeId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(TableConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TableConfig) -> Self {
        let paginator = Paginator::new(config.default_rows_per_page);
        Self {
            config,
            paginator,
            load: LoadState::Idle,
            page_input: "1".to_string(),
            page_error: None,
            notification: None,
            last_request_id: 0,
            last_notice_id: 0,
            dirty: false,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn cursor(&self) -> Cursor {
        self.paginator.cursor()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    pub fn view(&self) -> AppViewModel {
        let mut table = project(&self.paginator.compute_view());
        let status = match self.load {
            LoadState::Loading { .. } => TableStatus::Loading,
            LoadState::Failed { message } => TableStatus::Failed {
                message: message.to_string(),
            },
            LoadState::Idle | LoadState::Ready if self.paginator.dataset().is_empty() => {
                TableStatus::Empty
            }
            LoadState::Idle | LoadState::Ready => TableStatus::Ready,
        };
        if status == TableStatus::Loading {
            table.rows.clear();
            table.prev_enabled = false;
            table.next_enabled = false;
        }

        AppViewModel {
            status,
            table,
            page_input: self.page_input.clone(),
            rows_per_page_options: self.config.rows_per_page_options.clone(),
            page_error: self.page_error.as_ref().map(|notice| notice.message.clone()),
            notification: self.notification.as_ref().map(|notice| NotificationView {
                id: notice.id,
                message: notice.message.clone(),
                duration_ms: notice.duration_ms,
            }),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything observable changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a new load. Returns the superseded request, if one was in flight, and the new id.
    pub(crate) fn begin_load(&mut self) -> (Option<RequestId>, RequestId) {
        let superseded = match self.load {
            LoadState::Loading { request_id } => Some(request_id),
            _ => None,
        };
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.load = LoadState::Loading { request_id };
        self.mark_dirty();
        (superseded, request_id)
    }

    pub(crate) fn is_pending(&self, request_id: RequestId) -> bool {
        self.load == LoadState::Loading { request_id }
    }

    pub(crate) fn complete_load(&mut self, dataset: Dataset) {
        self.paginator.seed(dataset);
        self.load = LoadState::Ready;
        self.sync_page_input();
    }

    pub(crate) fn fail_load(&mut self, message: &'static str) {
        self.paginator.seed(Dataset::empty());
        self.load = LoadState::Failed { message };
        self.sync_page_input();
    }

    pub(crate) fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    pub(crate) fn page_input(&self) -> &str {
        &self.page_input
    }

    pub(crate) fn set_page_input(&mut self, text: String) {
        if self.page_input != text {
            self.page_input = text;
            self.mark_dirty();
        }
    }

    /// Resets the page input to the current page.
    pub(crate) fn sync_page_input(&mut self) {
        self.page_input = self.paginator.cursor().current_page().to_string();
        self.mark_dirty();
    }

    pub(crate) fn raise_page_error(&mut self, message: String) -> (NoticeId, u64) {
        let id = self.next_notice_id();
        let duration_ms = self.config.page_error_ms;
        self.page_error = Some(Notice {
            id,
            message,
            duration_ms,
        });
        self.mark_dirty();
        (id, duration_ms)
    }

    /// Clears the page error only if `id` is still the one displayed.
    pub(crate) fn expire_page_error(&mut self, id: NoticeId) {
        if self.page_error.as_ref().is_some_and(|notice| notice.id == id) {
            self.page_error = None;
            self.mark_dirty();
        }
    }

    /// Drops the page error once the user has reached a valid page.
    pub(crate) fn clear_page_error(&mut self) {
        if self.page_error.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Replaces any live notification.
    pub(crate) fn show_notification(&mut self, message: String) -> (NoticeId, u64) {
        let id = self.next_notice_id();
        let duration_ms = self.config.notification_ms;
        self.notification = Some(Notice {
            id,
            message,
            duration_ms,
        });
        self.mark_dirty();
        (id, duration_ms)
    }

    /// Clears the notification; with `Some(id)` only if that notification is still live.
    pub(crate) fn clear_notification(&mut self, id: Option<NoticeId>) {
        let matches = match (&self.notification, id) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(notice), Some(id)) => notice.id == id,
        };
        if matches {
            self.notification = None;
            self.mark_dirty();
        }
    }

    fn next_notice_id(&mut self) -> NoticeId {
        self.last_notice_id += 1;
        self.last_notice_id
    }
}
