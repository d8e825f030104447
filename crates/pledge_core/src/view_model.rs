use crate::pagination::PageView;
use crate::state::NoticeId;

pub const EMPTY_TABLE_TEXT: &str = "No projects to display";
pub const LOADING_TEXT: &str = "Loading data...";

/// Everything a render sink needs to draw the table and its footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderModel {
    pub rows: Vec<RowView>,
    pub current_page: usize,
    pub page_count: usize,
    /// Footer text next to the page input, e.g. "of 3".
    pub page_label: String,
    pub rows_per_page: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based position in the whole dataset.
    pub display_index: usize,
    pub percentage_funded: String,
    pub amount_pledged: String,
}

/// What the table body should show instead of (or along with) rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Loading,
    Empty,
    Ready,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NoticeId,
    pub message: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: TableStatus,
    pub table: RenderModel,
    /// Text currently shown in the page input.
    pub page_input: String,
    pub rows_per_page_options: Vec<usize>,
    pub page_error: Option<String>,
    pub notification: Option<NotificationView>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Message for the table body when there are no rows to draw.
    pub fn placeholder(&self) -> Option<&str> {
        match &self.status {
            TableStatus::Loading => Some(LOADING_TEXT),
            TableStatus::Empty => Some(EMPTY_TABLE_TEXT),
            TableStatus::Failed { message } => Some(message.as_str()),
            TableStatus::Ready if self.table.rows.is_empty() => Some(EMPTY_TABLE_TEXT),
            TableStatus::Ready => None,
        }
    }
}

/// Projects a page view into display strings. Pure and deterministic.
pub fn project(view: &PageView<'_>) -> RenderModel {
    let rows = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| RowView {
            display_index: view.row_index_offset + i + 1,
            percentage_funded: format_percentage(record.percentage_funded()),
            amount_pledged: format_currency(record.amount_pledged()),
        })
        .collect();

    RenderModel {
        rows,
        current_page: view.current_page,
        page_count: view.page_count,
        page_label: format!("of {}", view.page_count),
        rows_per_page: view.rows_per_page,
        prev_enabled: view.has_prev,
        next_enabled: view.has_next,
    }
}

/// Rounds half away from zero (`2.5 -> 3`) and renders the whole number.
///
/// Values are non-negative. Formatting the `f64` keeps amounts beyond
/// `u64::MAX` exact down to the float's own precision.
pub fn round_half_away_from_zero(value: f64) -> String {
    format!("{:.0}", value.round())
}

pub fn format_percentage(value: f64) -> String {
    round_half_away_from_zero(value)
}

/// US-dollar display: `$` prefix, whole dollars, comma thousands separators.
pub fn format_currency(value: f64) -> String {
    format!("${}", group_thousands(&round_half_away_from_zero(value)))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
