//! Pledge table core: record normalization, pagination state machine and view-model projection.
mod effect;
mod msg;
mod pagination;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use pagination::{page_count, Cursor, PageRangeError, PageView, Paginator};
pub use record::{
    normalize, Dataset, NormalizeError, RawRecord, Record, PERCENTAGE_KEYS, PLEDGED_KEYS,
};
pub use state::{
    AppState, LoadFailure, NoticeId, RequestId, TableConfig, LOAD_FAILED_TEXT, NO_DATA_TEXT,
};
pub use update::{parse_page_input, sanitize_page_input, update};
pub use view_model::{
    format_currency, format_percentage, project, round_half_away_from_zero, AppViewModel,
    NotificationView, RenderModel, RowView, TableStatus, EMPTY_TABLE_TEXT, LOADING_TEXT,
};
