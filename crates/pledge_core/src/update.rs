use std::num::NonZeroUsize;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{normalize, AppState, Effect, LoadFailure, Msg, LOAD_FAILED_TEXT, NO_DATA_TEXT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            let (superseded, request_id) = state.begin_load();
            let mut effects = Vec::with_capacity(2);
            if let Some(old) = superseded {
                effects.push(Effect::CancelLoad { request_id: old });
            }
            effects.push(Effect::StartLoad { request_id });
            effects
        }
        Msg::ProjectsLoaded {
            request_id,
            records,
        } => {
            if !state.is_pending(request_id) {
                engine_debug!("Discarding stale load result request_id={}", request_id);
                return (state, Vec::new());
            }
            match normalize(&records) {
                Ok(dataset) => {
                    engine_info!("Loaded {} projects (request_id={})", dataset.len(), request_id);
                    state.complete_load(dataset);
                }
                Err(err) => {
                    engine_warn!("Load request_id={} produced no data: {}", request_id, err);
                    state.fail_load(NO_DATA_TEXT);
                }
            }
            Vec::new()
        }
        Msg::ProjectsLoadFailed {
            request_id,
            failure,
        } => {
            if !state.is_pending(request_id) {
                engine_debug!(
                    "Discarding stale load failure request_id={} ({})",
                    request_id,
                    failure
                );
                return (state, Vec::new());
            }
            log_failure(request_id, failure);
            state.fail_load(LOAD_FAILED_TEXT);
            Vec::new()
        }
        Msg::PrevClicked => {
            if !state.is_loading() {
                let before = state.cursor();
                state.paginator_mut().prev_page();
                if state.cursor() != before {
                    state.sync_page_input();
                    state.clear_page_error();
                }
            }
            Vec::new()
        }
        Msg::NextClicked => {
            if !state.is_loading() {
                let before = state.cursor();
                state.paginator_mut().next_page();
                if state.cursor() != before {
                    state.sync_page_input();
                    state.clear_page_error();
                }
            }
            Vec::new()
        }
        Msg::PageInputChanged(raw) => {
            state.set_page_input(sanitize_page_input(&raw));
            Vec::new()
        }
        Msg::PageInputSubmitted => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let requested = parse_page_input(state.page_input());
            let outcome = state.paginator_mut().go_to_page(requested).map(|_| ());
            match outcome {
                Ok(()) => {
                    state.sync_page_input();
                    state.clear_page_error();
                    Vec::new()
                }
                Err(err) => {
                    engine_debug!("Rejected page request: {}", err);
                    state.sync_page_input();
                    let message = format!(
                        "Page {} does not exist. Please enter a page number between {} and {}",
                        err.requested, err.min, err.max
                    );
                    let (id, after_ms) = state.raise_page_error(message);
                    vec![Effect::ClearPageErrorAfter { id, after_ms }]
                }
            }
        }
        Msg::RowsPerPageSelected(value) => {
            let offered = state.config().rows_per_page_options.contains(&value);
            let rows_per_page = NonZeroUsize::new(value).filter(|_| offered);
            match rows_per_page {
                Some(rows_per_page) if !state.is_loading() => {
                    state.paginator_mut().set_rows_per_page(rows_per_page);
                    state.sync_page_input();
                    engine_info!("Rows per page set to {}", rows_per_page);
                    let message = format!("Rows Per Page updated to {rows_per_page}");
                    let (id, duration_ms) = state.show_notification(message.clone());
                    vec![Effect::ShowNotification {
                        id,
                        message,
                        duration_ms,
                    }]
                }
                Some(_) => Vec::new(),
                None => {
                    engine_warn!("Ignoring rows-per-page value {} outside the offered set", value);
                    Vec::new()
                }
            }
        }
        Msg::NotificationDismissed => {
            state.clear_notification(None);
            Vec::new()
        }
        Msg::NotificationExpired { id } => {
            state.clear_notification(Some(id));
            Vec::new()
        }
        Msg::PageErrorExpired { id } => {
            state.expire_page_error(id);
            Vec::new()
        }
    };

    (state, effects)
}

/// Keeps only ASCII digits, as the page input accepts nothing else.
pub fn sanitize_page_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reads a page number from the input text.
///
/// Empty input reads as 0 and oversized numbers saturate, so both are
/// rejected by the range check rather than here.
pub fn parse_page_input(text: &str) -> usize {
    let digits = sanitize_page_input(text);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}

fn log_failure(request_id: u64, failure: LoadFailure) {
    match failure {
        LoadFailure::Timeout => {
            engine_warn!("Load request_id={} timed out", request_id);
        }
        LoadFailure::Cancelled => {
            engine_info!("Load request_id={} was cancelled", request_id);
        }
        other => {
            engine_warn!("Load request_id={} failed: {}", request_id, other);
        }
    }
}
