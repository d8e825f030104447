use std::sync::Once;

use pledge_core::{
    update, AppState, Effect, LoadFailure, Msg, TableStatus, EMPTY_TABLE_TEXT, LOAD_FAILED_TEXT,
    NO_DATA_TEXT,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn raw_projects(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({ "percentage_funded": i * 10, "amt_pledged": i * 1000 }))
        .collect()
}

/// Runs a load to completion with `count` projects.
fn loaded(count: usize) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::LoadRequested);
    assert_eq!(effects, vec![Effect::StartLoad { request_id: 1 }]);
    let (mut state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request_id: 1,
            records: raw_projects(count),
        },
    );
    state.consume_dirty();
    state
}

fn submit_page(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::PageInputChanged(text.to_string()));
    update(state, Msg::PageInputSubmitted)
}

#[test]
fn load_shows_loading_then_first_page() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::LoadRequested);
    let view = state.view();
    assert_eq!(view.status, TableStatus::Loading);
    assert!(view.table.rows.is_empty());
    assert!(!view.table.next_enabled);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::ProjectsLoaded {
            request_id: 1,
            records: raw_projects(12),
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    assert_eq!(view.status, TableStatus::Ready);
    assert_eq!(view.table.rows.len(), 5);
    assert_eq!(view.table.page_label, "of 3");
    assert_eq!(view.page_input, "1");
    assert!(!view.table.prev_enabled);
    assert!(view.table.next_enabled);
}

#[test]
fn reload_cancels_in_flight_request_and_ignores_its_result() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, effects) = update(state, Msg::LoadRequested);
    assert_eq!(
        effects,
        vec![
            Effect::CancelLoad { request_id: 1 },
            Effect::StartLoad { request_id: 2 },
        ]
    );

    let (mut state, _) = update(state, Msg::ProjectsLoaded {
        request_id: 1,
        records: raw_projects(3),
    });
    assert!(state.is_loading());
    let _ = state.consume_dirty();

    let (state, _) = update(state, Msg::ProjectsLoaded {
        request_id: 2,
        records: raw_projects(7),
    });
    assert_eq!(state.view().table.rows.len(), 5);
    assert_eq!(state.view().table.page_count, 2);
}

#[test]
fn provider_failure_shows_generic_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(
        state,
        Msg::ProjectsLoadFailed {
            request_id: 1,
            failure: LoadFailure::HttpStatus(503),
        },
    );

    let view = state.view();
    assert_eq!(
        view.status,
        TableStatus::Failed {
            message: LOAD_FAILED_TEXT.to_string()
        }
    );
    assert_eq!(view.placeholder(), Some(LOAD_FAILED_TEXT));
    assert!(view.table.rows.is_empty());
}

#[test]
fn timeout_maps_to_the_same_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(
        state,
        Msg::ProjectsLoadFailed {
            request_id: 1,
            failure: LoadFailure::Timeout,
        },
    );
    assert_eq!(state.view().placeholder(), Some(LOAD_FAILED_TEXT));
}

#[test]
fn empty_provider_payload_is_reported_distinctly() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request_id: 1,
            records: Vec::new(),
        },
    );
    assert_eq!(state.view().placeholder(), Some(NO_DATA_TEXT));
}

#[test]
fn empty_table_before_any_load() {
    let view = AppState::new().view();
    assert_eq!(view.status, TableStatus::Empty);
    assert_eq!(view.table.page_count, 1);
    assert_eq!(view.table.current_page, 1);
    assert_eq!(view.placeholder(), Some(EMPTY_TABLE_TEXT));
}

#[test]
fn next_and_prev_update_page_input() {
    init_logging();
    let state = loaded(12);
    let (state, _) = update(state, Msg::NextClicked);
    let (state, _) = update(state, Msg::NextClicked);
    assert_eq!(state.view().page_input, "3");
    assert_eq!(state.view().table.rows.len(), 2);

    let (mut state, _) = update(state, Msg::NextClicked);
    assert_eq!(state.view().table.current_page, 3);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::NextClicked);
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::PrevClicked);
    assert_eq!(state.view().page_input, "2");
}

#[test]
fn navigation_is_ignored_while_loading() {
    init_logging();
    let state = loaded(12);
    let (state, _) = update(state, Msg::LoadRequested);
    let before = state.cursor();

    let (state, _) = update(state, Msg::NextClicked);
    let (state, effects) = submit_page(state, "2");
    assert_eq!(state.cursor(), before);
    assert!(effects.is_empty());
}

#[test]
fn page_input_keeps_only_digits() {
    let state = loaded(12);
    let (state, _) = update(state, Msg::PageInputChanged("2a-b".to_string()));
    assert_eq!(state.view().page_input, "2");
}

#[test]
fn valid_page_submission_moves_cursor() {
    init_logging();
    let (state, effects) = submit_page(loaded(12), "3");
    assert!(effects.is_empty());
    assert_eq!(state.cursor().current_page(), 3);
    assert_eq!(state.view().page_error, None);
}

#[test]
fn out_of_range_submission_reverts_input_and_raises_transient_error() {
    init_logging();
    let (state, _) = update(loaded(12), Msg::NextClicked);
    let before = state.cursor();

    let (state, effects) = submit_page(state, "99");
    assert_eq!(state.cursor(), before);

    let view = state.view();
    assert_eq!(view.page_input, "2");
    assert_eq!(
        view.page_error.as_deref(),
        Some("Page 99 does not exist. Please enter a page number between 1 and 3")
    );
    let id = match effects.as_slice() {
        [Effect::ClearPageErrorAfter { id, after_ms: 3000 }] => *id,
        other => panic!("unexpected effects: {other:?}"),
    };

    let (state, _) = update(state, Msg::PageErrorExpired { id });
    assert_eq!(state.view().page_error, None);
}

#[test]
fn moving_to_a_valid_page_clears_the_page_error() {
    init_logging();
    let (state, _) = submit_page(loaded(12), "99");
    assert!(state.view().page_error.is_some());
    let (state, _) = update(state, Msg::NextClicked);
    assert_eq!(state.cursor().current_page(), 2);
    assert_eq!(state.view().page_error, None);

    let (state, _) = submit_page(state, "0");
    assert!(state.view().page_error.is_some());
    let (state, _) = submit_page(state, "3");
    assert_eq!(state.cursor().current_page(), 3);
    assert_eq!(state.view().page_error, None);

    let (state, _) = submit_page(state, "42");
    let (state, _) = update(state, Msg::PrevClicked);
    assert_eq!(state.cursor().current_page(), 2);
    assert_eq!(state.view().page_error, None);
}

#[test]
fn empty_submission_is_rejected_as_page_zero() {
    init_logging();
    let (state, effects) = submit_page(loaded(12), "");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().page_input, "1");
    assert!(state
        .view()
        .page_error
        .unwrap()
        .starts_with("Page 0 does not exist"));
}

#[test]
fn stale_page_error_expiry_keeps_newer_error() {
    init_logging();
    let (state, first) = submit_page(loaded(12), "9");
    let (state, second) = submit_page(state, "8");
    let first_id = match first[0] {
        Effect::ClearPageErrorAfter { id, .. } => id,
        _ => unreachable!(),
    };
    assert_ne!(first, second);

    let (state, _) = update(state, Msg::PageErrorExpired { id: first_id });
    assert!(state.view().page_error.unwrap().starts_with("Page 8"));
}

#[test]
fn rows_per_page_change_restarts_at_page_one_and_notifies() {
    init_logging();
    let (state, _) = submit_page(loaded(12), "3");

    let (state, effects) = update(state, Msg::RowsPerPageSelected(10));
    let view = state.view();
    assert_eq!(view.table.current_page, 1);
    assert_eq!(view.table.page_count, 2);
    assert_eq!(view.table.rows_per_page, 10);
    assert_eq!(view.page_input, "1");
    assert_eq!(
        effects,
        vec![Effect::ShowNotification {
            id: 1,
            message: "Rows Per Page updated to 10".to_string(),
            duration_ms: 3000,
        }]
    );
    assert_eq!(
        view.notification.map(|n| n.message).as_deref(),
        Some("Rows Per Page updated to 10")
    );
}

#[test]
fn rows_per_page_outside_options_is_ignored() {
    init_logging();
    let state = loaded(12);
    let before = state.cursor();
    let (state, effects) = update(state, Msg::RowsPerPageSelected(7));
    let (state, more) = update(state, Msg::RowsPerPageSelected(0));
    assert!(effects.is_empty());
    assert!(more.is_empty());
    assert_eq!(state.cursor(), before);
}

#[test]
fn newer_notification_replaces_older_one() {
    init_logging();
    let state = loaded(30);
    let (state, _) = update(state, Msg::RowsPerPageSelected(10));
    let (state, _) = update(state, Msg::RowsPerPageSelected(20));
    let live = state.view().notification.unwrap();
    assert_eq!(live.message, "Rows Per Page updated to 20");

    // The first notification's timer fires late; the second stays.
    let (state, _) = update(state, Msg::NotificationExpired { id: live.id - 1 });
    assert_eq!(state.view().notification.unwrap().id, live.id);

    let (state, _) = update(state, Msg::NotificationExpired { id: live.id });
    assert_eq!(state.view().notification, None);
}

#[test]
fn dismissing_notification_clears_it() {
    init_logging();
    let (state, _) = update(loaded(12), Msg::RowsPerPageSelected(15));
    let (state, _) = update(state, Msg::NotificationDismissed);
    assert_eq!(state.view().notification, None);
}
