use crate::{LoadFailure, NoticeId, RawRecord, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Widget start-up or user-triggered reload.
    LoadRequested,
    /// Data provider delivered raw entries for a load.
    ProjectsLoaded {
        request_id: RequestId,
        records: Vec<RawRecord>,
    },
    /// Data provider failed for a load.
    ProjectsLoadFailed {
        request_id: RequestId,
        failure: LoadFailure,
    },
    /// User clicked the previous-page control.
    PrevClicked,
    /// User clicked the next-page control.
    NextClicked,
    /// User edited the page input (unsanitized text).
    PageInputChanged(String),
    /// User submitted the page input.
    PageInputSubmitted,
    /// User picked a rows-per-page value.
    RowsPerPageSelected(usize),
    /// User closed the notification.
    NotificationDismissed,
    /// A notification's display time elapsed.
    NotificationExpired { id: NoticeId },
    /// A page error's display time elapsed.
    PageErrorExpired { id: NoticeId },
}
