use crate::{NoticeId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartLoad { request_id: RequestId },
    CancelLoad { request_id: RequestId },
    /// Hand a message to the notifier; report `NotificationExpired` after `duration_ms`.
    ShowNotification {
        id: NoticeId,
        message: String,
        duration_ms: u64,
    },
    /// Report `PageErrorExpired` after `after_ms`.
    ClearPageErrorAfter { id: NoticeId, after_ms: u64 },
}
