pub mod input;
pub mod notify;
pub mod render;

use pledge_core::AppViewModel;

/// Draws the table. The view's `status` tells the sink whether to show
/// rows or a loading/empty/error placeholder.
pub trait RenderSink {
    fn render(&mut self, view: &AppViewModel);
}

/// Shows one transient message at a time.
pub trait Notifier {
    /// Shows `message`, replacing any current one. It disappears after `duration_ms`.
    fn notify(&mut self, message: &str, duration_ms: u64);
    /// Removes the current message early.
    fn dismiss(&mut self);
}
