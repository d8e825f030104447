use pledge_core::{update, AppState, Effect, Msg, NoticeId, TableConfig};

use super::ui::{Notifier, RenderSink};

/// Owns the table state and pushes every transition through `update`.
///
/// Renders only when a transition changed something visible. Returns effects
/// so the caller can run the IO and timers.
pub struct Controller<R, N> {
    state: AppState,
    render: R,
    notifier: N,
    live_notification: Option<NoticeId>,
}

impl<R: RenderSink, N: Notifier> Controller<R, N> {
    pub fn new(config: TableConfig, render: R, notifier: N) -> Self {
        Self {
            state: AppState::with_config(config),
            render,
            notifier,
            live_notification: None,
        }
    }

    /// Requests the first load; the first frame drawn is the loading one.
    pub fn start(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::LoadRequested)
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for effect in &effects {
            if let Effect::ShowNotification {
                id,
                message,
                duration_ms,
            } = effect
            {
                self.notifier.notify(message, *duration_ms);
                self.live_notification = Some(*id);
            }
        }

        if was_dirty {
            let view = self.state.view();
            if view.notification.is_none() && self.live_notification.take().is_some() {
                self.notifier.dismiss();
            }
            self.render.render(&view);
        }
        effects
    }

    #[cfg(test)]
    fn state(&self) -> &AppState {
        &self.state
    }
}
