use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use pledge_core::{Effect, LoadFailure, Msg};
use pledge_engine::{EngineEvent, EngineHandle, FailureKind, FetchSettings};

use super::LoopEvent;

/// Executes core effects: loads go to the engine, timers become delayed messages.
pub struct EffectRunner {
    engine: EngineHandle,
    source_url: String,
    events: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, events: mpsc::Sender<LoopEvent>) -> Self {
        let source_url = settings.source_url.clone();
        let engine = EngineHandle::new(settings);
        let runner = Self {
            engine,
            source_url,
            events,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartLoad { request_id } => {
                    engine_info!("StartLoad request_id={} url={}", request_id, self.source_url);
                    self.engine.load(request_id, self.source_url.clone());
                }
                Effect::CancelLoad { request_id } => {
                    engine_info!("CancelLoad request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
                Effect::ShowNotification {
                    id, duration_ms, ..
                } => {
                    self.send_after(duration_ms, Msg::NotificationExpired { id });
                }
                Effect::ClearPageErrorAfter { id, after_ms } => {
                    self.send_after(after_ms, Msg::PageErrorExpired { id });
                }
            }
        }
    }

    fn send_after(&self, millis: u64, msg: Msg) {
        let events = self.events.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(millis));
            engine_debug!("Timer fired: {:?}", msg);
            let _ = events.send(LoopEvent::Msg(msg));
        });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let events = self.events.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if events.send(LoopEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LoadCompleted { request_id, result } => match result {
            Ok(records) => Msg::ProjectsLoaded {
                request_id,
                records,
            },
            Err(err) => Msg::ProjectsLoadFailed {
                request_id,
                failure: map_failure(&err.kind),
            },
        },
    }
}

fn map_failure(kind: &FailureKind) -> LoadFailure {
    match kind {
        FailureKind::InvalidUrl => LoadFailure::InvalidUrl,
        FailureKind::HttpStatus(code) => LoadFailure::HttpStatus(*code),
        FailureKind::Timeout => LoadFailure::Timeout,
        FailureKind::TooLarge { .. } => LoadFailure::TooLarge,
        FailureKind::Parse => LoadFailure::Parse,
        FailureKind::Cancelled => LoadFailure::Cancelled,
        FailureKind::Network => LoadFailure::Network,
    }
}
