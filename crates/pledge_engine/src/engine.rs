use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::fetch::{fetch_with_deadline, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    Load { request_id: RequestId, url: String },
    Cancel { request_id: RequestId },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs loads on a background tokio runtime and reports results as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        let deadline = settings.request_timeout;
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)), deadline)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, deadline: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Load { request_id, url } => {
                        let token = CancellationToken::new();
                        lock(&in_flight).insert(request_id, token.clone());
                        let fetcher = fetcher.clone();
                        let event_tx = event_tx.clone();
                        let in_flight = in_flight.clone();
                        runtime.spawn(async move {
                            engine_info!("Load request_id={} url={}", request_id, url);
                            let result =
                                fetch_with_deadline(fetcher.as_ref(), &url, deadline, &token).await;
                            lock(&in_flight).remove(&request_id);
                            if let Err(err) = &result {
                                engine_warn!("Load request_id={} failed: {}", request_id, err);
                            }
                            let _ = event_tx.send(EngineEvent::LoadCompleted { request_id, result });
                        });
                    }
                    EngineCommand::Cancel { request_id } => {
                        if let Some(token) = lock(&in_flight).remove(&request_id) {
                            token.cancel();
                        }
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn load(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Load {
            request_id,
            url: url.into(),
        });
    }

    /// Aborts a load; it still completes with a `Cancelled` error.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
