use std::sync::Arc;
use std::time::Duration;

use pledge_engine::{
    fetch_with_deadline, EngineEvent, EngineHandle, FailureKind, FetchError, Fetcher, RawRecord,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

struct DelayedFetcher {
    delay: Duration,
}

#[async_trait::async_trait]
impl Fetcher for DelayedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![json!({ "percentage_funded": 50, "source": url })])
    }
}

fn delayed(delay_ms: u64) -> DelayedFetcher {
    DelayedFetcher {
        delay: Duration::from_millis(delay_ms),
    }
}

#[tokio::test]
async fn deadline_lets_fast_fetch_through() {
    let token = CancellationToken::new();
    let entries = fetch_with_deadline(&delayed(5), "mem://a", Duration::from_secs(2), &token)
        .await
        .unwrap();
    assert_eq!(entries[0]["source"], "mem://a");
}

#[tokio::test]
async fn deadline_reports_timeout() {
    let token = CancellationToken::new();
    let err = fetch_with_deadline(&delayed(1_000), "mem://a", Duration::from_millis(20), &token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn cancellation_wins_the_race() {
    let token = CancellationToken::new();
    token.cancel();
    let err = fetch_with_deadline(&delayed(0), "mem://a", Duration::from_secs(2), &token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Cancelled);
}

fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn engine_reports_completed_load() {
    let engine = EngineHandle::with_fetcher(Arc::new(delayed(5)), Duration::from_secs(2));
    engine.load(7, "mem://projects");

    let EngineEvent::LoadCompleted { request_id, result } = wait_for_event(&engine);
    assert_eq!(request_id, 7);
    assert_eq!(result.unwrap().len(), 1);
}

#[test]
fn engine_reports_timeout_for_slow_provider() {
    let engine = EngineHandle::with_fetcher(Arc::new(delayed(2_000)), Duration::from_millis(30));
    engine.load(1, "mem://projects");

    let EngineEvent::LoadCompleted { request_id, result } = wait_for_event(&engine);
    assert_eq!(request_id, 1);
    assert_eq!(result.unwrap_err().kind, FailureKind::Timeout);
}

#[test]
fn engine_cancels_in_flight_load() {
    let engine = EngineHandle::with_fetcher(Arc::new(delayed(2_000)), Duration::from_secs(10));
    engine.load(3, "mem://projects");
    engine.cancel(3);

    let EngineEvent::LoadCompleted { request_id, result } = wait_for_event(&engine);
    assert_eq!(request_id, 3);
    assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
}
