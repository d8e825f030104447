//! Pledge engine: data provider, timeout handling and background load execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_projects, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{fetch_with_deadline, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_SOURCE_URL};
pub use types::{EngineEvent, FailureKind, FetchError, RawRecord, RequestId};
