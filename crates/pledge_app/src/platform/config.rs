//! Runtime configuration: built-in defaults with environment overrides.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use engine_logging::LogDestination;
use log::LevelFilter;
use pledge_core::TableConfig;
use pledge_engine::FetchSettings;

pub const ENV_SOURCE_URL: &str = "PLEDGE_TABLE_SOURCE_URL";
pub const ENV_TIMEOUT_MS: &str = "PLEDGE_TABLE_TIMEOUT_MS";
pub const ENV_ROWS_PER_PAGE: &str = "PLEDGE_TABLE_ROWS_PER_PAGE";
pub const ENV_LOG_LEVEL: &str = "PLEDGE_TABLE_LOG_LEVEL";
pub const ENV_LOG_DESTINATION: &str = "PLEDGE_TABLE_LOG_DESTINATION";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub table: TableConfig,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            table: TableConfig::default(),
            log_level: LevelFilter::Info,
            // stdout belongs to the table.
            log_destination: LogDestination::File,
            log_path: PathBuf::from("./pledge_table.log"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_SOURCE_URL) {
            let url = url.trim();
            if url.is_empty() {
                bail!("{ENV_SOURCE_URL} is set but empty");
            }
            config.fetch.source_url = url.to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_MS} must be a whole number of milliseconds, got {raw:?}"))?;
            if millis == 0 {
                bail!("{ENV_TIMEOUT_MS} must be greater than zero");
            }
            config.fetch.request_timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(ENV_ROWS_PER_PAGE) {
            let rows: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_ROWS_PER_PAGE} must be a number, got {raw:?}"))?;
            let rows = NonZeroUsize::new(rows)
                .filter(|rows| config.table.rows_per_page_options.contains(&rows.get()))
                .with_context(|| {
                    format!(
                        "{ENV_ROWS_PER_PAGE} must be one of {:?}, got {rows}",
                        config.table.rows_per_page_options
                    )
                })?;
            config.table.default_rows_per_page = rows;
        }

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            config.log_level = LevelFilter::from_str(raw.trim())
                .with_context(|| format!("{ENV_LOG_LEVEL} is not a log level: {raw:?}"))?;
        }

        if let Some(raw) = lookup(ENV_LOG_DESTINATION) {
            config.log_destination = match raw.trim().to_ascii_lowercase().as_str() {
                "file" => LogDestination::File,
                "terminal" => LogDestination::Terminal,
                "both" => LogDestination::Both,
                _ => bail!("{ENV_LOG_DESTINATION} must be file, terminal or both, got {raw:?}"),
            };
        }

        Ok(config)
    }
}
