use std::time::Duration;

use scraper_core::Cadence;

use crate::FetchSettings;

pub const DEFAULT_SOURCE_URL: &str = "http://localhost:8080/positions";
pub const DEFAULT_RECORD_TTL: Duration = Duration::from_secs(180);
pub const DEFAULT_INDEX_KEY: &str = "available";

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub source_url: String,
    pub fetch: FetchSettings,
    /// TTL applied to every per-id hash and to the availability index.
    pub record_ttl: Duration,
    /// Key of the shared availability sorted set.
    pub index_key: String,
    pub cadence: Cadence,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch: FetchSettings::default(),
            record_ttl: DEFAULT_RECORD_TTL,
            index_key: DEFAULT_INDEX_KEY.to_string(),
            cadence: Cadence::default(),
        }
    }
}
