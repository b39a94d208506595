//! Scraper engine: fetch, decode and store IO plus the poller driver.
mod config;
mod decode;
mod fetch;
mod poller;
mod store;
mod types;
mod writer;

pub use config::{PollerConfig, DEFAULT_INDEX_KEY, DEFAULT_RECORD_TTL, DEFAULT_SOURCE_URL};
pub use decode::{decode_records, DecodeError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use poller::{Poller, PollerHandle};
pub use store::{PositionStore, RedisStore};
pub use types::{FailureKind, FetchError, FetchOutput, StoreError, StoreOp, WriteError};
pub use writer::StoreWriter;

pub use scraper_core::{Cadence, Phase, PollerSummary, Record};
