//! Scraper core: record model and the pure poller state machine.
mod effect;
mod msg;
mod record;
mod state;
mod summary;
mod update;

pub use effect::{Effect, SleepKind};
pub use msg::Msg;
pub use record::Record;
pub use state::{Cadence, Phase, PollerState, DEFAULT_BACKOFF, DEFAULT_POLL_INTERVAL};
pub use summary::PollerSummary;
pub use update::update;
