use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_info, engine_warn};
use scraper_core::{update, Effect, Msg, PollerState, PollerSummary, Record, SleepKind};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{decode_records, Fetcher, PollerConfig, PositionStore, StoreWriter};

/// Drives the core state machine, executing its effects one at a time.
pub struct Poller {
    config: PollerConfig,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn PositionStore>,
    writer: StoreWriter,
    write_started: Option<Instant>,
}

impl Poller {
    /// The store handle is owned by the poller for its whole lifetime.
    pub fn new(
        config: PollerConfig,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn PositionStore>,
    ) -> Self {
        let writer = StoreWriter::new(config.record_ttl, config.index_key.clone());
        Self {
            config,
            fetcher,
            store,
            writer,
            write_started: None,
        }
    }

    /// Poll until `cancel` fires. Cancellation is observed before every
    /// effect and while waiting on a fetch, a store write or a sleep.
    pub async fn run(mut self, cancel: CancellationToken) -> PollerSummary {
        engine_info!("Poller starting for {}", self.config.source_url);

        let mut state = PollerState::new(self.config.cadence);
        let mut inbox = VecDeque::from([Msg::Started]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                if cancel.is_cancelled() {
                    inbox.push_back(Msg::StopRequested);
                    break;
                }
                if let Some(msg) = self.execute(effect, &cancel).await {
                    inbox.push_back(msg);
                }
            }
        }

        let summary = state.summary();
        engine_info!(
            "Poller stopped after {} cycles: {} records written, {} fetch failures, {} write failures",
            summary.cycles,
            summary.records_written,
            summary.fetch_failures,
            summary.write_failures
        );
        summary
    }

    async fn execute(&mut self, effect: Effect, cancel: &CancellationToken) -> Option<Msg> {
        match effect {
            Effect::Fetch => Some(self.fetch(cancel).await),
            Effect::Decode { body } => Some(self.decode(&body)),
            Effect::WriteRecord(record) => Some(self.write(record, cancel).await),
            Effect::Sleep { kind, duration } => Some(self.sleep(kind, duration, cancel).await),
            Effect::CheckStore => self.check_store(cancel).await,
        }
    }

    async fn fetch(&self, cancel: &CancellationToken) -> Msg {
        let url = self.config.source_url.as_str();
        engine_info!("Querying the source @ {}", url);

        let result = tokio::select! {
            _ = cancel.cancelled() => return Msg::StopRequested,
            result = self.fetcher.fetch(url) => result,
        };

        match result {
            Ok(output) => {
                if output.is_success() {
                    engine_info!("Source returned status OK ({})", output.status);
                } else {
                    engine_warn!("Source returned status {}", output.status);
                }
                engine_info!("Source responded in (s) - {:.3}", output.elapsed.as_secs_f64());
                if let Some(err) = &output.body_error {
                    engine_warn!("Could not read the full response body: {}", err);
                }
                Msg::FetchCompleted {
                    status: output.status,
                    body: output.bytes,
                }
            }
            Err(err) => {
                engine_warn!("Fetch from {} failed: {}", url, err);
                Msg::FetchFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Every decoded body opens a write phase, even an empty or unusable one.
    /// Malformed bodies are not fatal: the cycle continues with no records.
    fn decode(&mut self, body: &[u8]) -> Msg {
        let records = match decode_records(body) {
            Ok(records) => records,
            Err(err) => {
                engine_warn!("Could not decode positions: {}", err);
                Vec::new()
            }
        };
        engine_debug!("Decoded {} records", records.len());

        engine_info!(
            "Writing keys to the store (index {})",
            self.writer.index_key()
        );
        self.write_started = Some(Instant::now());
        Msg::Decoded { records }
    }

    async fn write(&self, record: Record, cancel: &CancellationToken) -> Msg {
        let result = tokio::select! {
            _ = cancel.cancelled() => return Msg::StopRequested,
            result = self.writer.write(self.store.as_ref(), &record) => result,
        };

        match result {
            Ok(()) => Msg::RecordWritten { id: record.id },
            Err(err) => {
                engine_warn!("{}", err);
                Msg::RecordFailed {
                    id: record.id,
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn sleep(&mut self, kind: SleepKind, duration: Duration, cancel: &CancellationToken) -> Msg {
        if let Some(started) = self.write_started.take() {
            engine_info!("Keys written to the store in (s) - {:.3}", started.elapsed().as_secs_f64());
        }
        match kind {
            SleepKind::Normal => engine_info!("Sleeping for {}s", duration.as_secs_f64()),
            SleepKind::Backoff => engine_info!("Backing off for {}s", duration.as_secs_f64()),
        }

        tokio::select! {
            _ = cancel.cancelled() => Msg::StopRequested,
            _ = tokio::time::sleep(duration) => Msg::SleepElapsed,
        }
    }

    /// Produces a message only when cancelled mid-check.
    async fn check_store(&self, cancel: &CancellationToken) -> Option<Msg> {
        let ping = tokio::select! {
            _ = cancel.cancelled() => return Some(Msg::StopRequested),
            ping = self.store.ping() => ping,
        };
        match ping {
            Ok(()) => engine_info!("Store answered health check"),
            Err(err) => {
                engine_warn!("Store health check failed: {}; reconnecting", err);
                let reconnect = tokio::select! {
                    _ = cancel.cancelled() => return Some(Msg::StopRequested),
                    reconnect = self.store.reconnect() => reconnect,
                };
                match reconnect {
                    Ok(()) => engine_info!("Store connection re-established"),
                    Err(err) => engine_warn!("Store reconnect failed: {}", err),
                }
            }
        }
        None
    }
}

/// A poller running on its own tokio task.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<PollerSummary>,
}

impl PollerHandle {
    pub fn spawn(poller: Poller) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poller.run(cancel.clone()));
        Self { cancel, task }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub async fn join(self) -> Result<PollerSummary, tokio::task::JoinError> {
        self.task.await
    }
}
