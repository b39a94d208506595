use std::collections::VecDeque;
use std::time::Duration;

use crate::{PollerSummary, Record, SleepKind};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Init,
    Fetching,
    Decoding,
    Writing,
    Sleeping(SleepKind),
    Stopped,
}

/// Inter-cycle pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub poll_interval: Duration,
    pub backoff: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl Cadence {
    pub fn duration(&self, kind: SleepKind) -> Duration {
        match kind {
            SleepKind::Normal => self.poll_interval,
            SleepKind::Backoff => self.backoff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollerState {
    phase: Phase,
    cadence: Cadence,
    cycle: u64,
    pending: VecDeque<Record>,
    store_suspect: bool,
    records_written: u64,
    fetch_failures: u64,
    write_failures: u64,
}

impl PollerState {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 1-based number of the cycle in progress; 0 before start.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Records of the current batch not yet handed to the writer.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    pub fn summary(&self) -> PollerSummary {
        PollerSummary {
            phase: self.phase,
            cycles: self.cycle,
            records_written: self.records_written,
            fetch_failures: self.fetch_failures,
            write_failures: self.write_failures,
        }
    }

    pub(crate) fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn begin_cycle(&mut self) {
        self.cycle += 1;
        self.pending.clear();
        self.phase = Phase::Fetching;
    }

    pub(crate) fn load_batch(&mut self, records: Vec<Record>) {
        self.pending = records.into();
    }

    pub(crate) fn next_record(&mut self) -> Option<Record> {
        self.pending.pop_front()
    }

    /// Drops every record not yet written in this cycle.
    pub(crate) fn drop_pending(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn abort_batch(&mut self) {
        self.drop_pending();
        self.write_failures += 1;
        self.store_suspect = true;
    }

    pub(crate) fn record_written(&mut self) {
        self.records_written += 1;
    }

    pub(crate) fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Returns whether the store needs a health check, clearing the flag.
    pub(crate) fn take_store_suspect(&mut self) -> bool {
        std::mem::take(&mut self.store_suspect)
    }
}
