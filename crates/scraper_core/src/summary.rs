use crate::Phase;

/// Counters accumulated over the lifetime of a poller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollerSummary {
    pub phase: Phase,
    pub cycles: u64,
    pub records_written: u64,
    pub fetch_failures: u64,
    pub write_failures: u64,
}
