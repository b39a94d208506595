use std::time::Duration;

use crate::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one GET against the source endpoint.
    Fetch,
    /// Turn a response body into records.
    Decode { body: Vec<u8> },
    /// Run the four-step store write sequence for one record.
    WriteRecord(Record),
    /// Suspend until the next cycle.
    Sleep { kind: SleepKind, duration: Duration },
    /// Ping the store and reconnect if it does not answer.
    CheckStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepKind {
    /// Regular pause after a completed cycle.
    Normal,
    /// Pause after a transport failure.
    Backoff,
}
