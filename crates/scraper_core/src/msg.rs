#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Driver is ready; the store handle has been acquired.
    Started,
    /// The request could not be sent or timed out.
    FetchFailed { reason: String },
    /// A response arrived. Any status, including non-2xx.
    FetchCompleted { status: u16, body: Vec<u8> },
    /// Decoder output. Empty when the body was unusable.
    Decoded { records: Vec<crate::Record> },
    /// All four store operations for the record succeeded.
    RecordWritten { id: String },
    /// One of the store operations for the record failed.
    RecordFailed { id: String, reason: String },
    /// The inter-cycle sleep finished.
    SleepElapsed,
    /// External stop signal observed by the driver.
    StopRequested,
}
