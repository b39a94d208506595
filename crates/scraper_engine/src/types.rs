use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// One response from the source endpoint, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    /// Time from sending the request until the response headers arrived.
    pub elapsed: Duration,
    pub bytes: Vec<u8>,
    /// Set when the body could only be read partially; `bytes` holds what arrived.
    pub body_error: Option<FetchError>,
}

impl FetchOutput {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
    Body,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Body => write!(f, "body read error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The four store operations of one record write, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    HashSet,
    Expire,
    IndexAdd,
    IndexExpire,
}

impl StoreOp {
    pub fn failure_message(&self) -> &'static str {
        match self {
            StoreOp::HashSet => "could not HSET hash value",
            StoreOp::Expire => "could not EXPIRE hash value",
            StoreOp::IndexAdd => "could not ZADD index value",
            StoreOp::IndexExpire => "could not EXPIRE index value",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::HashSet => write!(f, "HSET"),
            StoreOp::Expire => write!(f, "EXPIRE"),
            StoreOp::IndexAdd => write!(f, "ZADD"),
            StoreOp::IndexExpire => write!(f, "EXPIRE index"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{} for record {id}: {source}", .op.failure_message())]
pub struct WriteError {
    pub id: String,
    pub op: StoreOp,
    #[source]
    pub source: StoreError,
}
