//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use scraper_engine::{
    Cadence, FetchSettings, PollerConfig, DEFAULT_INDEX_KEY, DEFAULT_SOURCE_URL,
    DEFAULT_USER_AGENT,
};

use crate::logging::{LogContext, LogFormat};

/// Command-line arguments for position_scraper. Every option can also be set
/// through the environment.
#[derive(Parser, Debug)]
#[command(name = "position_scraper")]
#[command(about = "Polls vehicle positions and publishes them to Redis")]
#[command(version)]
pub struct Args {
    /// Endpoint returning the JSON array of positions
    #[arg(long, env = "SOURCE_URL", default_value = DEFAULT_SOURCE_URL, value_parser = url::Url::parse)]
    pub source_url: url::Url,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Address of the metrics and health listener
    #[arg(long, env = "METRICS_ADDR", default_value = "0.0.0.0:2112")]
    pub metrics_addr: SocketAddr,

    /// Environment label attached to every log line
    #[arg(long, env = "ENVIRONMENT", default_value = "")]
    pub environment: String,

    /// Emit JSON log lines instead of text
    #[arg(long, env = "ELK_LOGGER")]
    pub elk_logger: bool,

    #[arg(long, env = "APPLICATION_NAME", default_value = "API_Server")]
    pub application_name: String,

    #[arg(long, env = "APPLICATION_ID", default_value = "A0002")]
    pub application_id: String,

    /// Pause before the first connection attempt so the store can come up
    #[arg(long, env = "STARTUP_DELAY_SECS", default_value_t = 5)]
    pub startup_delay_secs: u64,

    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 15)]
    pub poll_interval_secs: u64,

    /// Pause after a failed fetch
    #[arg(long, env = "BACKOFF_SECS", default_value_t = 15)]
    pub backoff_secs: u64,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 5)]
    pub request_timeout_secs: u64,

    /// TTL of every per-record hash and of the availability index
    #[arg(long, env = "RECORD_TTL_SECS", default_value_t = 180)]
    pub record_ttl_secs: u64,

    #[arg(long, env = "INDEX_KEY", default_value = DEFAULT_INDEX_KEY)]
    pub index_key: String,

    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Args {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    pub fn log_format(&self) -> LogFormat {
        if self.elk_logger {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext {
            application_name: self.application_name.clone(),
            application_id: self.application_id.clone(),
            environment: self.environment.clone(),
        }
    }

    pub fn poller_config(&self) -> PollerConfig {
        let request_timeout = Duration::from_secs(self.request_timeout_secs);
        PollerConfig {
            source_url: self.source_url.to_string(),
            fetch: FetchSettings {
                connect_timeout: request_timeout,
                request_timeout,
                user_agent: self.user_agent.clone(),
            },
            record_ttl: Duration::from_secs(self.record_ttl_secs),
            index_key: self.index_key.clone(),
            cadence: Cadence {
                poll_interval: Duration::from_secs(self.poll_interval_secs),
                backoff: Duration::from_secs(self.backoff_secs),
            },
        }
    }
}
