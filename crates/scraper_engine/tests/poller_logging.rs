mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{wait_until, RecordingStore};
use log::{LevelFilter, Log, Metadata, Record};
use scraper_engine::{Cadence, FetchSettings, Poller, PollerConfig, PollerHandle, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Keeps every formatted message so the test can inspect the cycle log.
struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

fn logged(fragment: &str) -> usize {
    LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(fragment))
        .count()
}

#[tokio::test]
async fn write_phase_is_logged_for_empty_and_malformed_bodies() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    for (round, body) in ["[]", "{not json"].into_iter().enumerate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/positions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let config = PollerConfig {
            source_url: format!("{}/positions", server.uri()),
            cadence: Cadence {
                poll_interval: Duration::from_secs(30),
                backoff: Duration::from_secs(30),
            },
            ..PollerConfig::default()
        };
        let store = Arc::new(RecordingStore::new());
        let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
        let handle = PollerHandle::spawn(Poller::new(config, fetcher, store.clone()));

        assert!(wait_until(|| logged("Sleeping for") == round + 1).await);
        handle.stop();
        handle.join().await.unwrap();

        assert!(store.attempted().is_empty());
        assert_eq!(logged("Writing keys to the store (index available)"), round + 1);
        assert_eq!(logged("Keys written to the store in"), round + 1);
    }
}
