//! Metrics and health listener. It shares no state with the poller.

use std::time::Instant;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4";

#[derive(Debug, Clone)]
pub struct MetricsState {
    started: Instant,
    version: &'static str,
}

impl MetricsState {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

pub fn router(state: MetricsState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(state)
}

async fn metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let uptime = state.started.elapsed().as_secs_f64();
    let body = format!(
        "# HELP position_scraper_build_info Build information.\n\
         # TYPE position_scraper_build_info gauge\n\
         position_scraper_build_info{{version=\"{}\"}} 1\n\
         # HELP process_uptime_seconds Seconds since the process started.\n\
         # TYPE process_uptime_seconds gauge\n\
         process_uptime_seconds {uptime:.3}\n",
        state.version
    );
    ([(CONTENT_TYPE, PROMETHEUS_TEXT)], body)
}

async fn health(State(state): State<MetricsState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "position_scraper".to_string(),
        version: state.version.to_string(),
    })
}
