//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain-level gauges (credentials by lifecycle state,
//! issuers by verification, categories by activity, the fee treasury,
//! and the ledger tick) are updated on each `/metrics` scrape (pull
//! model) — see the scrape handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, Gauge, GaugeVec, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::state::AppState;
use skillcert_registry::RegistrySnapshot;

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain gauges (pull model, updated on /metrics scrape) --
    credentials_total: GaugeVec,
    issuers_total: GaugeVec,
    categories_total: GaugeVec,
    holder_profiles_total: Gauge,
    platform_fee_rate: Gauge,
    accumulated_fees: Gauge,
    registry_paused: Gauge,
    ledger_tick: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("skillcert_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "skillcert_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new(
                "skillcert_http_errors_total",
                "Total HTTP errors (4xx and 5xx)",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let credentials_total = GaugeVec::new(
            Opts::new(
                "skillcert_credentials_total",
                "Credentials by lifecycle state",
            ),
            &["state"],
        )
        .expect("metric can be created");

        let issuers_total = GaugeVec::new(
            Opts::new("skillcert_issuers_total", "Issuers by verification status"),
            &["verification"],
        )
        .expect("metric can be created");

        let categories_total = GaugeVec::new(
            Opts::new("skillcert_categories_total", "Skill categories by activity"),
            &["activity"],
        )
        .expect("metric can be created");

        let holder_profiles_total = Gauge::new(
            "skillcert_holder_profiles_total",
            "Holder profiles ever created",
        )
        .expect("metric can be created");

        let platform_fee_rate = Gauge::new(
            "skillcert_platform_fee_rate",
            "Per-mint platform fee rate in micro-units",
        )
        .expect("metric can be created");

        let accumulated_fees = Gauge::new(
            "skillcert_accumulated_fees",
            "Undrained platform fee balance in micro-units",
        )
        .expect("metric can be created");

        let registry_paused = Gauge::new(
            "skillcert_registry_paused",
            "Whether the registry pause flag is set (1=paused)",
        )
        .expect("metric can be created");

        let ledger_tick = Gauge::new("skillcert_ledger_tick", "Current ledger clock tick")
            .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(credentials_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(issuers_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(categories_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(holder_profiles_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(platform_fee_rate.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(accumulated_fees.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(registry_paused.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(ledger_tick.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                credentials_total,
                issuers_total,
                categories_total,
                holder_profiles_total,
                platform_fee_rate,
                accumulated_fees,
                registry_paused,
                ledger_tick,
            }),
        }
    }

    /// Current total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        let mut total = 0u64;
        for mf in &self.inner.http_requests_total.collect() {
            for m in mf.get_metric() {
                total += m.get_counter().get_value() as u64;
            }
        }
        total
    }

    /// Current total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        let mut total = 0u64;
        for mf in &self.inner.http_errors_total.collect() {
            for m in mf.get_metric() {
                total += m.get_counter().get_value() as u64;
            }
        }
        total
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Refresh all domain gauges from a registry snapshot and the clock.
    pub fn update_from_snapshot(&self, snapshot: &RegistrySnapshot, tick: u64) {
        let inner = &self.inner;

        inner.credentials_total.reset();
        inner
            .credentials_total
            .with_label_values(&["active"])
            .set(snapshot.active_credentials as f64);
        inner
            .credentials_total
            .with_label_values(&["expired"])
            .set(snapshot.expired_credentials as f64);
        inner
            .credentials_total
            .with_label_values(&["revoked"])
            .set(snapshot.revoked_credentials as f64);

        inner.issuers_total.reset();
        inner
            .issuers_total
            .with_label_values(&["verified"])
            .set(snapshot.verified_issuers as f64);
        inner
            .issuers_total
            .with_label_values(&["unverified"])
            .set((snapshot.total_issuers - snapshot.verified_issuers) as f64);

        inner.categories_total.reset();
        inner
            .categories_total
            .with_label_values(&["active"])
            .set(snapshot.active_categories as f64);
        inner
            .categories_total
            .with_label_values(&["inactive"])
            .set((snapshot.total_categories - snapshot.active_categories) as f64);

        inner
            .holder_profiles_total
            .set(snapshot.holder_profiles as f64);
        inner.platform_fee_rate.set(snapshot.platform_fee_rate as f64);
        inner.accumulated_fees.set(snapshot.accumulated_fees as f64);
        inner
            .registry_paused
            .set(if snapshot.paused { 1.0 } else { 0.0 });
        inner.ledger_tick.set(tick as f64);
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a request path by replacing numeric segments with `{id}`.
///
/// Credential ids are dense integers, so raw paths would explode the
/// Prometheus label cardinality one credential at a time. Account and
/// category segments are normalized by position under their known
/// prefixes for the same reason.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
    for segment in segments.iter_mut() {
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            *segment = "{id}".to_string();
        }
    }
    // /v1/issuers/:account, /v1/holders/:account/..., /v1/categories/:name
    if segments.len() >= 4 && segments[1] == "v1" {
        match segments[2].as_str() {
            "issuers" | "holders" => segments[3] = "{account}".to_string(),
            "categories" => segments[3] = "{name}".to_string(),
            _ => {}
        }
    }
    segments.join("/")
}

/// Axum middleware recording request count, duration, and error totals.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(metrics) = metrics {
        metrics.record_request(
            &method,
            &path,
            response.status().as_u16(),
            start.elapsed().as_secs_f64(),
        );
    }
    response
}

/// Update domain gauges from `state` and render the exposition text.
///
/// Shared by the `/metrics` scrape handler in `lib.rs`.
pub fn scrape(state: &AppState, metrics: &ApiMetrics) -> Result<String, String> {
    let tick = state.clock.now();
    let snapshot = state.registry.read().snapshot(tick);
    metrics.update_from_snapshot(&snapshot, tick.value());
    metrics.gather_and_encode()
}
