//! # Prometheus Metrics
//!
//! Operational counters for the devnet node, scraped at `/metrics` on the
//! metrics port. Everything lives in a dedicated [`prometheus::Registry`]
//! with the `rail_nft` prefix.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Metric handles for the node. Cloning shares the underlying metrics.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Claim batches published.
    pub batches_created_total: IntCounter,
    /// Claims that passed every check and were applied.
    pub claims_accepted_total: IntCounter,
    /// Claims rejected for any reason.
    pub claims_rejected_total: IntCounter,
    /// Tokens issued by claims and mints combined.
    pub tokens_issued_total: IntCounter,
    /// JSON-RPC requests, by method.
    pub rpc_requests_total: IntCounterVec,
    /// JSON-RPC handling latency in seconds.
    pub rpc_latency_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics.
    ///
    /// Fails only if two metrics collide, which would be a programming
    /// error in this constructor.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("rail_nft".into()), None)?;

        let batches_created_total =
            IntCounter::new("batches_created_total", "Number of claim batches published")?;
        registry.register(Box::new(batches_created_total.clone()))?;

        let claims_accepted_total =
            IntCounter::new("claims_accepted_total", "Number of successful claims")?;
        registry.register(Box::new(claims_accepted_total.clone()))?;

        let claims_rejected_total =
            IntCounter::new("claims_rejected_total", "Number of rejected claims")?;
        registry.register(Box::new(claims_rejected_total.clone()))?;

        let tokens_issued_total = IntCounter::new(
            "tokens_issued_total",
            "Number of tokens issued by claims and mints",
        )?;
        registry.register(Box::new(tokens_issued_total.clone()))?;

        let rpc_requests_total = IntCounterVec::new(
            Opts::new("rpc_requests_total", "Number of JSON-RPC requests served"),
            &["method"],
        )?;
        registry.register(Box::new(rpc_requests_total.clone()))?;

        let rpc_latency_seconds = Histogram::with_opts(
            HistogramOpts::new("rpc_latency_seconds", "JSON-RPC handling latency in seconds")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(rpc_latency_seconds.clone()))?;

        Ok(Self {
            registry,
            batches_created_total,
            claims_accepted_total,
            claims_rejected_total,
            tokens_issued_total,
            rpc_requests_total,
            rpc_latency_seconds,
        })
    }

    /// Renders every registered metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics handle passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// `GET /metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
