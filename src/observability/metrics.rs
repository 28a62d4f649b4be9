use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Authenticator metrics
    pub token_fetch_requests: IntCounterVec,
    pub token_fetch_failures: IntCounterVec,
    pub token_fetch_duration: HistogramVec,
    pub token_cache_hits: IntCounterVec,

    // Connector metrics
    pub connection_checks: IntCounterVec,

    // Config
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("sourceconnectors".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            token_fetch_requests: IntCounterVec::new(Opts::new("token_fetch_requests_total", "Token fetch attempts by authenticator"),&["authenticator"],).unwrap(),
            token_fetch_failures: IntCounterVec::new(Opts::new("token_fetch_failures_total", "Token fetch failures by reason"),&["authenticator", "reason"],).unwrap(),
            token_fetch_duration: HistogramVec::new(HistogramOpts::new("token_fetch_duration_seconds", "Token fetch duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),&["authenticator"],).unwrap(),
            token_cache_hits: IntCounterVec::new(Opts::new("token_cache_hits_total", "Tokens served from cache"),&["authenticator"],).unwrap(),

            connection_checks: IntCounterVec::new(Opts::new("connection_checks_total", "Connection checks by outcome"),&["connector", "outcome"],).unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors while loading config",).unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.connection_checks.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }
}

/// Render the registry in the Prometheus text exposition format.
pub async fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = get_metrics().await.registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exposition_contains_namespaced_counters() {
        get_metrics().await.token_cache_hits.with_label_values(&["exposition_test"]).inc();
        let text = encode_metrics().await.unwrap();
        assert!(text.contains("sourceconnectors_token_cache_hits_total"));
        assert!(text.contains("exposition_test"));
    }
}
