//! Metrics collection for the Tuiter backend
//!
//! Counters and timings for document store operations, exported in the
//! Prometheus text format at `/metrics`.

use crate::core::error::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Histogram, HistogramVec, IntCounterVec,
};
use std::time::Instant;

/// Document store metrics, labelled by collection or operation
pub struct StoreMetrics {
    /// Documents inserted, by collection
    pub documents_created: IntCounterVec,
    /// Documents removed, by collection
    pub documents_deleted: IntCounterVec,
    /// Store call latency in seconds, by operation
    pub operation_duration: HistogramVec,
}

/// Centralized metrics for the service
pub struct Metrics {
    /// Document store metrics
    pub store: StoreMetrics,
}

impl Metrics {
    /// Create and register every metric
    pub fn new() -> Result<Self> {
        Ok(Self {
            store: StoreMetrics::new()?,
        })
    }

    /// Get the global metrics instance
    pub fn global() -> &'static Metrics {
        static INSTANCE: Lazy<Metrics> =
            Lazy::new(|| Metrics::new().expect("Failed to initialize metrics"));
        &INSTANCE
    }
}

impl StoreMetrics {
    fn new() -> Result<Self> {
        Ok(Self {
            documents_created: register_int_counter_vec!(
                "tuiter_documents_created_total",
                "Total number of documents inserted",
                &["collection"]
            )?,
            documents_deleted: register_int_counter_vec!(
                "tuiter_documents_deleted_total",
                "Total number of documents deleted",
                &["collection"]
            )?,
            operation_duration: register_histogram_vec!(
                "tuiter_store_operation_seconds",
                "Duration of document store operations in seconds",
                &["operation"],
                vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
            )?,
        })
    }

    /// Start timing a store operation
    pub fn time(&self, operation: &str) -> Timer {
        Timer::start(self.operation_duration.with_label_values(&[operation]))
    }
}

/// Timer for measuring operation duration with histogram recording
pub struct Timer {
    start: Instant,
    histogram: Histogram,
}

impl Timer {
    /// Start a new timer
    pub fn start(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    /// Record the elapsed time and consume the timer
    pub fn finish(self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Register every metric up front so `/metrics` lists them before first use
pub fn init_registry() {
    let _ = Metrics::global();
}

/// Collect all registered metrics as Prometheus exposition text
pub fn collect_metrics() -> String {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_metrics_are_exported() {
        init_registry();
        let metrics = Metrics::global();
        metrics
            .store
            .documents_created
            .with_label_values(&["metrics-test"])
            .inc();
        metrics.store.time("metrics-test").finish();

        let text = collect_metrics();
        assert!(text.contains("tuiter_documents_created_total"));
        assert!(text.contains("tuiter_store_operation_seconds"));
    }
}
