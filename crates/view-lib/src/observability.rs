//! Observability infrastructure for the node view
//!
//! Provides:
//! - Prometheus metrics (resets, row count, populate latency, domain mismatches)
//! - Structured logging of view events with tracing

use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Encoder, Histogram,
    IntCounter, IntGauge, TextEncoder,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for populate latency (in seconds)
const POPULATE_BUCKETS: &[f64] = &[
    0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ViewMetricsInner> = OnceLock::new();

struct ViewMetricsInner {
    model_resets: IntCounter,
    model_rows: IntGauge,
    populate_seconds: Histogram,
    domain_mismatches: IntCounter,
}

impl ViewMetricsInner {
    fn new() -> Self {
        Self {
            model_resets: register_int_counter!(
                "nodeview_model_resets_total",
                "Number of wholesale record store replacements"
            )
            .expect("Failed to register model_resets_total"),

            model_rows: register_int_gauge!(
                "nodeview_model_rows",
                "Number of rows after the most recent reset"
            )
            .expect("Failed to register model_rows"),

            populate_seconds: register_histogram!(
                "nodeview_populate_seconds",
                "Time spent replacing the record store and delivering the reset",
                POPULATE_BUCKETS.to_vec()
            )
            .expect("Failed to register populate_seconds"),

            domain_mismatches: register_int_counter!(
                "nodeview_domain_mismatches_total",
                "Enumerated values presented under the wrong domain"
            )
            .expect("Failed to register domain_mismatches_total"),
        }
    }
}

/// Handle to the process-wide view metrics
///
/// Clones share the same underlying metrics.
#[derive(Clone, Debug)]
pub struct ViewMetrics {
    _private: (),
}

impl Default for ViewMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ViewMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ViewMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a completed reset
    pub fn observe_reset(&self, rows: usize, duration_secs: f64) {
        let inner = self.inner();
        inner.model_resets.inc();
        inner.model_rows.set(rows as i64);
        inner.populate_seconds.observe(duration_secs);
    }

    pub fn inc_domain_mismatches(&self) {
        self.inner().domain_mismatches.inc();
    }

    pub fn resets_total(&self) -> u64 {
        self.inner().model_resets.get()
    }

    pub fn domain_mismatches_total(&self) -> u64 {
        self.inner().domain_mismatches.get()
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Structured logger for view events
#[derive(Clone)]
pub struct StructuredLogger {
    view_name: String,
}

impl StructuredLogger {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
        }
    }

    pub fn log_startup(&self, version: &str, columns: usize) {
        info!(
            event = "view_started",
            view = %self.view_name,
            version = %version,
            columns = columns,
            "Node view started"
        );
    }

    /// Log a batch of records handed over by a supplier
    pub fn log_records_loaded(&self, source: &str, count: usize) {
        info!(
            event = "records_loaded",
            view = %self.view_name,
            source = %source,
            count = count,
            "Loaded node records"
        );
    }

    pub fn log_reset(&self, generation: u64, rows: usize) {
        info!(
            event = "model_reset",
            view = %self.view_name,
            generation = generation,
            rows = rows,
            "Model reset"
        );
    }

    /// Log the rows left after the overlay applied its sort and filter
    pub fn log_overlay(&self, visible: usize, total: usize, sort: Option<&str>, filtered: bool) {
        if filtered && visible == 0 && total > 0 {
            warn!(
                event = "overlay_applied",
                view = %self.view_name,
                visible = visible,
                total = total,
                sort = ?sort,
                "Filter hides every row"
            );
        } else {
            info!(
                event = "overlay_applied",
                view = %self.view_name,
                visible = visible,
                total = total,
                sort = ?sort,
                filtered = filtered,
                "Overlay applied"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_metrics_observe() {
        let metrics = ViewMetrics::new();
        let before = metrics.resets_total();

        metrics.observe_reset(10, 0.0001);
        metrics.inc_domain_mismatches();

        assert!(metrics.resets_total() > before);
        assert!(metrics.domain_mismatches_total() >= 1);
        let text = metrics.render();
        assert!(text.contains("nodeview_model_resets_total"));
        assert!(text.contains("nodeview_populate_seconds"));
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-view");
        assert_eq!(logger.view_name, "test-view");
        logger.log_overlay(0, 3, Some("state"), true);
    }
}
