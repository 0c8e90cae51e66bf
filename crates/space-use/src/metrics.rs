//! Space-use report metrics.

use metrics::{Counter, Gauge};

#[derive(Clone, Debug)]
pub(crate) struct ReportMetrics {
    /// Reports built successfully.
    reports_built_total: Counter,
    /// Regions carried by successfully built reports.
    regions_reported_total: Counter,
    /// Encoded size of the most recent report.
    last_report_bytes: Gauge,
}

impl Default for ReportMetrics {
    fn default() -> Self {
        Self {
            reports_built_total: metrics::counter!("space_use.reports_built_total"),
            regions_reported_total: metrics::counter!("space_use.regions_reported_total"),
            last_report_bytes: metrics::gauge!("space_use.last_report_bytes"),
        }
    }
}

impl ReportMetrics {
    pub(crate) fn record_report(&self, regions: usize, encoded_len: usize) {
        self.reports_built_total.increment(1);
        self.regions_reported_total.increment(regions as u64);
        self.last_report_bytes.set(encoded_len as f64);
    }

    /// Failures are labelled by reason, so the handle is resolved per call.
    pub(crate) fn record_failure(&self, reason: &'static str) {
        metrics::counter!("space_use.build_failures_total", "reason" => reason).increment(1);
    }
}
