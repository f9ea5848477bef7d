mod aggregate;
mod stats;

pub use aggregate::aggregate;
pub use stats::compute;

use serde::Serialize;

/// Accumulated latency observations for one distinct URL, keyed by URL in
/// the aggregation map. Every observation is retained until statistics are
/// computed (max and median need the full distribution), so memory is
/// O(total parsed records).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlAggregate {
    pub latencies: Vec<f64>,
    pub count: u64,
}

/// Run-wide totals. Final only after the full pass over the log; percentage
/// statistics must not be computed before then.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunTotals {
    pub total_records: u64,
    pub total_latency: f64,
}

/// The seven per-URL summary statistics. Field names are the contract
/// handed to the report renderer; percentages are fractions in [0, 1].
#[derive(Debug, Clone, Serialize)]
pub struct UrlStats {
    pub url: String,
    pub count: u64,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}
