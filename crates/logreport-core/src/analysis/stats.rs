use super::{RunTotals, UrlAggregate, UrlStats};
use std::collections::HashMap;

/// Compute the per-URL summary statistics from finalized aggregates.
///
/// Results are sorted by `time_sum` descending, ties broken by URL
/// ascending, so the output is deterministic regardless of map iteration
/// order. An empty aggregate map (zero parsed records) yields an empty
/// vector — the explicit empty-report outcome; no division by a zero total
/// can occur because the per-URL loop never runs in that case.
pub fn compute(aggregates: HashMap<String, UrlAggregate>, totals: &RunTotals) -> Vec<UrlStats> {
    let mut stats: Vec<UrlStats> = aggregates
        .into_iter()
        .map(|(url, agg)| url_stats(url, &agg, totals))
        .collect();

    stats.sort_by(|a, b| {
        b.time_sum
            .partial_cmp(&a.time_sum)
            .unwrap()
            .then_with(|| a.url.cmp(&b.url))
    });

    tracing::info!("Computed statistics for {} URLs", stats.len());
    stats
}

fn url_stats(url: String, agg: &UrlAggregate, totals: &RunTotals) -> UrlStats {
    // An aggregate only exists after its first observation, so count >= 1
    // and both run totals are nonzero here.
    let time_sum: f64 = agg.latencies.iter().sum();
    let time_avg = time_sum / agg.count as f64;
    let time_max = agg.latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    UrlStats {
        url,
        count: agg.count,
        count_perc: agg.count as f64 / totals.total_records as f64,
        time_sum,
        time_perc: time_sum / totals.total_latency,
        time_avg,
        time_max,
        time_med: median(&agg.latencies),
    }
}

/// Standard median: the middle element of the sorted values, or the mean of
/// the two middle elements when the length is even.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
