use super::{RunTotals, UrlAggregate};
use crate::Result;
use crate::access_log::ParsedRecord;
use std::collections::HashMap;

/// Fold a lazy record stream into per-URL aggregates and run totals.
///
/// Consumes the stream exactly once, in order, to completion; an `Err`
/// record aborts the pass. URLs compare by exact string equality — no
/// case-folding, slash-collapsing, or query-string normalization — so every
/// record is attributed to exactly one URL.
pub fn aggregate<I>(records: I) -> Result<(HashMap<String, UrlAggregate>, RunTotals)>
where
    I: IntoIterator<Item = Result<ParsedRecord>>,
{
    let mut aggregates: HashMap<String, UrlAggregate> = HashMap::new();
    let mut totals = RunTotals::default();

    for record in records {
        let record = record?;
        let entry = aggregates.entry(record.url).or_default();
        entry.latencies.push(record.latency);
        entry.count += 1;
        totals.total_records += 1;
        totals.total_latency += record.latency;
    }

    tracing::debug!(
        "Aggregated {} records across {} URLs",
        totals.total_records,
        aggregates.len()
    );

    Ok((aggregates, totals))
}
