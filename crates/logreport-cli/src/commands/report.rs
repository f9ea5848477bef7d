use crate::config::Config;
use anyhow::{Context, Result};
use logreport_core::access_log::{RecordReader, select_latest};
use logreport_core::analysis::{self, UrlStats};
use logreport_core::report;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a completed run produced, for the stdout summary and for
/// integration tests.
pub struct ReportOutcome {
    pub stats: Vec<UrlStats>,
    pub report_path: PathBuf,
    pub lines_read: u64,
    pub total_records: u64,
}

pub fn execute(config: &Config, format: &str) -> Result<()> {
    let Some(outcome) = run(config)? else {
        return Ok(());
    };

    match format {
        "json" => output_json(&outcome.stats)?,
        _ => output_pretty(&outcome), // "pretty" is default
    }

    Ok(())
}

/// Run the full pipeline: select the latest log, stream-parse it, aggregate
/// latency per URL, compute statistics, and write the HTML report.
///
/// Returns `None` for the two clean no-report outcomes: no file in the log
/// directory matches the naming convention, or the selected log contains no
/// parseable records. I/O failures anywhere abort the run with no partial
/// report written.
pub fn run(config: &Config) -> Result<Option<ReportOutcome>> {
    let file_names = list_file_names(&config.log_dir)?;

    let Some(descriptor) = select_latest(&config.log_dir, file_names) else {
        tracing::info!(
            "No log file matching the naming convention in {}",
            config.log_dir.display()
        );
        return Ok(None);
    };
    tracing::info!("Found latest log: {}", descriptor.name);

    let mut reader = RecordReader::open(&descriptor)?;
    let (aggregates, totals) = analysis::aggregate(&mut reader)?;
    tracing::debug!(
        "Read {} lines: {} records parsed, {} skipped",
        reader.lines_read(),
        totals.total_records,
        reader.lines_skipped()
    );

    if totals.total_records == 0 {
        tracing::info!("No parseable records in {}; skipping report", descriptor.name);
        return Ok(None);
    }

    let stats = analysis::compute(aggregates, &totals);

    let template = report::load_template(&config.template_path).with_context(|| {
        format!(
            "Failed to read report template {}",
            config.template_path.display()
        )
    })?;
    let html = report::render(&template, &stats)?;
    let report_path = report::write_report(&config.report_dir, descriptor.date, &html)
        .with_context(|| format!("Failed to write report under {}", config.report_dir.display()))?;

    Ok(Some(ReportOutcome {
        stats,
        report_path,
        lines_read: reader.lines_read(),
        total_records: totals.total_records,
    }))
}

fn list_file_names(log_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(log_dir)
        .with_context(|| format!("Failed to list log directory {}", log_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", log_dir.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

fn output_pretty(outcome: &ReportOutcome) {
    use console::style;

    println!("\n{}", style("Access Log Report").bold().cyan());
    println!("{}", style("=================").cyan());

    println!("\n{}", style("Summary:").bold());
    println!("  Lines Read:     {}", outcome.lines_read);
    println!("  Parsed Records: {}", outcome.total_records);
    println!("  Distinct URLs:  {}", outcome.stats.len());
    println!("  Report:         {}", outcome.report_path.display());

    println!("\n{}", style("Slowest URLs by total time:").bold());
    for (i, s) in outcome.stats.iter().take(10).enumerate() {
        println!(
            "  {}. [{:.3} s total, {:.3} s median, {} hits] {}",
            i + 1,
            s.time_sum,
            s.time_med,
            s.count,
            s.url
        );
    }

    println!(); // trailing newline
}

fn output_json(stats: &[UrlStats]) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("{}", json);
    Ok(())
}
