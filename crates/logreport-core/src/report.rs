use crate::Result;
use crate::analysis::UrlStats;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const TABLE_PLACEHOLDER: &str = "$table_json";

/// Read the report template from disk.
pub fn load_template(path: &Path) -> Result<String> {
    tracing::debug!("Reading report template: {}", path.display());
    Ok(fs::read_to_string(path)?)
}

/// Substitute the serialized statistics table into the template.
pub fn render(template: &str, stats: &[UrlStats]) -> Result<String> {
    let table_json = serde_json::to_string(stats)?;
    Ok(template.replace(TABLE_PLACEHOLDER, &table_json))
}

/// Write the rendered report as `report-<YYYY-MM-DD>.html` under
/// `report_dir`.
///
/// The content goes to a temporary sibling first and is renamed into place,
/// so an interrupted run never leaves a partial report behind.
pub fn write_report(report_dir: &Path, log_date: NaiveDate, html: &str) -> Result<PathBuf> {
    let final_path = report_dir.join(format!("report-{}.html", log_date.format("%Y-%m-%d")));
    let tmp_path = final_path.with_extension("html.tmp");

    fs::write(&tmp_path, html)?;
    fs::rename(&tmp_path, &final_path)?;

    tracing::info!("Wrote report: {}", final_path.display());
    Ok(final_path)
}
