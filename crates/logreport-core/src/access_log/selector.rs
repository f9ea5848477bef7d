use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};

/// The single log file chosen for a run.
///
/// Immutable after creation; the `compressed` flag tells the reader which
/// decompression strategy to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileDescriptor {
    pub name: String,
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compressed: bool,
}

/// Naming convention for the monitored log family: a fixed prefix, an
/// 8-digit `YYYYMMDD` date, and an optional gzip marker.
const LOG_NAME_PATTERN: &str = r"^nginx-access-ui\.log-(\d{8})(\.gz)?$";

/// Pick the most recent log among `file_names` by the date embedded in each
/// filename.
///
/// Filenames that do not match the naming convention, or whose date token is
/// not a real calendar date, are skipped. Ties on date are broken
/// deterministically: a plain file wins over a compressed one, then the
/// lexicographically greatest name wins — directory-listing order never
/// influences the result. Returns `None` when nothing matches.
pub fn select_latest<I, S>(log_dir: &Path, file_names: I) -> Option<LogFileDescriptor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pattern = Regex::new(LOG_NAME_PATTERN).expect("log name pattern is valid");

    let mut latest: Option<LogFileDescriptor> = None;
    for name in file_names {
        let name = name.as_ref();
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y%m%d") else {
            tracing::debug!("Skipping {}: date token is not a calendar date", name);
            continue;
        };

        let candidate = LogFileDescriptor {
            name: name.to_string(),
            path: log_dir.join(name),
            date,
            compressed: caps.get(2).is_some(),
        };
        latest = Some(match latest {
            Some(current) => newer(current, candidate),
            None => candidate,
        });
    }

    latest
}

fn newer(a: LogFileDescriptor, b: LogFileDescriptor) -> LogFileDescriptor {
    // Date first, then plain over compressed, then greatest name.
    let key = |d: &LogFileDescriptor| (d.date, !d.compressed, d.name.clone());
    if key(&b) > key(&a) { b } else { a }
}
