use regex::Regex;

/// One parsed (URL, latency) observation. Ephemeral: produced per line and
/// consumed immediately by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub url: String,
    pub latency: f64,
}

/// Extracts the request URL and latency from a single raw log line.
///
/// Extraction is best-effort: a line that matches neither pattern is skipped
/// by returning `None`, never an error.
pub struct LineParser {
    url: Regex,
    latency: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            // Quoted request section: method, then a path starting at '/'.
            url: Regex::new(r#""\w+ (/[^"]*)""#).expect("url pattern is valid"),
            // Trailing $request_time field, seconds with a fractional part.
            latency: Regex::new(r"(\d+\.\d+)$").expect("latency pattern is valid"),
        }
    }

    /// Parse one line into a record.
    ///
    /// The URL is the first whitespace-delimited token of the quoted request
    /// path (leading slash and query string kept, protocol token dropped);
    /// the latency is the trailing decimal field parsed as seconds.
    pub fn parse(&self, line: &str) -> Option<ParsedRecord> {
        let caps = self.url.captures(line)?;
        let url = caps[1].split_whitespace().next()?.to_string();

        let caps = self.latency.captures(line)?;
        let latency: f64 = caps[1].parse().ok()?;

        Some(ParsedRecord { url, latency })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}
