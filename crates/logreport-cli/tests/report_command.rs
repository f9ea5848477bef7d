use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use logreport_cli::commands::report;
use logreport_cli::config::Config;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const TEMPLATE: &str = "<html><script>var table = $table_json;</script></html>";

const LOG: &str = "\
10.0.0.1 - - [30/Jun/2023:03:50:22 +0300] \"GET /a HTTP/1.1\" 200 927 \"-\" \"curl\" 0.100
10.0.0.1 - - [30/Jun/2023:03:50:23 +0300] \"GET /a HTTP/1.1\" 200 927 \"-\" \"curl\" 0.300
10.0.0.2 - - [30/Jun/2023:03:50:24 +0300] \"GET /b HTTP/1.1\" 200 12 \"-\" \"curl\" 0.200
";

/// Builds a workspace with log/, reports/, a template, and a config file.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("log")).unwrap();
        fs::create_dir(dir.path().join("reports")).unwrap();
        fs::write(dir.path().join("report.html"), TEMPLATE).unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            format!(
                "LOG_DIR: {0}/log\nREPORT_DIR: {0}/reports\nTEMPLATE_PATH: {0}/report.html\n",
                dir.path().display()
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn write_log(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join("log").join(name), content).unwrap();
    }

    fn write_gz_log(&self, name: &str, content: &str) {
        let file = fs::File::create(self.dir.path().join("log").join(name)).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.dir.path().join("config.yaml")
    }

    fn report_path(&self, date: &str) -> std::path::PathBuf {
        self.dir
            .path()
            .join("reports")
            .join(format!("report-{date}.html"))
    }

    fn config(&self) -> Config {
        Config {
            log_dir: self.dir.path().join("log"),
            report_dir: self.dir.path().join("reports"),
            template_path: self.dir.path().join("report.html"),
        }
    }
}

fn logreport() -> Command {
    Command::cargo_bin("logreport").unwrap()
}

#[test]
fn test_end_to_end_report_generation() {
    let fixture = Fixture::new();
    fixture.write_log("nginx-access-ui.log-20230630", LOG);

    logreport()
        .arg("--config")
        .arg(fixture.config_path())
        .assert()
        .success();

    let report = fs::read_to_string(fixture.report_path("2023-06-30")).unwrap();
    assert!(report.contains(r#""url":"/a""#));
    assert!(report.contains(r#""url":"/b""#));
    assert!(report.contains(r#""time_sum":0.4"#));
    assert!(!report.contains("$table_json"));

    // Sorted by time_sum descending: /a (0.4) before /b (0.2).
    let a_pos = report.find(r#""url":"/a""#).unwrap();
    let b_pos = report.find(r#""url":"/b""#).unwrap();
    assert!(a_pos < b_pos);
}

#[test]
fn test_pipeline_outcome_statistics() {
    let fixture = Fixture::new();
    fixture.write_log("nginx-access-ui.log-20230630", LOG);

    let outcome = report::run(&fixture.config()).unwrap().unwrap();

    assert_eq!(outcome.lines_read, 3);
    assert_eq!(outcome.total_records, 3);
    assert_eq!(outcome.stats.len(), 2);

    let a = &outcome.stats[0];
    assert_eq!(a.url, "/a");
    assert_eq!(a.count, 2);
    assert!((a.time_avg - 0.2).abs() < 1e-9);
    assert!((a.time_med - 0.2).abs() < 1e-9);
    assert!((a.time_max - 0.3).abs() < 1e-9);
    assert!((a.count_perc - 2.0 / 3.0).abs() < 1e-9);
    assert!((a.time_perc - 0.4 / 0.6).abs() < 1e-9);
}

#[test]
fn test_picks_newest_log_even_when_compressed() {
    let fixture = Fixture::new();
    fixture.write_log(
        "nginx-access-ui.log-20230629",
        "10.0.0.1 - - [x] \"GET /old HTTP/1.1\" 200 1 0.900\n",
    );
    fixture.write_gz_log("nginx-access-ui.log-20230630.gz", LOG);

    logreport()
        .arg("--config")
        .arg(fixture.config_path())
        .assert()
        .success();

    let report = fs::read_to_string(fixture.report_path("2023-06-30")).unwrap();
    assert!(report.contains(r#""url":"/a""#));
    assert!(!report.contains("/old"));
    assert!(!fixture.report_path("2023-06-29").exists());
}

#[test]
fn test_empty_log_dir_is_a_clean_run_without_report() {
    let fixture = Fixture::new();

    logreport()
        .arg("--config")
        .arg(fixture.config_path())
        .assert()
        .success();

    assert_eq!(
        fs::read_dir(fixture.dir.path().join("reports")).unwrap().count(),
        0
    );
}

#[test]
fn test_fully_unparseable_log_skips_the_report() {
    let fixture = Fixture::new();
    fixture.write_log(
        "nginx-access-ui.log-20230630",
        "nothing here\nparses at all\n",
    );

    let outcome = report::run(&fixture.config()).unwrap();
    assert!(outcome.is_none());
    assert!(!fixture.report_path("2023-06-30").exists());
}

#[test]
fn test_missing_log_dir_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        format!("LOG_DIR: {}/no-such-dir\n", dir.path().display()),
    )
    .unwrap();

    logreport()
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list log directory"));
}

#[test]
fn test_json_format_prints_stats_to_stdout() {
    let fixture = Fixture::new();
    fixture.write_log("nginx-access-ui.log-20230630", LOG);

    logreport()
        .arg("--config")
        .arg(fixture.config_path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""url": "/a""#));
}

#[test]
fn test_runs_are_idempotent() {
    let fixture = Fixture::new();
    fixture.write_log("nginx-access-ui.log-20230630", LOG);

    report::run(&fixture.config()).unwrap().unwrap();
    let first = fs::read_to_string(fixture.report_path("2023-06-30")).unwrap();

    report::run(&fixture.config()).unwrap().unwrap();
    let second = fs::read_to_string(fixture.report_path("2023-06-30")).unwrap();

    assert_eq!(first, second);
}
