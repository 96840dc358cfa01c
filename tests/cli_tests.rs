//! Integration tests for the CLI interface
//!
//! Runs the built binary against temporary access logs

mod common;

use assert_cmd::Command;
use common::{access_line, TestLog};
use predicates::prelude::*;

const ENV_VARS: &[&str] = &[
    "LOGSWEEP_LOG_LEVEL",
    "LOGSWEEP_ON_PARSE_ERROR",
    "LOGSWEEP_TIE_BREAK",
    "LOGSWEEP_BUCKETING",
    "LOGSWEEP_PLOT",
    "LOGSWEEP_PLOTLY_USERNAME",
    "LOGSWEEP_PLOTLY_API_KEY",
];

/// Binary with an isolated config directory and no LOGSWEEP_* variables
fn logsweep(log: &TestLog) -> Command {
    let mut cmd = Command::cargo_bin("logsweep").unwrap();
    cmd.env("HOME", log.dir()).env("XDG_CONFIG_HOME", log.dir());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn with_malformed_second_line() -> TestLog {
    TestLog::new(&[
        access_line("12/Mar/2015", "10:00:00", 1_000_000),
        "this is not an access log line\n".to_string(),
        access_line("12/Mar/2015", "10:00:03", 1_000_000),
    ])
}

#[test]
fn test_cli_help_flag() {
    let log = TestLog::new(&[]);
    logsweep(&log)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--ifile"));
}

#[test]
fn test_cli_version_flag() {
    let log = TestLog::new(&[]);
    logsweep(&log)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("logsweep"));
}

#[test]
fn test_missing_input_flag_is_usage_error() {
    let log = TestLog::new(&[]);
    logsweep(&log)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--ifile"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let log = TestLog::overlapping_then_disjoint();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .arg("--frobnicate")
        .assert()
        .code(2);
}

#[test]
fn test_report_for_overlapping_requests() {
    let log = TestLog::overlapping_then_disjoint();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("logsweep start time - "))
        .stdout(predicate::str::contains("Total Requests - 3"))
        .stdout(predicate::str::contains("Parsed requests - 3"))
        .stdout(predicate::str::contains("Unparsed lines - 0"))
        .stdout(predicate::str::contains(
            "Day 12/Mar/2015 - avg concurrency 1.00, max concurrency 2",
        ))
        .stdout(predicate::str::contains("Overall min concurrency - 0"))
        .stdout(predicate::str::contains("Overall avg concurrency - 1.0"))
        .stdout(predicate::str::contains("Overall max concurrency - 2"))
        .stdout(predicate::str::contains("Run time of logsweep - "));
}

#[test]
fn test_skip_policy_warns_and_continues() {
    let log = with_malformed_second_line();
    logsweep(&log)
        .arg("--ifile")
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed requests - 2"))
        .stdout(predicate::str::contains("Unparsed lines - 1"))
        .stderr(predicate::str::contains("cannot parse log line no - 2"));
}

#[test]
fn test_abort_policy_exits_with_parse_status() {
    let log = with_malformed_second_line();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .args(["--on-parse-error", "abort"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Error: cannot parse log line no - 2"))
        .stdout(predicate::str::contains("Total Requests").not());
}

#[test]
fn test_abort_policy_from_environment() {
    let log = with_malformed_second_line();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .env("LOGSWEEP_ON_PARSE_ERROR", "abort")
        .assert()
        .code(4);
}

#[test]
fn test_missing_input_file() {
    let log = TestLog::new(&[]);
    logsweep(&log)
        .arg("-i")
        .arg(log.dir().join("nope.log"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope.log"));
}

#[test]
fn test_empty_log_reports_no_data() {
    let log = TestLog::new(&[]);
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Requests - 0"))
        .stdout(predicate::str::contains("No concurrency data"));
}

#[test]
fn test_global_bucketing_omits_day_lines() {
    let log = TestLog::overlapping_then_disjoint();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .args(["--bucketing", "global"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day ").not())
        .stdout(predicate::str::contains("Overall max concurrency - 2"));
}

#[test]
fn test_plot_to_file_sink() {
    let log = TestLog::overlapping_then_disjoint();
    let chart = log.dir().join("chart.json");

    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .args(["--plot", "enabled", "--chart-sink", "file", "--chart-output"])
        .arg(&chart)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chart - "));

    let figure: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&chart).unwrap()).unwrap();
    assert_eq!(figure["layout"]["barmode"], "group");
    assert_eq!(figure["data"][0]["x"][0], "12/Mar/2015");
    assert_eq!(figure["data"][1]["y"][0], 2.0);
}

#[test]
fn test_plotly_without_credentials_is_config_error() {
    let log = TestLog::overlapping_then_disjoint();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .args(["--plot", "enabled"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LOGSWEEP_PLOTLY_USERNAME"));
}

#[test]
fn test_config_file_sets_bucketing() {
    let log = TestLog::overlapping_then_disjoint();
    let config = log.write_file("logsweep.toml", "bucketing = \"global\"\n");

    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Day ").not());
}

#[test]
fn test_flag_overrides_config_file() {
    let log = TestLog::overlapping_then_disjoint();
    let config = log.write_file("logsweep.toml", "bucketing = \"global\"\n");

    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .arg("-c")
        .arg(&config)
        .args(["--bucketing", "per-day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 12/Mar/2015"));
}

#[test]
fn test_invalid_config_file() {
    let log = TestLog::overlapping_then_disjoint();
    let config = log.write_file("logsweep.toml", "tie_break = [not toml\n");

    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .arg("-c")
        .arg(&config)
        .assert()
        .code(2);
}

#[test]
fn test_missing_config_file() {
    let log = TestLog::overlapping_then_disjoint();
    logsweep(&log)
        .arg("-i")
        .arg(log.path())
        .arg("-c")
        .arg(log.dir().join("absent.toml"))
        .assert()
        .code(2);
}
