use chrono::{Duration, TimeZone, Utc};
use std::fmt::Write as _;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// 60 daily bars: AAPL rising from 100, TSLA falling from 200.
fn write_fixtures(dir: &Path) {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
    let mut ohlcv = String::from("timestamp,symbol,open,high,low,close,volume\n");
    for i in 0..60_i64 {
        let ts = (start + Duration::days(i)).to_rfc3339();
        let aapl = 100 + i;
        let tsla = 200 - i;
        writeln!(ohlcv, "{ts},AAPL,{aapl},{aapl},{aapl},{aapl},1000").unwrap();
        writeln!(ohlcv, "{ts},TSLA,{tsla},{tsla},{tsla},{tsla},1000").unwrap();
    }
    std::fs::write(dir.join("ohlcv.csv"), ohlcv).unwrap();

    let last = (start + Duration::days(59)).to_rfc3339();
    std::fs::write(
        dir.join("sentiment.csv"),
        format!("timestamp,symbol,sentiment\n{last},AAPL,0.8\n{last},TSLA,0.9\n"),
    )
    .unwrap();

    std::fs::write(
        dir.join("Config.toml"),
        format!(
            "[data]\nohlcv_path = \"{}\"\nsentiment_path = \"{}\"\n",
            dir.join("ohlcv.csv").display(),
            dir.join("sentiment.csv").display()
        ),
    )
    .unwrap();
}

fn sentiment_alloc(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentiment-alloc"));
    cmd.current_dir(dir).env("RUST_LOG", "info");
    cmd
}

#[test]
fn test_allocate_json_output() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let output = sentiment_alloc(dir.path())
        .args(["allocate", "--config", "Config.toml", "--format", "json"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["allocation"]["AAPL"], "0.25");
    assert_eq!(report["allocation"]["TSLA"], "0");
    assert_eq!(report["instruments"][1]["regime"], "bearish");
}

#[test]
fn test_allocate_as_of_drops_future_sentiment() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let output = sentiment_alloc(dir.path())
        .args([
            "allocate",
            "--config",
            "Config.toml",
            "--as-of",
            "2024-02-01T21:00:00Z",
            "--output",
            "weights.csv",
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    // Sentiment is dated after the cutoff, so it is dropped first
    assert!(stderr.contains("no sentiment data available for AAPL"), "{stderr}");

    let written = std::fs::read_to_string(dir.path().join("weights.csv")).unwrap();
    assert_eq!(written, "symbol,weight\nAAPL,0\nTSLA,0\n");
}

#[test]
fn test_show_config_lists_feeds() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let output = sentiment_alloc(dir.path())
        .args(["show-config", "--config", "Config.toml"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["interval"], "1day");
    assert_eq!(summary["assets"], serde_json::json!(["AAPL", "TSLA"]));
    assert_eq!(
        summary["data_feeds"][0],
        serde_json::json!({"kind": "social_sentiment", "symbol": "AAPL"})
    );
}

#[test]
fn test_missing_data_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = sentiment_alloc(dir.path())
        .args(["allocate", "--ohlcv", "missing.csv", "--sentiment", "missing.csv"])
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
}
