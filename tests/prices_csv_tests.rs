use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use travelkit::core::prices::{append_record, last_price, read_records};
use travelkit::models::PriceRecord;

mod common;
use common::{SAMPLE_QUOTE, tk, write_config};

const URL: &str = "https://www.kitco.com/charts/livesilver.html";

#[test]
fn test_header_written_once() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("data").join("silver_prices.csv");

    append_record(&csv, &PriceRecord::new(85.0, "Kitco", URL)).unwrap();
    append_record(&csv, &PriceRecord::new(86.5, "Kitco", URL)).unwrap();

    let content = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp,date,price_usd,source,url");
    assert_eq!(content.matches("timestamp,date").count(), 1);
    assert!(lines[2].contains(",86.50,Kitco,https://www.kitco.com/"));
}

#[test]
fn test_empty_file_gets_header() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("prices.csv");
    fs::write(&csv, "").unwrap();

    append_record(&csv, &PriceRecord::new(31.2, "Kitco", URL)).unwrap();

    let records = read_records(&csv).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price_usd, "31.20");
    assert_eq!(records[0].date.len(), 10);
}

#[test]
fn test_last_price() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("prices.csv");
    assert_eq!(last_price(&csv).unwrap(), None);

    append_record(&csv, &PriceRecord::new(80.0, "Kitco", URL)).unwrap();
    append_record(&csv, &PriceRecord::new(81.5, "Kitco", URL)).unwrap();
    assert_eq!(last_price(&csv).unwrap(), Some(81.5));
}

#[test]
fn test_timestamp_has_microseconds() {
    let rec = PriceRecord::new(1.0, "Kitco", URL);
    let frac = rec.timestamp.rsplit('.').next().unwrap();
    assert_eq!(frac.len(), 6);
    assert!(rec.timestamp.starts_with(&rec.date));
}

#[test]
fn test_cli_silver_from_saved_page() {
    let dir = tempdir().unwrap();
    let sample = dir.path().join("page.txt");
    fs::write(&sample, SAMPLE_QUOTE).unwrap();
    let cfg = write_config(dir.path(), dir.path());

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "silver",
        "--no-commit",
        "--source",
        sample.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("$85.03").and(contains("COMPLETE")));

    let csv = dir.path().join("data").join("silver_prices.csv");
    let records = read_records(&csv).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price_usd, "85.03");
    assert_eq!(records[0].source, "Kitco");
}

#[test]
fn test_cli_silver_prompt_eof_hints_auto() {
    let dir = tempdir().unwrap();
    let sample = dir.path().join("page.txt");
    fs::write(&sample, SAMPLE_QUOTE).unwrap();
    let cfg = write_config(dir.path(), dir.path());

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "silver",
        "--source",
        sample.to_str().unwrap(),
    ])
    .write_stdin("")
    .assert()
    .success()
    .stdout(contains("Enter choice (1-3)").and(contains("--auto")));
}

#[test]
fn test_cli_silver_no_price_fails() {
    let dir = tempdir().unwrap();
    let sample = dir.path().join("page.txt");
    fs::write(&sample, "nothing to see here\n").unwrap();
    let cfg = write_config(dir.path(), dir.path());

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "silver",
        "--no-commit",
        "--source",
        sample.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(contains("Could not extract a price"));

    assert!(!dir.path().join("data").join("silver_prices.csv").exists());
}

fn git_ok(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_cli_silver_auto_commit_failure_is_a_warning() {
    let dir = tempdir().unwrap();
    let site = dir.path().join("site");
    fs::create_dir_all(&site).unwrap();

    // a repository without any remote: the push cannot succeed
    if !git_ok(&site, &["init", "-q"]) {
        return;
    }
    git_ok(&site, &["config", "user.email", "bot@example.com"]);
    git_ok(&site, &["config", "user.name", "Site Bot"]);
    git_ok(&site, &["config", "commit.gpgsign", "false"]);

    let sample = dir.path().join("page.txt");
    fs::write(&sample, SAMPLE_QUOTE).unwrap();
    let cfg = write_config(dir.path(), &site);

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "silver",
        "--auto",
        "--source",
        sample.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(
        contains("⚠️")
            .and(contains("Automated commit failed"))
            .and(contains("❌").not())
            .and(contains("COMPLETE")),
    );

    assert_eq!(
        read_records(&site.join("data").join("silver_prices.csv"))
            .unwrap()
            .len(),
        1
    );
}
