use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

mod common;
use common::{tk, write_config};

#[test]
fn test_init_test_mode_does_not_write_config() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("travelkit.conf");
    let db = dir.path().join("local.sqlite");

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "--test",
        "init",
    ])
    .assert()
    .success()
    .stdout(contains("initialization completed"));

    assert!(db.exists());
    assert!(!cfg.exists());
}

#[test]
fn test_init_writes_config() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("travelkit.conf");
    let db = dir.path().join("local.sqlite");

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "init",
    ])
    .assert()
    .success();

    let yaml = fs::read_to_string(&cfg).unwrap();
    assert!(yaml.contains("website_dir:"));
    assert!(yaml.contains("quality: 85"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("travelkit.conf");
    fs::write(&cfg, "images: [not, a, map]\n").unwrap();

    tk().args(["--config", cfg.to_str().unwrap(), "config", "--print"])
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}

#[test]
fn test_invalid_table_name_rejected() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("travelkit.conf");
    fs::write(&cfg, "ideas:\n  table: \"ideas; DROP TABLE x\"\n").unwrap();

    tk().args(["--config", cfg.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(contains("ideas.table"));
}

#[test]
fn test_config_print() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), dir.path());

    tk().args(["--config", cfg.to_str().unwrap(), "config", "--print"])
        .assert()
        .success()
        .stdout(contains("backend: sqlite").and(contains("livesilver")));
}

#[test]
fn test_import_status_check_flow() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), dir.path());
    let cfg = cfg.to_str().unwrap();
    let sql = dir.path().join("ideas.sql");
    fs::write(
        &sql,
        "INSERT INTO travel.travel_development_ideas (idea) VALUES ('Add Tianjin food guide');\n\
         INSERT INTO travel.travel_development_ideas (idea) VALUES ('Optimize image images/none.jpg for city Tianjin');\n",
    )
    .unwrap();

    tk().args(["--config", cfg, "import", sql.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Imported: Add Tianjin food guide"));

    tk().args(["--config", cfg, "import", sql.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Skipping (already in DB)"));

    tk().args(["--config", cfg, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"pending\": 2"));

    tk().args(["--config", cfg, "check", "--no-git"])
        .assert()
        .success()
        .stdout(
            contains("Found 2 pending task(s)")
                .and(contains("Image file not found"))
                .and(contains("Tasks completed: 2")),
        );

    tk().args(["--config", cfg, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"completed\": 2").and(contains("\"pending\": 0")));

    tk().args(["--config", cfg, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("import").and(contains("check")));
}

#[test]
fn test_import_missing_file_is_not_fatal() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), dir.path());

    tk().args([
        "--config",
        cfg.to_str().unwrap(),
        "import",
        dir.path().join("nope.sql").to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("File not found"));
}
