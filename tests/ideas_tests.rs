use std::fs;
use tempfile::tempdir;
use travelkit::core::checker::{Checker, NOTE_AUTO_COMPLETED, NOTE_IMAGE_MISSING, Outcome};
use travelkit::core::import::{extract_ideas, import_files};
use travelkit::db::IdeaStore;
use travelkit::db::initialize::init_db;
use travelkit::db::pool::DbPool;
use travelkit::db::psql::{parse_pending_rows, parse_stats_row};
use travelkit::db::sqlite_store::SqliteStore;
use travelkit::models::TaskKind;

fn memory_store() -> SqliteStore {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    SqliteStore::new(pool)
}

#[test]
fn test_extract_every_statement() {
    let sql = "-- tasks\n\
               INSERT INTO travel.travel_development_ideas (idea) VALUES ('Add Tianjin page');\n\
               insert into travel.travel_development_ideas (idea)\n  values (\n  'Fix Xi''an map'\n);\n\
               INSERT INTO travel.travel_development_ideas (idea) VALUES ('Optimize image images/a.jpg for city Beijing');\n";

    let ideas = extract_ideas(sql).unwrap();
    assert_eq!(
        ideas,
        vec![
            "Add Tianjin page".to_string(),
            "Fix Xi'an map".to_string(),
            "Optimize image images/a.jpg for city Beijing".to_string(),
        ]
    );
}

#[test]
fn test_extract_nothing() {
    assert!(extract_ideas("SELECT 1;").unwrap().is_empty());
}

#[test]
fn test_classify() {
    assert_eq!(
        TaskKind::classify("Optimize image ../images/user_photos/x.jpg for city Kaifeng"),
        TaskKind::OptimizeImage {
            path: "images/user_photos/x.jpg".into()
        }
    );
    assert_eq!(
        TaskKind::classify("Optimize image for the hero banner"),
        TaskKind::Other
    );
    assert_eq!(TaskKind::classify("Add dark mode"), TaskKind::Other);
}

#[test]
fn test_import_skips_duplicates() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.sql");
    let b = dir.path().join("b.sql");
    fs::write(&a, "INSERT INTO t (idea) VALUES ('one');\nINSERT INTO t (idea) VALUES ('two');\n").unwrap();
    fs::write(&b, "INSERT INTO t (idea) VALUES ('two');\n").unwrap();
    let missing = dir.path().join("missing.sql");

    let mut store = memory_store();
    let summary = import_files(&mut store, &[a.clone(), b, missing]).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.missing_files, 1);
    assert_eq!(summary.failed, 0);

    let again = import_files(&mut store, &[a]).unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 2);

    let stats = store.stats().unwrap();
    assert_eq!((stats.total, stats.completed, stats.pending), (2, 0, 2));
}

#[test]
fn test_checker_marks_rows_with_notes() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    image::RgbImage::from_fn(48, 32, |x, y| image::Rgb([(x * 5) as u8, (y * 7) as u8, 90]))
        .save(images.join("hero.png"))
        .unwrap();

    let mut store = memory_store();
    store.insert("Optimize image ../images/hero.png for city Tianjin").unwrap();
    store.insert("Optimize image images/gone.jpg for city Xi'an").unwrap();
    store.insert("Add a currency converter").unwrap();

    let checker = Checker::new(dir.path(), 85);
    assert_eq!(checker.report_pending_count(&mut store), Some(3));

    let tasks = checker.pending(&mut store).unwrap();
    let results = checker.process_all(&mut store, &tasks);

    assert!(matches!(results[0].outcome, Outcome::Optimized(_)));
    assert_eq!(results[1].outcome, Outcome::ImageMissing);
    assert_eq!(results[2].outcome, Outcome::AutoCompleted);
    assert!(results.iter().all(|r| r.outcome.completed()));
    assert!(!images.join("hero.png.optimized").exists());

    let stats = store.stats().unwrap();
    assert_eq!((stats.total, stats.completed, stats.pending), (3, 3, 0));

    let texts: Vec<String> = store
        .conn()
        .prepare("SELECT idea FROM travel_development_ideas ORDER BY id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(texts[0], "Optimize image ../images/hero.png for city Tianjin");
    assert_eq!(
        texts[1],
        format!("Optimize image images/gone.jpg for city Xi'an ({NOTE_IMAGE_MISSING})")
    );
    assert_eq!(texts[2], format!("Add a currency converter ({NOTE_AUTO_COMPLETED})"));
}

#[test]
fn test_checker_leaves_undecodable_image_pending() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();

    let mut store = memory_store();
    store.insert("Optimize image broken.jpg for city Kaifeng").unwrap();

    let checker = Checker::new(dir.path(), 85);
    let tasks = checker.pending(&mut store).unwrap();
    let results = checker.process_all(&mut store, &tasks);

    assert!(matches!(results[0].outcome, Outcome::Failed(_)));
    assert_eq!(store.pending_count().unwrap(), 1);
    assert!(!dir.path().join("broken.jpg.optimized").exists());
}

#[test]
fn test_parse_psql_rows() {
    let out = "3|Add page|2026-02-14 10:00:00\n\n7|Compare a | b layout|2026-02-15 09:30:00\n";
    let rows = parse_pending_rows(out);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 3);
    assert_eq!(rows[1].idea, "Compare a | b layout");
    assert_eq!(rows[1].created_at, "2026-02-15 09:30:00");
}

#[test]
fn test_parse_psql_stats() {
    let stats = parse_stats_row("12|9|3\n").unwrap();
    assert_eq!((stats.total, stats.completed, stats.pending), (12, 9, 3));
    assert!(parse_stats_row("ERROR").is_none());
}
