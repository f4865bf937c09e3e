use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use travelkit::config::GitConfig;
use travelkit::core::git::{CheckIn, CommitFilter, GitRepo, parse_porcelain};

#[test]
fn test_parse_porcelain() {
    let out = " M index.html\0?? data/silver_prices.csv\0R  cities/new.html\0old.html\0?? with space.txt\0?? 北京.html\0";
    let entries = parse_porcelain(out);
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "index.html",
            "data/silver_prices.csv",
            "cities/new.html",
            "with space.txt",
            "北京.html"
        ]
    );
    assert_eq!(entries[0].code, " M");
    assert_eq!(entries[1].code, "??");
    assert_eq!(entries[2].code, "R ");
}

#[test]
fn test_commit_filter_skips_automation_files() {
    let filter = CommitFilter::from_config(&GitConfig::default());
    assert!(filter.is_skipped("logs/checker.log"));
    assert!(filter.is_skipped("checker_status.json"));
    assert!(filter.is_skipped("weekly_report.json"));
    assert!(filter.is_skipped("SEND_TO_TELEGRAM.txt"));
    assert!(filter.is_skipped("notes/TELEGRAM_NOW.md"));
    assert!(!filter.is_skipped("index.html"));
    assert!(!filter.is_skipped("data/status.csv"));
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_check_in_without_relevant_changes() {
    if !git_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = GitRepo::new(dir.path());
    assert!(!repo.is_repo());

    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    assert!(repo.is_repo());

    let cfg = GitConfig::default();
    assert_eq!(repo.check_in(&cfg).unwrap(), CheckIn::NoChanges);

    fs::write(dir.path().join("checker.log"), "run\n").unwrap();
    fs::write(dir.path().join("last_status.json"), "{}").unwrap();
    assert_eq!(repo.check_in(&cfg).unwrap(), CheckIn::OnlySkipped(2));
}

fn git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Working repo on `main` with a bare `origin` next to it.
fn repo_with_origin(root: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let origin = root.join("origin.git");
    let site = root.join("site");
    fs::create_dir_all(&site).unwrap();

    git(root, &["init", "-q", "--bare", origin.to_str().unwrap()]);
    git(&site, &["init", "-q"]);
    git(&site, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&site, &["config", "user.email", "bot@example.com"]);
    git(&site, &["config", "user.name", "Site Bot"]);
    git(&site, &["config", "commit.gpgsign", "false"]);
    git(&site, &["config", "push.default", "current"]);
    git(&site, &["remote", "add", "origin", origin.to_str().unwrap()]);

    (site, origin)
}

#[test]
fn test_check_in_commits_and_pushes() {
    if !git_available() {
        return;
    }
    let root = tempdir().unwrap();
    let (site, origin) = repo_with_origin(root.path());

    fs::write(site.join("index.html"), "<html></html>\n").unwrap();
    fs::write(site.join("北京.html"), "<p>Beijing</p>\n").unwrap();
    fs::write(site.join("checker.log"), "run\n").unwrap();

    let repo = GitRepo::new(&site);
    let CheckIn::Pushed { files, message } = repo.check_in(&GitConfig::default()).unwrap() else {
        panic!("expected a pushed check-in");
    };

    assert_eq!(files.len(), 2);
    assert!(files.contains(&"index.html".to_string()));
    assert!(files.contains(&"北京.html".to_string()));
    assert!(message.starts_with("Auto-commit: "));
    assert!(message.ends_with(" - Completed development tasks"));

    assert_eq!(git(&site, &["log", "-1", "--format=%s"]), message);
    assert_eq!(
        git(&site, &["status", "--porcelain"]),
        "?? checker.log"
    );

    let pushed = git(
        root.path(),
        &[
            "--git-dir",
            origin.to_str().unwrap(),
            "log",
            "-1",
            "--format=%s",
            "main",
        ],
    );
    assert_eq!(pushed, message);
}

#[test]
fn test_commit_file_pushes_single_file() {
    if !git_available() {
        return;
    }
    let root = tempdir().unwrap();
    let (site, origin) = repo_with_origin(root.path());

    let data = site.join("data");
    fs::create_dir_all(&data).unwrap();
    let csv = data.join("silver_prices.csv");
    fs::write(&csv, "timestamp,date,price_usd,source,url\n").unwrap();
    fs::write(site.join("notes.txt"), "not part of the commit\n").unwrap();

    let repo = GitRepo::new(&site);
    let message = repo.commit_file(&csv, "Update silver price").unwrap();

    assert!(message.starts_with("Update silver price - "));
    assert_eq!(git(&site, &["log", "-1", "--format=%s"]), message);
    assert_eq!(
        git(&site, &["show", "--name-only", "--format=", "HEAD"]),
        "data/silver_prices.csv"
    );
    assert_eq!(git(&site, &["status", "--porcelain"]), "?? notes.txt");

    let pushed = git(
        root.path(),
        &[
            "--git-dir",
            origin.to_str().unwrap(),
            "log",
            "-1",
            "--format=%s",
            "main",
        ],
    );
    assert_eq!(pushed, message);
}
