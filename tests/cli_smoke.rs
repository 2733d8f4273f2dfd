use assert_cmd::prelude::*;
use rusqlite::Connection;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", "you@example.com"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "commit.gpgsign", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file_at(dir: &Path, name: &str, date: &str) {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(name.as_bytes()).unwrap();
    f.sync_all().unwrap();
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("add {name}")])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn svn_working_copy(dir: &Path, micros: &[i64]) {
    fs::create_dir_all(dir.join(".svn")).unwrap();
    let conn = Connection::open(dir.join(".svn/wc.db")).unwrap();
    conn.execute_batch("CREATE TABLE NODES (changed_date INTEGER);")
        .unwrap();
    for m in micros {
        conn.execute("INSERT INTO NODES (changed_date) VALUES (?1)", [m])
            .unwrap();
    }
}

fn revstats(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("revstats").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn heat_json_outputs_report() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_at(dir.path(), "a.txt", "2024-01-01T12:00:00Z");
    commit_file_at(dir.path(), "b.txt", "2024-01-02T12:00:00Z");

    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--utc", "heat", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["productivity"]["total"].as_u64(), Some(2));
    assert_eq!(v["history"]["days"]["2024-01-01"].as_u64(), Some(1));
    assert_eq!(v["streaks"]["longest"]["days"].as_u64(), Some(2));
    assert!(v["calendar"]["years"].get("2024").is_some());
}

#[test]
fn heat_details_and_missing_days() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_at(dir.path(), "a.txt", "2024-01-01T12:00:00Z");
    commit_file_at(dir.path(), "b.txt", "2024-01-03T12:00:00Z");

    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--utc", "heat", "--details", "--missing"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Sun"));
    assert!(text.contains("Jan"));
    assert!(text.contains("Most Productive Day: 1 commits"));
    assert!(text.contains("Total Commits: 2"));
    assert!(text.contains("Longest Streak: 1 days, 1 commits"));
    assert!(text.contains("Missing commit: 2024-01-02"));
    assert!(text.contains("Window: Mon Jan 01 2024 00:00:01 +0000 to Tue Dec 31 2024 23:59:59 +0000"));
}

#[test]
fn view_flags_work_without_subcommand() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_at(dir.path(), "a.txt", "2024-01-01T12:00:00Z");
    commit_file_at(dir.path(), "b.txt", "2024-01-03T12:00:00Z");

    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--utc", "--details", "--missing", "--unified"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total Commits: 2"));
    assert!(text.contains("Missing commit: 2024-01-02"));

    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--utc", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["productivity"]["total"].as_u64(), Some(2));
}

#[test]
fn year_without_commits_prints_notice() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_at(dir.path(), "a.txt", "2024-01-01T12:00:00Z");

    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--year", "1999"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().contains("No commits found"));
}

#[test]
fn export_ndjson_from_repository_list() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    svn_working_copy(&first, &[1704110400000000, 1704110400000000]);
    svn_working_copy(&second, &[1704196800000000]);

    let config = dir.path().join("revstats.json");
    let list = serde_json::json!({ "first": first, "second": second });
    fs::write(&config, list.to_string()).unwrap();

    let out = revstats(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--utc", "export", "--ndjson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["date"], "2024-01-01");
    assert_eq!(lines[0]["commits"], 2);
    assert_eq!(lines[1]["date"], "2024-01-02");
}

#[test]
fn missing_repository_list_fails() {
    let dir = tempdir().unwrap();
    revstats(dir.path())
        .arg("--config")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure();
}

#[test]
fn directory_without_backend_has_no_commits() {
    let dir = tempdir().unwrap();
    let out = revstats(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().contains("No commits found"));
}
