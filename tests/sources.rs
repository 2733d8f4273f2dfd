use pretty_assertions::assert_eq;
use revstats::config::{resolve_repositories, Config, Repository};
use revstats::heat::{fetch_all, fetch_repository};
use revstats::vcs::CommitSource;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    assert!(cmd.status().unwrap().success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"], None);
    git(dir, &["config", "user.email", "you@example.com"], None);
    git(dir, &["config", "user.name", "Your Name"], None);
    git(dir, &["config", "commit.gpgsign", "false"], None);
}

fn commit_at(dir: &Path, name: &str, date: &str) {
    fs::write(dir.join(name), name).unwrap();
    git(dir, &["add", "."], None);
    git(dir, &["commit", "-m", &format!("add {name}")], Some(date));
}

fn svn_working_copy(dir: &Path, changed_dates: &[Option<i64>]) {
    fs::create_dir_all(dir.join(".svn")).unwrap();
    let conn = Connection::open(dir.join(".svn/wc.db")).unwrap();
    conn.execute_batch("CREATE TABLE NODES (local_relpath TEXT, changed_date INTEGER);")
        .unwrap();
    for (i, date) in changed_dates.iter().enumerate() {
        conn.execute(
            "INSERT INTO NODES (local_relpath, changed_date) VALUES (?1, ?2)",
            rusqlite::params![format!("file{i}"), date],
        )
        .unwrap();
    }
}

#[test]
fn detects_backends_by_marker_file() {
    let dir = tempdir().unwrap();
    assert_eq!(CommitSource::detect(dir.path()), None);

    fs::create_dir_all(dir.path().join(".hg")).unwrap();
    fs::write(dir.path().join(".hg/hgrc"), "").unwrap();
    assert_eq!(CommitSource::detect(dir.path()), Some(CommitSource::Mercurial));

    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/config"), "").unwrap();
    assert_eq!(CommitSource::detect(dir.path()), Some(CommitSource::Git));
}

#[test]
fn unknown_directory_contributes_nothing() {
    revstats::logging::init_test();
    let dir = tempdir().unwrap();
    assert!(fetch_repository(dir.path()).is_empty());
    assert!(fetch_repository(&dir.path().join("does-not-exist")).is_empty());
}

#[test]
fn subversion_microseconds_become_seconds() {
    let dir = tempdir().unwrap();
    svn_working_copy(dir.path(), &[Some(1704067200123456), None, Some(1704153600000000)]);

    assert_eq!(CommitSource::detect(dir.path()), Some(CommitSource::Subversion));
    let mut timestamps = fetch_repository(dir.path());
    timestamps.sort_unstable();
    assert_eq!(timestamps, vec![1704067200, 1704153600]);
}

#[test]
fn broken_subversion_database_is_skipped() {
    revstats::logging::init_test();
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".svn")).unwrap();
    fs::write(dir.path().join(".svn/wc.db"), "not a database").unwrap();

    assert!(fetch_repository(dir.path()).is_empty());
}

#[test]
fn git_commit_times_are_read_from_head() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_at(dir.path(), "a.txt", "2024-01-01T12:00:00Z");
    commit_at(dir.path(), "b.txt", "2024-01-02T12:00:00Z");

    let mut timestamps = fetch_repository(dir.path());
    timestamps.sort_unstable();
    assert_eq!(timestamps, vec![1704110400, 1704196800]);
}

#[test]
fn git_uses_author_time_not_committer_time() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    git(dir.path(), &["add", "."], None);
    let status = Command::new("git")
        .args(["commit", "-m", "rebased"])
        .env("GIT_AUTHOR_DATE", "2024-01-01T12:00:00Z")
        .env("GIT_COMMITTER_DATE", "2024-03-01T12:00:00Z")
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(fetch_repository(dir.path()), vec![1704110400]);
}

#[cfg(unix)]
#[test]
fn mercurial_dates_come_from_hg_log() {
    use std::os::unix::fs::PermissionsExt;

    revstats::logging::init_test();
    let bin = tempdir().unwrap();
    let script = bin.path().join("hg");
    fs::write(
        &script,
        r#"#!/bin/sh
[ "$1" = log ] && [ "$2" = --template ] && [ "$3" = '{date}\n' ] && [ "$4" = -R ] || exit 2
if [ -e "$5/broken" ]; then
    echo "abort: repository corrupted" >&2
    exit 1
fi
printf '1704067200.5-3600\n1704153600.0+0000\n'
"#,
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut dirs = vec![bin.path().to_path_buf()];
    dirs.extend(std::env::split_paths(&path));
    std::env::set_var("PATH", std::env::join_paths(dirs).unwrap());

    let good = tempdir().unwrap();
    fs::create_dir_all(good.path().join(".hg")).unwrap();
    fs::write(good.path().join(".hg/hgrc"), "").unwrap();
    assert_eq!(fetch_repository(good.path()), vec![1704067200, 1704153600]);

    let broken = tempdir().unwrap();
    fs::create_dir_all(broken.path().join(".hg")).unwrap();
    fs::write(broken.path().join(".hg/hgrc"), "").unwrap();
    fs::write(broken.path().join("broken"), "").unwrap();
    assert!(fetch_repository(broken.path()).is_empty());
}

#[test]
fn git_repository_without_commits_is_skipped() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    assert!(fetch_repository(dir.path()).is_empty());
}

#[test]
fn fetch_all_concatenates_repositories() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let empty = tempdir().unwrap();
    svn_working_copy(first.path(), &[Some(1704067200000000)]);
    svn_working_copy(second.path(), &[Some(1704153600000000), Some(1704153600000000)]);

    let repos = vec![
        Repository::from_path(first.path()),
        Repository::from_path(empty.path()),
        Repository::from_path(second.path()),
    ];
    assert_eq!(fetch_all(&repos, false), vec![1704067200, 1704153600, 1704153600]);
}

#[test]
fn repository_list_is_read_from_json() {
    let config = Config::from_json(r#"{ "site": "/srv/www", "tool": "/opt/tool" }"#).unwrap();
    let repos = config.repositories();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "site");
    assert_eq!(repos[0].path, Path::new("/srv/www"));
    assert_eq!(repos[1].name, "tool");
}

#[test]
fn single_repository_overrides_the_list() {
    let repos = resolve_repositories(Some(Path::new("/tmp/project")), Some(Path::new("/nonexistent.json"))).unwrap();
    assert_eq!(repos, vec![Repository::from_path(Path::new("/tmp/project"))]);
    assert_eq!(repos[0].name, "project");
}

#[test]
fn missing_repository_list_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("revstats.json");
    assert!(resolve_repositories(None, Some(&missing)).is_err());

    fs::write(&missing, "[1, 2]").unwrap();
    assert!(resolve_repositories(None, Some(&missing)).is_err());

    fs::write(&missing, r#"{"here": "/srv/here"}"#).unwrap();
    let repos = resolve_repositories(None, Some(&missing)).unwrap();
    assert_eq!(repos[0].name, "here");
}
