use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose `master` holds one commit ("Initial files") with
/// `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_files(
        repository_dir.path(),
        &[("1.txt", "one"), ("a/2.txt", "two")],
        "Initial files",
    );

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.env("NO_PAGER", "1")
        .env_remove("TWIG_LOG")
        .env_remove("TWIG_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", message]);
    cmd.env("TWIG_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Write, stage and commit `files`, asserting every step succeeds quietly
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
        run_twig_command(dir, &["add", name])
            .assert()
            .success()
            .stderr("");
    }

    twig_commit(dir, message).assert().success().stderr("");
}

pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".twig").join("HEAD"))
        .expect("Failed to read HEAD");
    let branch = head
        .trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not a branch reference");

    branch_commit_id(dir, branch)
}

pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let path = branch
        .split('/')
        .fold(dir.join(".twig").join("refs").join("heads"), |path, part| {
            path.join(part)
        });

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read branch {branch}: {e}"))
        .trim()
        .to_string()
}

/// Id of the commit every repository starts from
pub fn root_commit_id(dir: &Path) -> String {
    let output = run_twig_command(dir, &["find", "initial commit"])
        .output()
        .expect("Failed to run find");

    String::from_utf8(output.stdout)
        .expect("find printed invalid UTF-8")
        .trim()
        .to_string()
}

/// The `status` sections, blank-line separated, in print order
pub fn status_output(
    branches: &[&str],
    staged: &[&str],
    removed: &[&str],
    modified: &[&str],
    untracked: &[&str],
) -> String {
    let section = |title: &str, entries: &[&str]| {
        let mut text = format!("=== {title} ===\n");
        for entry in entries {
            text.push_str(entry);
            text.push('\n');
        }
        text.push('\n');
        text
    };

    [
        section("Branches", branches),
        section("Staged Files", staged),
        section("Removed Files", removed),
        section("Modifications Not Staged For Commit", modified),
        section("Untracked Files", untracked),
    ]
    .concat()
}
