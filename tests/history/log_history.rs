use crate::common::command::{
    READABLE_COMMIT_DATE, commit_files, head_commit_id, init_repository_dir, root_commit_id,
    run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

const ROOT_COMMIT_DATE: &str = "Thu Jan 1 00:00:00 1970 +0000";

fn log_entry(commit_id: &str, date: &str, message: &str) -> String {
    format!("===\ncommit {commit_id}\nDate: {date}\n{message}\n\n")
}

#[rstest]
fn log_walks_back_to_the_root_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let initial_files = head_commit_id(dir);
    commit_files(dir, &[("3.txt", "three")], "Third file");
    let third_file = head_commit_id(dir);
    let root = root_commit_id(dir);

    let expected = [
        log_entry(&third_file, READABLE_COMMIT_DATE, "Third file"),
        log_entry(&initial_files, READABLE_COMMIT_DATE, "Initial files"),
        log_entry(&root, ROOT_COMMIT_DATE, "initial commit"),
    ]
    .concat();

    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[rstest]
fn log_only_follows_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();
    run_twig_command(dir, &["checkout", "side"]).assert().success();
    commit_files(dir, &[("side.txt", "side")], "Side work");

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Side work").not());
    run_twig_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Side work"));
}

#[rstest]
fn global_log_lists_every_commit_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("3.txt", "three")], "Third file");
    run_twig_command(dir, &["reset", &root_commit_id(dir)])
        .assert()
        .success();

    let output = run_twig_command(dir, &["global-log"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(stdout.matches("===\n").count(), 3);
    for message in ["initial commit", "Initial files", "Third file"] {
        assert!(stdout.contains(&format!("{message}\n\n")), "{message} missing");
    }
}
