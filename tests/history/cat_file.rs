use crate::common::command::{head_commit_id, init_repository_dir, root_commit_id, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn cat_file(dir: &std::path::Path, object_id: &str) -> String {
    let output = run_twig_command(dir, &["cat-file", object_id])
        .output()
        .unwrap();
    String::from_utf8(output.stdout).unwrap()
}

#[rstest]
fn commit_body_lists_parent_timestamp_and_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);
    let root = root_commit_id(dir);

    let body = cat_file(dir, &head);
    let pattern = format!(
        "^parent {root}\ntimestamp 1672574400 \\+0000\nfile [0-9a-f]{{40}} 1\\.txt\nfile [0-9a-f]{{40}} a/2\\.txt\n\nInitial files$"
    );
    assert!(
        predicates::str::is_match(pattern).unwrap().eval(&body),
        "unexpected commit body:\n{body}"
    );

    let blob_id = body
        .lines()
        .find_map(|line| line.strip_suffix(" a/2.txt"))
        .and_then(|line| line.strip_prefix("file "))
        .unwrap();
    assert_eq!(cat_file(dir, blob_id), "two");
}

#[rstest]
fn root_commit_has_no_parent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = root_commit_id(dir);

    assert_eq!(
        cat_file(dir, &root[..6]),
        "timestamp 0 +0000\n\ninitial commit"
    );
}

#[rstest]
fn unknown_ids_are_reported(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["cat-file", "0000000"])
        .assert()
        .success()
        .stderr(predicate::str::diff("No commit named '0000000' exists.\n"));
}
