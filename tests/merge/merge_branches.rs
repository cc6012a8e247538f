use crate::common::command::{
    branch_commit_id, commit_files, head_commit_id, init_repository_dir, run_twig_command,
    status_output,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "old"]).assert().success();
    commit_files(dir, &[("3.txt", "three")], "Ahead of old");
    let head = head_commit_id(dir);

    run_twig_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Given branch is an ancestor of the current branch.\n",
        ));

    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn merging_a_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "ahead"]).assert().success();
    run_twig_command(dir, &["checkout", "ahead"]).assert().success();
    commit_files(dir, &[("3.txt", "three")], "Ahead of master");
    let ahead = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "ahead"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Current branch fast-forwarded.\n"));

    assert_eq!(branch_commit_id(dir, "master"), ahead);
    assert_eq!(read_file(&dir.join("3.txt")), "three");
}

#[rstest]
fn diverged_branches_get_a_merge_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();

    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();
    commit_files(dir, &[("master.txt", "m")], "Master work");
    let master = head_commit_id(dir);

    run_twig_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("1.txt", "uno"), ("other.txt", "o")], "Other work");
    let other = head_commit_id(dir);

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("")
        .stderr("");

    assert_eq!(read_file(&dir.join("1.txt")), "uno");
    assert_eq!(read_file(&dir.join("other.txt")), "o");
    assert_eq!(read_file(&dir.join("master.txt")), "m");
    assert!(!dir.join("a").exists());

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master", "other"],
            &[],
            &[],
            &[],
            &[],
        )));

    let log = String::from_utf8(run_twig_command(dir, &["log"]).output().unwrap().stdout).unwrap();
    let merge_entry = log.split("===\n").nth(1).unwrap();
    let expected_start = format!(
        "commit {}\nMerge: {} {}\n",
        head_commit_id(dir),
        &master[..7],
        &other[..7]
    );
    assert!(merge_entry.starts_with(&expected_start), "{merge_entry}");
    assert!(merge_entry.ends_with("Merged other into master.\n\n"));
}

#[rstest]
fn merge_commit_records_both_parents(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    commit_files(dir, &[("master.txt", "m")], "Master work");
    let master = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("other.txt", "o")], "Other work");
    let other = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "other"]).assert().success();

    let body = String::from_utf8(
        run_twig_command(dir, &["cat-file", &head_commit_id(dir)])
            .output()
            .unwrap()
            .stdout,
    )
    .unwrap();
    assert!(body.starts_with(&format!("parent {master}\nmerge {other}\n")));

    // merging again finds other already in the history
    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Given branch is an ancestor of the current branch.\n",
        ));
}
