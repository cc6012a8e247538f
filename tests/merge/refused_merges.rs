use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn staged_changes_block_a_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stderr(predicate::str::diff("You have uncommitted changes.\n"));
}

#[rstest]
#[case("master", "Cannot merge a branch with itself.\n")]
#[case("nowhere", "No branch named 'nowhere' exists.\n")]
fn impossible_merges_are_refused(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_twig_command(init_repository_dir.path(), &["merge", branch])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::diff(message.to_string()));
}

#[rstest]
fn untracked_file_in_the_way_blocks_a_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    commit_files(dir, &[("m.txt", "m")], "Master side");
    run_twig_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("o.txt", "o")], "Other side");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    let head = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("o.txt"), "mine".to_string()));
    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stderr(predicate::str::diff(
            "There is an untracked file in the way; delete it, or add and commit it first: o.txt\n",
        ));

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(read_file(&dir.join("o.txt")), "mine");
}
