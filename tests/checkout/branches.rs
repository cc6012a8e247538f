use crate::common::command::{
    branch_commit_id, commit_files, head_commit_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_the_head_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_twig_command(dir, &["branch", "side"])
        .assert()
        .success()
        .stdout("")
        .stderr("");
    commit_files(dir, &[("3.txt", "three")], "Master only");

    assert_eq!(branch_commit_id(dir, "side"), head);
    assert!(head_commit_id(dir) != head);
}

#[rstest]
fn existing_branch_name_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();

    run_twig_command(dir, &["branch", "side"])
        .assert()
        .success()
        .stderr(predicate::str::diff(
            "A branch with that name already exists.\n",
        ));
}

#[rstest]
fn removing_a_branch_keeps_its_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();
    run_twig_command(dir, &["checkout", "side"]).assert().success();
    commit_files(dir, &[("side.txt", "side")], "Side work");
    let side = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["rm-branch", "side"])
        .assert()
        .success()
        .stderr("");

    assert!(!dir.join(".twig").join("refs").join("heads").join("side").exists());
    run_twig_command(dir, &["find", "Side work"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{side}\n")));
}

#[rstest]
#[case("master", "Cannot remove the current branch.\n")]
#[case("nowhere", "No branch named 'nowhere' exists.\n")]
fn impossible_removals_are_refused(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", branch])
        .assert()
        .success()
        .stderr(predicate::str::diff(message.to_string()));
}
