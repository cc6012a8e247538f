use crate::common::command::{
    branch_commit_id, commit_files, head_commit_id, init_repository_dir, root_commit_id,
    run_twig_command, status_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_swaps_the_tracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();

    run_twig_command(dir, &["checkout", "side"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Switched to branch 'side'\n"));
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();
    commit_files(dir, &[("1.txt", "side one"), ("side.txt", "side")], "Side work");

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");
    assert!(!dir.join("side.txt").exists());

    run_twig_command(dir, &["checkout", "side"]).assert().success();
    assert_eq!(read_file(&dir.join("1.txt")), "side one");
    assert_eq!(read_file(&dir.join("side.txt")), "side");
    assert!(!dir.join("a").exists());
}

#[rstest]
fn switching_branches_clears_staging(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();

    run_twig_command(dir, &["checkout", "side"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["master", "*side"],
            &[],
            &[],
            &[],
            &["staged.txt"],
        )));
}

#[rstest]
#[case("master", "No need to checkout the current branch.\n")]
#[case("nowhere", "No branch named 'nowhere' exists.\n")]
fn impossible_switches_are_refused(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_twig_command(init_repository_dir.path(), &["checkout", branch])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::diff(message.to_string()));
}

#[rstest]
fn untracked_file_in_the_way_blocks_the_switch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "side"]).assert().success();
    run_twig_command(dir, &["checkout", "side"]).assert().success();
    commit_files(dir, &[("side.txt", "side")], "Side work");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    write_file(FileSpec::new(dir.join("side.txt"), "mine".to_string()));
    run_twig_command(dir, &["checkout", "side"])
        .assert()
        .success()
        .stderr(predicate::str::diff(
            "There is an untracked file in the way; delete it, or add and commit it first: side.txt\n",
        ));

    assert_eq!(read_file(&dir.join("side.txt")), "mine");
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD")).unwrap().trim(),
        "ref: refs/heads/master"
    );
}

#[rstest]
fn reset_moves_the_branch_and_the_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_files(dir, &[("1.txt", "uno"), ("3.txt", "three")], "More files");
    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();

    run_twig_command(dir, &["reset", &first[..10]])
        .assert()
        .success()
        .stderr("");

    assert_eq!(branch_commit_id(dir, "master"), first);
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("3.txt").exists());
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &[],
            &[],
            &["staged.txt"],
        )));
}

#[rstest]
fn reset_to_the_root_empties_the_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = root_commit_id(dir);

    run_twig_command(dir, &["reset", &root]).assert().success();

    assert!(!dir.join("1.txt").exists());
    assert!(!dir.join("a").exists());
    assert_eq!(head_commit_id(dir), root);
}
