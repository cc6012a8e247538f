use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn find_prints_every_commit_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("3.txt", "three")], "Same message");
    let first = head_commit_id(dir);
    commit_files(dir, &[("4.txt", "four")], "Same message");
    let second = head_commit_id(dir);

    let mut expected = [first, second];
    expected.sort();

    run_twig_command(dir, &["find", "Same message"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n{}\n",
            expected[0], expected[1]
        )));
}

#[rstest]
#[case("initial")]
#[case("Initial files ")]
#[case("never used")]
fn find_needs_the_exact_message(init_repository_dir: TempDir, #[case] message: &str) {
    run_twig_command(init_repository_dir.path(), &["find", message])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::diff("Found no commit with that message.\n"));
}
