use crate::common::command::{init_repository_dir, run_twig_command, status_output};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::fs;

#[rstest]
fn clean_tree_has_empty_sections(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &[],
            &[],
            &[],
        )));
}

#[rstest]
fn branches_are_sorted_with_the_current_one_starred(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    for branch in ["zeta", "alpha", "feature/x"] {
        run_twig_command(dir, &["branch", branch]).assert().success();
    }
    run_twig_command(dir, &["checkout", "zeta"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["alpha", "feature/x", "master", "*zeta"],
            &[],
            &[],
            &[],
            &[],
        )));
}

#[rstest]
fn every_section_is_filled(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one, edited".to_string()));
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &["staged.txt"],
            &["a/2.txt"],
            &["1.txt (modified)"],
            &["new.txt"],
        )));
}

#[rstest]
fn deleted_and_restaged_files_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    fs::remove_file(dir.join("1.txt")).unwrap();
    write_file(FileSpec::new(dir.join("3.txt"), "three".to_string()));
    run_twig_command(dir, &["add", "3.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("3.txt"), "three, edited".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &["3.txt"],
            &[],
            &["1.txt (deleted)", "3.txt (modified)"],
            &[],
        )));
}

#[rstest]
fn a_removed_file_created_again_is_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "different".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &["1.txt"],
            &[],
            &["1.txt"],
        )));
}
