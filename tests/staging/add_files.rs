use crate::common::command::{init_repository_dir, run_twig_command, status_output, twig_commit};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn staged_files_are_listed_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let mut files = write_generated_files(dir, 4);
    files.sort_by(|left, right| left.path.cmp(&right.path));

    let names = files
        .iter()
        .map(|file| file.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    for name in &names {
        run_twig_command(dir, &["add", name]).assert().success();
    }

    let staged = names.iter().map(String::as_str).collect::<Vec<_>>();
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &staged,
            &[],
            &[],
            &[],
        )));
}

#[rstest]
fn readding_unmodified_content_clears_staging(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    run_twig_command(dir, &["status"])
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
fn nested_files_are_staged_by_relative_name(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(
        dir.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_twig_command(dir, &["add", "a/b/3.txt"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\na/b/3.txt\n"));
}

#[rstest]
#[case("missing.txt")]
#[case("../outside.txt")]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["add", name])
        .assert()
        .success()
        .stderr(predicate::str::diff(format!("File does not exist: {name}\n")));
}

#[rstest]
fn names_with_line_breaks_are_never_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a\nb"), "split".to_string()));

    run_twig_command(dir, &["add", "a\nb"])
        .assert()
        .success()
        .stderr(predicate::str::diff("File does not exist: a\nb\n"));
    twig_commit(dir, "line break")
        .assert()
        .success()
        .stderr(predicate::str::diff("No changes added to the commit.\n"));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &[],
            &[],
            &[],
        )));
    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial files"));
}
