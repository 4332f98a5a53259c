use crate::common::command::{
    add_all_and_commit, init_repository_dir, run_lit_command, run_lit_stdout,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn list_branches_marks_the_current_one(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();
    run_lit_command(dir, &["branch", "create", "bugfix/login"])
        .assert()
        .success();

    let branches = run_lit_stdout(dir, &["branch", "list"]);
    assert_eq!(branches, "  bugfix/login\n  feature\n* main\n");

    // bare `branch` lists too
    assert_eq!(run_lit_stdout(dir, &["branch"]), branches);
}

#[rstest]
fn create_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();

    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[rstest]
#[case("")]
#[case(".hidden")]
#[case("name.lock")]
#[case("with space")]
fn create_branch_with_invalid_name_fails(init_repository_dir: TempDir, #[case] name: &str) {
    run_lit_command(init_repository_dir.path(), &["branch", "create", name])
        .assert()
        .failure();
}

#[rstest]
fn delete_current_branch_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["branch", "delete", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("currently checked out"));

    let branches = run_lit_stdout(init_repository_dir.path(), &["branch", "list"]);
    assert_eq!(branches, "* main\n");
}

#[rstest]
fn delete_nonexistent_branch_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["branch", "delete", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn delete_branch_prunes_its_private_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();
    run_lit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("1.txt"), "feature one".to_string()));
    let first = add_all_and_commit(dir, "Feature work");
    write_file(FileSpec::new(dir.join("1.txt"), "feature two".to_string()));
    let second = add_all_and_commit(dir, "More feature work");

    run_lit_command(dir, &["checkout", "main"])
        .assert()
        .success();

    let output = run_lit_stdout(dir, &["branch", "delete", "feature"]);
    assert_eq!(
        output,
        format!(
            "Deleted branch feature (was {second}).\n\
             Pruned commit {second} More feature work\n\
             Pruned commit {first} Feature work\n"
        )
    );

    let global_log = run_lit_stdout(dir, &["global-log"]);
    assert!(!global_log.contains("Feature work"));
    assert!(!global_log.contains("More feature work"));
    assert!(global_log.contains("First commit"));
    assert!(global_log.contains("initial commit"));
}

#[rstest]
fn delete_branch_without_private_commits_prunes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();

    let output = run_lit_stdout(dir, &["branch", "delete", "feature"]);

    assert!(output.starts_with("Deleted branch feature"));
    assert!(!output.contains("Pruned"));
    assert_eq!(run_lit_stdout(dir, &["global-log"]).matches("commit ").count(), 2);
}
