use crate::common::command::{
    add_all_and_commit, init_repository_dir, run_lit_command, run_lit_stdout,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn commit_ids(log: &str) -> Vec<String> {
    log.lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[rstest]
fn log_shows_history_in_medium_format(init_repository_dir: TempDir) {
    let log = run_lit_stdout(init_repository_dir.path(), &["log"]);
    let ids = commit_ids(&log);

    assert_eq!(ids.len(), 2);
    assert_eq!(
        log,
        format!(
            "commit {} (HEAD -> main)\n\
             Author: fake_user <fake_email@email.com>\n\
             Date:   Sun Jan 1 12:00:00 2023 +0000\n\
             \n    First commit\n\
             \n\
             commit {}\n\
             Author: fake_user <fake_email@email.com>\n\
             Date:   Sun Jan 1 12:00:00 2023 +0000\n\
             \n    initial commit\n",
            ids[0], ids[1]
        )
    );
}

#[rstest]
fn log_decorates_every_branch_at_a_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();

    let log = run_lit_stdout(dir, &["log"]);

    assert!(log.lines().next().unwrap().ends_with("(feature, HEAD -> main)"));
}

#[rstest]
fn log_follows_only_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_lit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();
    run_lit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("feature.txt"), "feature".to_string()));
    add_all_and_commit(dir, "Feature commit");
    run_lit_command(dir, &["checkout", "main"])
        .assert()
        .success();

    let log = run_lit_stdout(dir, &["log"]);
    let global_log = run_lit_stdout(dir, &["global-log"]);

    assert!(!log.contains("Feature commit"));
    assert_eq!(commit_ids(&log).len(), 2);
    assert!(global_log.contains("Feature commit"));
    assert_eq!(commit_ids(&global_log).len(), 3);
}

#[rstest]
fn global_log_lists_commits_oldest_first(init_repository_dir: TempDir) {
    let global_log = run_lit_stdout(init_repository_dir.path(), &["global-log"]);

    let messages = global_log
        .lines()
        .filter_map(|line| line.strip_prefix("    "))
        .collect::<Vec<_>>();
    assert_eq!(messages, vec!["initial commit", "First commit"]);
}

#[rstest]
fn find_prints_every_matching_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_lit_command(dir, &["branch", "create", "twin"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("1.txt"), "main side".to_string()));
    add_all_and_commit(dir, "Same message");
    run_lit_command(dir, &["checkout", "twin"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("1.txt"), "twin side".to_string()));
    add_all_and_commit(dir, "Same message");

    let found = run_lit_stdout(dir, &["find", "Same message"]);
    let ids = found.lines().collect::<Vec<_>>();

    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.len() == 40));
    assert_ne!(ids[0], ids[1]);
}

#[rstest]
fn find_without_match_prints_nothing(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["find", "First"])
        .assert()
        .success()
        .stdout("");
}
