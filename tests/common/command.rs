use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose `main` branch holds the initial commit plus one commit
/// of `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_lit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_lit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    lit_commit(repository_dir.path(), "First commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_lit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lit").expect("Failed to find lit binary");
    cmd.envs(vec![
        ("NO_PAGER", "1"),
        ("LIT_AUTHOR_NAME", "fake_user"),
        ("LIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("LIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn lit_commit(dir: &Path, message: &str) -> Command {
    run_lit_command(dir, &["commit", "-m", message])
}

/// Stage everything in the work tree and commit it, returning the short id
pub fn add_all_and_commit(dir: &Path, message: &str) -> String {
    run_lit_command(dir, &["add", "."]).assert().success();

    let output = lit_commit(dir, message).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())
        .expect("commit output is not UTF-8");

    short_id_from_commit_output(&stdout)
}

/// Extract `abc1234` from `[main abc1234] message`
pub fn short_id_from_commit_output(stdout: &str) -> String {
    let header = stdout
        .split(']')
        .next()
        .expect("commit output has no header");

    header
        .split_whitespace()
        .last()
        .expect("commit output has no id")
        .to_string()
}

pub fn run_lit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_lit_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("output is not UTF-8")
}
