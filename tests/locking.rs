use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;

mod common;

#[test]
fn add_refuses_to_run_while_the_index_lock_is_held() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::kit_cmd(dir.path()).arg("init").assert().success();

    dir.child("foo.txt").write_str("content")?;
    // simulate a stuck or in-flight writer
    dir.child(".git/index.lock").write_str("")?;

    common::kit_cmd(dir.path())
        .arg("add")
        .arg("foo.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to acquire lock"));

    // the committed index state is untouched
    assert!(!dir.path().join(".git/index").exists());

    Ok(())
}

#[test]
fn commit_refuses_to_run_while_the_head_lock_is_held() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::kit_cmd(dir.path()).arg("init").assert().success();

    dir.child("foo.txt").write_str("content")?;
    dir.child(".git/HEAD.lock").write_str("")?;

    common::kit_cmd(dir.path())
        .env("GIT_AUTHOR_NAME", "Alex_Doe")
        .env("GIT_AUTHOR_EMAIL", "alex@example.com")
        .arg("commit")
        .arg("-m")
        .arg("blocked")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to acquire lock"));

    assert!(!dir.path().join(".git/HEAD").exists());

    Ok(())
}

#[test]
fn a_cleared_lock_lets_the_next_writer_through() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::kit_cmd(dir.path()).arg("init").assert().success();

    dir.child("foo.txt").write_str("content")?;
    dir.child(".git/index.lock").write_str("")?;

    common::kit_cmd(dir.path())
        .arg("add")
        .arg("foo.txt")
        .assert()
        .failure();

    // operator clears the stuck lock manually
    std::fs::remove_file(dir.path().join(".git/index.lock"))?;

    common::kit_cmd(dir.path())
        .arg("add")
        .arg("foo.txt")
        .assert()
        .success();

    assert!(dir.path().join(".git/index").exists());

    Ok(())
}
