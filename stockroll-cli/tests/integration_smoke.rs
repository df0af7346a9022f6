//! Smoke tests for the stockroll binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stockroll(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockroll").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("STOCKROLL_DATABASE")
        .env_remove("STOCKROLL_BIND")
        .env_remove("STOCKROLL_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    stockroll(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_add_help() {
    let dir = tempfile::tempdir().unwrap();
    stockroll(&dir)
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reorder threshold"));
}

#[test]
fn test_init_db_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("data").join("items.db");

    stockroll(&dir)
        .arg("init-db")
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema ready"));

    assert!(db.exists());
}

#[test]
fn test_add_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("items.db");

    stockroll(&dir)
        .args(["add", "--name", "Coffee Beans", "--unit", "kg", "--min-stock", "5"])
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered #1 Coffee Beans (kg)"));

    stockroll(&dir)
        .args(["list", "--json"])
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"item_name\": \"Coffee Beans\""))
        .stdout(predicate::str::contains("\"min_stock\": 5"));
}

#[test]
fn test_rejected_add_fails_and_stores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("items.db");

    stockroll(&dir)
        .args(["add", "--name", "Tea", "--unit", "g", "--min-stock", "plenty"])
        .arg("--database")
        .arg(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains("item registration failed"));

    stockroll(&dir)
        .arg("list")
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No items registered."));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    stockroll(&dir)
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
