#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn binder_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("binder"));
    cmd.env("BINDER_DATA_DIR", data.path().as_os_str())
        .env_remove("RUST_LOG")
        .env_remove("BINDER_DEFAULT_ROWS")
        .env_remove("BINDER_DEFAULT_COLUMNS")
        .env_remove("BINDER_DEFAULT_PAGES");
    cmd
}

fn create_main(data: &TempDir) {
    binder_cmd(data)
        .args(["create", "Main", "--rows", "3", "--columns", "3", "--pages", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Binder created: Main"));
}

#[test]
fn test_naked_invocation_lists_binders() {
    let data = TempDir::new().unwrap();
    binder_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No binders yet"));

    create_main(&data);
    binder_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Main"))
        .stdout(predicate::str::contains("0/27 cards"));
}

#[test]
fn test_place_and_move_page_workflow() {
    let data = TempDir::new().unwrap();
    create_main(&data);

    binder_cmd(&data)
        .args(["place", "Main", "--at", "1:1", "Pikachu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed Pikachu at 1:1"));
    binder_cmd(&data)
        .args(["place", "Main", "--at", "2:1", "Mew"])
        .assert()
        .success();

    binder_cmd(&data)
        .args(["move-page", "Main", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved page 1 to position 2"))
        .stdout(predicate::str::contains("1:1 -> 2:1"))
        .stdout(predicate::str::contains("2:1 -> 1:1"));

    binder_cmd(&data)
        .args(["view", "1", "--page", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mew"))
        .stdout(predicate::str::contains("Pikachu").not());
}

#[test]
fn test_multi_page_move_is_rejected() {
    let data = TempDir::new().unwrap();
    create_main(&data);

    binder_cmd(&data)
        .args(["move-page", "Main", "1-2", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Multi-page moves are not supported"));
}

#[test]
fn test_page_out_of_range_fails() {
    let data = TempDir::new().unwrap();
    create_main(&data);

    binder_cmd(&data)
        .args(["move-page", "Main", "1", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page 4 does not exist"));
}

#[test]
fn test_insert_slot_reports_dropped_card() {
    let data = TempDir::new().unwrap();
    binder_cmd(&data)
        .args(["create", "Tiny", "-r", "1", "-c", "2", "-p", "1"])
        .assert()
        .success();
    binder_cmd(&data)
        .args(["place", "Tiny", "Bulbasaur"])
        .assert()
        .success();
    binder_cmd(&data)
        .args(["place", "Tiny", "Squirtle"])
        .assert()
        .success();

    binder_cmd(&data)
        .args(["insert-slot", "Tiny", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer fit"))
        .stdout(predicate::str::contains("Squirtle"));

    binder_cmd(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 cards"));
}

#[test]
fn test_config_file_sets_defaults() {
    let data = TempDir::new().unwrap();
    std::fs::write(
        data.path().join("binder.toml"),
        "default_rows = 2\ndefault_columns = 4\ndefault_pages = 5\n",
    )
    .unwrap();

    binder_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_columns = 4"));

    binder_cmd(&data)
        .args(["create", "Trades"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2x4, 5 page(s), 40 slots"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let data = TempDir::new().unwrap();
    create_main(&data);

    binder_cmd(&data)
        .args(["-v", "place", "Main", "Eevee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("persisted").not())
        .stderr(predicate::str::contains("initialized binder context"));
}

#[test]
fn test_delete_binder() {
    let data = TempDir::new().unwrap();
    create_main(&data);

    binder_cmd(&data)
        .args(["delete", "Main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Binder deleted: Main"));
    binder_cmd(&data)
        .args(["view", "Main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No binder named"));
}
