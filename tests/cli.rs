//! Drives the `vaultline` binary end to end

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vaultline(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vaultline").unwrap();
    cmd.env("VAULTLINE_DATA_DIR", data_dir.path())
        .env("VAULTLINE_PASSPHRASE", "integration-pass")
        .env_remove("VAULTLINE_SECRET");
    cmd
}

fn add(data_dir: &TempDir, title: &str, secret: &str) {
    vaultline(data_dir)
        .args(["add", "personal", "--title", title, "--username", "me"])
        .env("VAULTLINE_SECRET", secret)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));
}

#[test]
fn add_list_show() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "GitHub", "hunter2");
    add(&data_dir, "Mail", "swordfish");

    assert!(data_dir.path().join("vaults").join("personal.dat").exists());

    vaultline(&data_dir)
        .args(["list", "personal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Mail"))
        .stdout(predicate::str::contains("hunter2").not());

    vaultline(&data_dir)
        .args(["show", "personal", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret:   swordfish"));
}

#[test]
fn wrong_passphrase_is_reported() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "GitHub", "hunter2");

    vaultline(&data_dir)
        .args(["list", "personal"])
        .env("VAULTLINE_PASSPHRASE", "not-the-passphrase")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong passphrase"));
}

#[test]
fn check_reports_chunk_count() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "GitHub", "hunter2");

    vaultline(&data_dir)
        .args(["check", "personal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chunks:    1"))
        .stdout(predicate::str::contains("Integrity: OK"));
}

#[test]
fn remove_last_entry_deletes_file() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "GitHub", "hunter2");

    vaultline(&data_dir)
        .args(["remove", "personal", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: GitHub (me)"));

    assert!(!data_dir.path().join("vaults").join("personal.dat").exists());
}

#[test]
fn missing_vault_fails() {
    let data_dir = TempDir::new().unwrap();

    vaultline(&data_dir)
        .args(["list", "nowhere"])
        .assert()
        .failure();
}

#[test]
fn config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    vaultline(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault directory"))
        .stdout(predicate::str::contains("pbkdf2-sha256-aes256gcm"));
}
