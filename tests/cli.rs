use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("covid").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("countries"));
}

#[test]
fn history_rejects_unknown_category() {
    let mut cmd = Command::cargo_bin("covid").unwrap();
    cmd.args(["history", "--category", "hospitalised"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("hospitalised"));
}

#[test]
fn unreachable_api_fails_cleanly() {
    let mut cmd = Command::cargo_bin("covid").unwrap();
    // nothing listens on port 9 (discard) on test hosts; the request must error, not hang or panic
    cmd.args(["--base-url", "http://127.0.0.1:9", "summary"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fetch stats for worldwide"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn summary_online_worldwide() {
    let mut cmd = Command::cargo_bin("covid").unwrap();
    cmd.args(["summary", "--locale", "de"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Coronavirus Cases"));
}
