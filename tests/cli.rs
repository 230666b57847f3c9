mod common;

use predicates::str::contains;

#[test]
fn version_flag_prints_and_exits_zero() {
    common::triviad_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("triviad"));
}

#[test]
fn help_flag_mentions_config_option() {
    common::triviad_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--config"));
}
