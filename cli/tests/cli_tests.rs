//! Integration tests for CLI features:
//! - Shell completions (bash, zsh, fish, powershell)
//! - Command aliases (short forms for common commands)
//! - Version and help output
//! - Argument validation for wire codes

use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{empty_home, setup_test_config, test_command};

#[test]
fn test_completions_bash() {
    test_command(&empty_home())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_anypay"))
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_completions_zsh() {
    test_command(&empty_home())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef anypay"));
}

#[test]
fn test_completions_fish() {
    test_command(&empty_home())
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c anypay"));
}

#[test]
fn test_completions_powershell() {
    test_command(&empty_home())
        .args(["completions", "power-shell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Register-ArgumentCompleter"));
}

#[test]
fn test_completions_alias() {
    test_command(&empty_home())
        .args(["com", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_anypay"));
}

#[test]
fn test_version() {
    test_command(&empty_home())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("anypay CLI: v"))
        .stdout(predicate::str::contains("anypay-lib: v"));
}

#[test]
fn test_version_alias() {
    test_command(&empty_home())
        .arg("v")
        .assert()
        .success()
        .stdout(predicate::str::contains("anypay CLI"));
}

#[test]
fn test_help_lists_commands() {
    test_command(&empty_home())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("balance"))
        .stdout(predicate::str::contains("payments"))
        .stdout(predicate::str::contains("payout"))
        .stdout(predicate::str::contains("link"))
        .stdout(predicate::str::contains("Account Options"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    test_command(&empty_home()).assert().failure().code(2);
}

#[test]
fn test_unknown_payout_method_is_rejected() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["payout", "5", "paypal", "10", "wallet"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("qiwi, ym, wm, mc, card"));
}

#[test]
fn test_unknown_link_language_is_rejected() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["link", "7", "100", "--lang", "de"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("ru, en"));
}
