//! Integration tests for commands that talk to the API
//!
//! None of these reach a real server: they either fail before any request is
//! sent, build a link locally, or point at an address that refuses connections.

use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{
    empty_home, setup_test_config, test_command, TestConfigBuilder, UNREACHABLE_API_URL,
};

const GOLDEN_LINK: &str = "https://anypay.io/merchant?merchant_id=42&pay_id=7&amount=100.0&currency=rub&sign=134d4eb33657abc43c995211392e7a52";

#[test]
fn test_link_text_output() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["link", "7", "100", "--output-format", "text"])
        .assert()
        .success()
        .stdout(format!("{GOLDEN_LINK}\n"));
}

#[test]
fn test_link_json_output() {
    let temp = setup_test_config();

    let output = test_command(&temp)
        .args(["link", "7", "100", "--output-format", "json"])
        .output()
        .expect("Failed to run anypay");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("link should print JSON");
    assert_eq!(value["url"], GOLDEN_LINK);
}

#[test]
fn test_link_text_output_to_file() {
    let temp = setup_test_config();
    let output_file = temp.path().join("link.txt");

    test_command(&temp)
        .args(["link", "7", "100", "--output-format", "text", "-o"])
        .arg(&output_file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output_file).expect("link should be written");
    assert_eq!(written, GOLDEN_LINK);
}

#[test]
fn test_link_with_language_and_extras() {
    let temp = setup_test_config();

    test_command(&temp)
        .args([
            "link",
            "7",
            "100",
            "--lang",
            "en",
            "--extra",
            "success_url=https://shop.example/ok",
            "--output-format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("sign=134d4eb33657abc43c995211392e7a52"))
        .stdout(predicate::str::contains("lang=en"))
        .stdout(predicate::str::contains("success_url=https%3A%2F%2Fshop.example%2Fok"));
}

#[test]
fn test_link_from_env_options() {
    let temp = TestConfigBuilder::new().build();

    test_command(&temp)
        .env("ANYPAY_PROJECT_ID", "42")
        .env("ANYPAY_SECRET", "s3cr3t")
        .args(["link", "7", "100", "--output-format", "text"])
        .assert()
        .success()
        .stdout(format!("{GOLDEN_LINK}\n"));
}

#[test]
fn test_link_without_secret_is_config_error() {
    let temp = TestConfigBuilder::new().with("project_id", "42").build();

    test_command(&temp)
        .args(["link", "7", "100"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("secret"));
}

#[test]
fn test_commissions_without_project_is_config_error() {
    let temp = TestConfigBuilder::new().unreachable().build();

    test_command(&temp)
        .arg("commissions")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("project_id"));
}

#[test]
fn test_payments_without_project_is_config_error() {
    let temp = TestConfigBuilder::new().unreachable().build();

    test_command(&temp)
        .arg("payments")
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_no_credentials_is_config_error() {
    let temp = empty_home();

    test_command(&temp)
        .arg("balance")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("anypay config init"));
}

#[test]
fn test_balance_connection_refused_is_network_error() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["--api-url", UNREACHABLE_API_URL, "balance"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_env_credentials_without_config_file() {
    let temp = empty_home();

    test_command(&temp)
        .env("ANYPAY_ACCOUNT_ID", "1234")
        .env("ANYPAY_API_KEY", "env-key")
        .env("ANYPAY_API_URL", UNREACHABLE_API_URL)
        .arg("rates")
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_payout_with_nan_amount_is_rejected_before_sending() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["payout", "5", "qiwi", "NaN", "+79001234567"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_payout_invalid_status_url() {
    let temp = TestConfigBuilder::new().unreachable().build();

    test_command(&temp)
        .args([
            "payout",
            "5",
            "qiwi",
            "150.5",
            "+79001234567",
            "--status-url",
            "not a url",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status URL"));
}

#[test]
fn test_invalid_header_name_is_config_error() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["-H", "Bad Header: x", "balance"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid header name"));
}

#[test]
fn test_header_without_colon_is_usage_error() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["--header", "X-Shop", "balance"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Expected 'Name: Value'"));
}

#[test]
fn test_zero_connect_timeout_is_config_error() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["--connect-timeout", "0", "balance"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("connect_timeout_secs"));
}

#[test]
fn test_header_and_connect_timeout_reach_the_network() {
    let temp = setup_test_config();

    test_command(&temp)
        .args([
            "--api-url",
            UNREACHABLE_API_URL,
            "--connect-timeout",
            "2",
            "-H",
            "X-Shop: main",
            "-vvv",
            "balance",
        ])
        .assert()
        .failure()
        .code(4);
}
