use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use assert_cmd::Command;

const FIRST_SANDBOX_ORDER: &str = "order_00000000000001";

fn sandbox(amount: &str) -> Command {
    let mut cmd = Command::new(cargo_bin!("paybutton"));
    cmd.arg(amount).arg("--sandbox").env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_cli_sandbox_successful_payment() {
    let result = format!(
        r#"{{"razorpay_payment_id":"pay_1","razorpay_order_id":"{FIRST_SANDBOX_ORDER}","razorpay_signature":"sig"}}"#
    );

    sandbox("10")
        .write_stdin(result)
        .assert()
        .success()
        .stderr(predicate::str::contains("Pay ₹10"))
        .stderr(predicate::str::contains("\"amount\": 1000"))
        .stderr(predicate::str::contains("Payment successful!"));
}

#[test]
fn test_cli_sandbox_unknown_order_fails_verification() {
    let result = r#"{"razorpay_payment_id":"pay_1","razorpay_order_id":"order_forged","razorpay_signature":"sig"}"#;

    sandbox("10")
        .write_stdin(result)
        .assert()
        .success()
        .stderr(predicate::str::contains("Payment verification failed."));
}

#[test]
fn test_cli_sandbox_dismissed_widget() {
    sandbox("10")
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Checkout closed without payment."))
        .stderr(predicate::str::contains("Payment successful!").not());
}

#[test]
fn test_cli_invalid_amount() {
    sandbox("abc")
        .assert()
        .success()
        .stderr(predicate::str::contains("Please enter a valid amount."))
        .stderr(predicate::str::contains("Checkout options").not());
}

#[test]
fn test_cli_rejects_bad_backend_url() {
    let mut cmd = Command::new(cargo_bin!("paybutton"));
    cmd.arg("10").arg("--backend-url").arg("not a url");

    cmd.assert().failure();
}
