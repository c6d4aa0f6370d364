use predicates::prelude::*;
use test_support::cmd_bin;

#[test]
fn missing_arguments_exit_one() {
  cmd_bin("harvest-pdf").assert().failure().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_fails_before_launching_a_browser() {
  let td = test_support::tempdir();
  let output = td.path().join("out.pdf");
  cmd_bin("harvest-pdf")
    .env("RUST_LOG", "info")
    .arg(td.path().join("absent.html"))
    .arg(&output)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("input HTML not found"));
  assert!(!output.exists());
}
