use predicates::prelude::*;
use test_support::cmd_bin;

#[test]
fn help_exits_zero_and_names_the_binary() {
  cmd_bin("harvest-report")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("harvest-report"))
    .stdout(predicate::str::contains("--days"));
}

#[test]
fn unknown_flag_exits_one() {
  cmd_bin("harvest-report").arg("--definitely-not-a-flag").assert().failure().code(1);
}

#[test]
fn cli_generates_man_page() {
  let out = cmd_bin("harvest-report").args(["--gen-man"]).output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  // clap_mangen emits a roff manpage starting with .TH and mentions the binary name
  assert!(s.contains(".TH"));
  assert!(s.contains("harvest-report"));
}

#[test]
fn bad_timezone_is_reported() {
  cmd_bin("harvest-report")
    .env("RUST_LOG", "info")
    .args(["--tz", "Nowhere/Special", "--json"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn oversized_days_exits_one_without_panicking() {
  cmd_bin("harvest-report")
    .env("RUST_LOG", "info")
    .args(["--json", "--days", "4000000000"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("--days must be at most"))
    .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn invalid_min_hours_is_reported() {
  cmd_bin("harvest-report")
    .env("RUST_LOG", "info")
    .args(["--min-hours", "0.3", "--json"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("--min-hours"));
}
