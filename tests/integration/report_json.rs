use jsonschema::validator_for;
use predicates::prelude::*;
use test_support::{NOW, cmd_bin, fixture_env, read_fixture_text};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn run_json(prs_json: &str, extra: &[&str]) -> serde_json::Value {
  let out = cmd_bin("harvest-report")
    .envs(fixture_env(prs_json))
    .args(["--json", "--tz", "utc", "--days", "7", "--now-override", NOW])
    .args(extra)
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).expect("stdout is the JSON document")
}

#[test]
fn json_totals_cover_the_window() {
  let v = run_json(&read_fixture_text("prs.json"), &[]);

  assert_eq!(v["meta"]["projectName"], "acme/widgets");
  assert_eq!(v["meta"]["author"], "All Contributors");
  assert_eq!(v["meta"]["startDate"], "2025-08-08");
  assert_eq!(v["meta"]["endDate"], "2025-08-15");
  assert_eq!(v["meta"]["startDateFormatted"], "2025年8月8日");

  assert_eq!(v["summary"]["totalTasks"], 5);
  assert_eq!(v["summary"]["totalHours"], 12.0);
  assert_eq!(v["summary"]["totalAdditions"], "+490");
  assert_eq!(v["summary"]["totalDeletions"], "-248");
  assert_eq!(v["summary"]["netChange"], 242);
  assert_eq!(v["summary"]["completionRate"], "100%");

  let numbers: Vec<u64> = v["prs"].as_array().unwrap().iter().map(|p| p["number"].as_u64().unwrap()).collect();
  assert_eq!(numbers, vec![101, 102, 103, 104, 106]);
  assert_eq!(v["prs"][1]["category"], "fix");
  assert_eq!(v["prs"][2]["category"], "docs");
  assert_eq!(v["prs"][4]["no"], 5);
  assert_eq!(v["prs"][4]["hours"], 0.5);
}

#[test]
fn json_chart_series_are_ordered() {
  let v = run_json(&read_fixture_text("prs.json"), &[]);

  assert_eq!(
    v["charts"]["daily"]["labels"],
    serde_json::json!(["8/8", "8/9", "8/10", "8/11", "8/12", "8/13", "8/14"])
  );
  assert_eq!(v["charts"]["daily"]["data"], serde_json::json!([0.5, 0.0, 0.0, 0.0, 2.5, 1.0, 7.5]));
  assert_eq!(
    v["charts"]["category"]["labels"],
    serde_json::json!(["Refactor (7.5h)", "Feature (2.5h)", "Bug Fix (1.0h)", "Documentation (0.5h)", "Other (0.5h)"])
  );
}

#[test]
fn json_conforms_to_schema() {
  let v = run_json(&read_fixture_text("prs.json"), &["--lang", "en"]);
  let schema = read_schema("harvest-report.report.schema.json");
  let compiled = validator_for(&schema).expect("compile schema");
  compiled.validate(&v).expect("schema validation failed for report JSON");
  assert_eq!(v["meta"]["endDateFormatted"], "August 15, 2025");
}

#[test]
fn author_filter_narrows_the_report() {
  let v = run_json(&read_fixture_text("prs.json"), &["--author", "alice"]);
  assert_eq!(v["meta"]["author"], "alice");
  assert_eq!(v["summary"]["totalTasks"], 3);
  assert_eq!(v["summary"]["totalHours"], 10.5);
}

#[test]
fn explicit_repo_names_the_project() {
  let v = run_json(&read_fixture_text("prs.json"), &["--repo", "other/thing"]);
  assert_eq!(v["meta"]["projectName"], "other/thing");
}

#[test]
fn empty_window_exits_zero_without_output() {
  let td = test_support::tempdir();
  cmd_bin("harvest-report")
    .current_dir(td.path())
    .envs(fixture_env("[]"))
    .args(["--tz", "utc", "--now-override", NOW])
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("No PRs found in the specified period."));
  assert_eq!(std::fs::read_dir(td.path()).unwrap().count(), 0);
}

#[test]
fn malformed_pr_listing_exits_one() {
  cmd_bin("harvest-report")
    .envs(fixture_env("{ not json"))
    .args(["--json", "--now-override", NOW])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("parsing merged pull request list"));
}
