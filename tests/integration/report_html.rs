use predicates::prelude::*;
use test_support::{NOW, cmd_bin, fixture_env, package_root, read_fixture_text};

#[test]
fn standalone_html_is_written_to_default_path() {
  let td = test_support::tempdir();
  cmd_bin("harvest-report")
    .current_dir(td.path())
    .env_remove("HARVEST_BASE_DIR")
    .envs(fixture_env(&read_fixture_text("prs.json")))
    .args(["--tz", "utc", "--now-override", NOW, "--template", "no-such-template.html"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Found 5 PRs"))
    .stderr(predicate::str::contains("Aggregating data..."))
    .stderr(predicate::str::contains("Generating HTML..."))
    .stderr(predicate::str::contains("Template not found at ./no-such-template.html"))
    .stderr(predicate::str::contains("--base-dir"))
    .stderr(predicate::str::contains("Report generated: client-report-2025-08-15.html"));

  let html = std::fs::read_to_string(td.path().join("client-report-2025-08-15.html")).unwrap();
  assert!(html.contains("作業報告書"));
  assert!(html.contains("Fix: handle &lt;empty&gt; cart &amp; totals"));
  assert!(!html.contains("<empty>"));
  assert!(html.contains(r#"<canvas id="dailyChart"></canvas>"#));
  assert!(html.contains(r#"<canvas id="categoryChart"></canvas>"#));
  assert!(html.contains("https://cdn.jsdelivr.net/npm/chart.js"));
}

#[test]
fn english_standalone_uses_english_labels() {
  let td = test_support::tempdir();
  let out = td.path().join("reports/week.html");
  cmd_bin("harvest-report")
    .current_dir(td.path())
    .env_remove("HARVEST_BASE_DIR")
    .envs(fixture_env(&read_fixture_text("prs.json")))
    .args(["--tz", "utc", "--now-override", NOW, "--lang", "en", "--template", "missing.html"])
    .arg("--output")
    .arg(&out)
    .assert()
    .success();

  let html = std::fs::read_to_string(&out).unwrap();
  assert!(html.contains("<html lang=\"en\">"));
  assert!(html.contains("Work Report"));
  assert!(html.contains("August 8, 2025"));
}

#[test]
fn bundled_template_is_filled() {
  let td = test_support::tempdir();
  let out = td.path().join("report.html");
  cmd_bin("harvest-report")
    .current_dir(td.path())
    .envs(fixture_env(&read_fixture_text("prs.json")))
    .args(["--tz", "utc", "--now-override", NOW])
    .arg("--base-dir")
    .arg(package_root())
    .arg("--output")
    .arg(&out)
    .assert()
    .success();

  let html = std::fs::read_to_string(&out).unwrap();
  assert!(!html.contains("{{"), "unreplaced placeholder left in output");
  assert!(html.contains("acme/widgets"));
  assert!(html.contains("12.0h"));
  assert!(html.contains("+490"));
  assert!(html.contains(r#"labels: ["8/8","8/9","8/10","8/11","8/12","8/13","8/14"]"#));
  assert!(html.contains("data: [0.5,0.0,0.0,0.0,2.5,1.0,7.5]"));
  assert!(html.contains(
    r#"labels: ["Refactor (7.5h)","Feature (2.5h)","Bug Fix (1.0h)","Documentation (0.5h)","Other (0.5h)"]"#
  ));
  assert!(html.contains("data: [7.5,2.5,1.0,0.5,0.5]"));
}
