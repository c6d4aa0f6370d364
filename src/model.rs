// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the input PR records (as returned by `gh pr list --json`) and the report document shared by rendering and JSON output
// role: model/types
// outputs: Serializable structs with stable camelCase field names
// invariants: Category is one of the fixed vocabulary; bucket hours are sums of per-PR estimates
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PrAuthor {
  pub login: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrLabel {
  pub name: String,
}

/// One merged pull request as listed by the host CLI.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub author: Option<PrAuthor>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub merged_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub additions: Option<u64>,
  #[serde(default)]
  pub deletions: Option<u64>,
  #[serde(default)]
  pub changed_files: Option<u64>,
  #[serde(default)]
  pub labels: Vec<PrLabel>,
  #[serde(default)]
  pub url: String,
}

impl PullRequest {
  pub fn author_login(&self) -> Option<&str> {
    self.author.as_ref().map(|a| a.login.as_str())
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Feat,
  Fix,
  Refactor,
  Docs,
  Test,
  Chore,
  Perf,
  Style,
  Other,
}

impl Category {
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Feat => "feat",
      Category::Fix => "fix",
      Category::Refactor => "refactor",
      Category::Docs => "docs",
      Category::Test => "test",
      Category::Chore => "chore",
      Category::Perf => "perf",
      Category::Style => "style",
      Category::Other => "other",
    }
  }

  /// Human-readable name used in chart legends.
  pub fn display_name(&self) -> &'static str {
    match self {
      Category::Feat => "Feature",
      Category::Fix => "Bug Fix",
      Category::Refactor => "Refactor",
      Category::Docs => "Documentation",
      Category::Test => "Test",
      Category::Chore => "Chore",
      Category::Perf => "Performance",
      Category::Style => "Style",
      Category::Other => "Other",
    }
  }
}

/// A PR after classification and estimation.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPr {
  pub no: usize,
  pub number: u64,
  pub title: String,
  pub author: String,
  pub category: Category,
  pub hours: f64,
  pub additions: u64,
  pub deletions: u64,
  pub changed_files: u64,
  pub labels: Vec<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub merged_at: Option<DateTime<Utc>>,
  pub merged_date: String,
  pub url: String,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
  pub count: usize,
  pub hours: f64,
}

impl Bucket {
  pub fn add(&mut self, hours: f64) {
    self.count += 1;
    self.hours += hours;
  }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
  pub project_name: String,
  pub author: String,
  pub start_date: String,
  pub end_date: String,
  pub start_date_formatted: String,
  pub end_date_formatted: String,
  pub generated_at: String,
  pub generated_at_formatted: String,
  pub timezone: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
  pub total_tasks: usize,
  pub total_hours: f64,
  pub total_additions: String,
  pub total_deletions: String,
  pub net_change: i64,
  pub completion_rate: String,
}

/// Parallel label/value arrays fed to the charting library.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ChartSeries {
  pub labels: Vec<String>,
  pub data: Vec<f64>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Charts {
  pub daily: ChartSeries,
  pub category: ChartSeries,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
  pub meta: ReportMeta,
  pub summary: ReportSummary,
  pub prs: Vec<ProcessedPr>,
  pub by_category: IndexMap<Category, Bucket>,
  pub by_date: BTreeMap<String, Bucket>,
  pub charts: Charts,
}
