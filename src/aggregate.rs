// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn fetched PRs into the report document (per-PR rows, category/date buckets, summary totals, chart series)
// role: aggregation
// inputs: &[PullRequest] already filtered to the window; AggregateParams
// outputs: ReportDocument
// invariants:
// - prs[i].no == i + 1, one row per input PR, input order preserved
// - by_category keys appear in first-encounter order; by_date keys are chronological
// - summary.total_hours equals the sum of row hours rounded to one decimal
// - PRs without mergedAt count everywhere except by_date
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::charts::{category_series, daily_series};
use crate::classify::classify;
use crate::dates::{Lang, ReportTz, format_long, format_short, iso_date, iso_timestamp, window_start};
use crate::estimate::{EstimatorConfig, estimate_pr_hours};
use crate::model::{Bucket, Category, Charts, ProcessedPr, PullRequest, ReportDocument, ReportMeta, ReportSummary};
use crate::util::format_thousands;

pub const ALL_CONTRIBUTORS: &str = "All Contributors";
pub const UNKNOWN_AUTHOR: &str = "unknown";
pub const COMPLETION_RATE: &str = "100%";

/// Everything the aggregation needs besides the PRs themselves.
#[derive(Debug, Clone)]
pub struct AggregateParams {
  pub project_name: String,
  pub author: Option<String>,
  pub days: u32,
  pub today: NaiveDate,
  pub generated_at: DateTime<Utc>,
  pub tz: ReportTz,
  pub lang: Lang,
  pub estimator: EstimatorConfig,
}

impl AggregateParams {
  pub fn start_date(&self) -> NaiveDate {
    window_start(self.today, self.days)
  }
}

pub fn process_prs(prs: &[PullRequest], params: &AggregateParams) -> Vec<ProcessedPr> {
  prs
    .iter()
    .enumerate()
    .map(|(idx, pr)| ProcessedPr {
      no: idx + 1,
      number: pr.number,
      title: pr.title.clone(),
      author: pr.author_login().unwrap_or(UNKNOWN_AUTHOR).to_string(),
      category: classify(pr),
      hours: estimate_pr_hours(pr, &params.estimator),
      additions: pr.additions.unwrap_or(0),
      deletions: pr.deletions.unwrap_or(0),
      changed_files: pr.changed_files.unwrap_or(0),
      labels: pr.labels.iter().map(|l| l.name.clone()).collect(),
      created_at: pr.created_at,
      merged_at: pr.merged_at,
      merged_date: pr
        .merged_at
        .map(|m| format_short(params.tz.date_of(&m)))
        .unwrap_or_else(|| "-".to_string()),
      url: pr.url.clone(),
    })
    .collect()
}

pub fn bucket_by_category(rows: &[ProcessedPr]) -> IndexMap<Category, Bucket> {
  let mut out: IndexMap<Category, Bucket> = IndexMap::new();

  for row in rows {
    out.entry(row.category).or_default().add(row.hours);
  }

  out
}

pub fn bucket_by_date(rows: &[ProcessedPr], tz: &ReportTz) -> BTreeMap<String, Bucket> {
  let mut out: BTreeMap<String, Bucket> = BTreeMap::new();

  for row in rows {
    let Some(merged) = row.merged_at else { continue };
    out.entry(iso_date(tz.date_of(&merged))).or_default().add(row.hours);
  }

  out
}

pub fn summarize(rows: &[ProcessedPr]) -> ReportSummary {
  let hours: f64 = rows.iter().map(|r| r.hours).sum();
  let additions: u64 = rows.iter().map(|r| r.additions).sum();
  let deletions: u64 = rows.iter().map(|r| r.deletions).sum();

  ReportSummary {
    total_tasks: rows.len(),
    total_hours: (hours * 10.0).round() / 10.0,
    total_additions: format!("+{}", format_thousands(additions)),
    total_deletions: format!("-{}", format_thousands(deletions)),
    net_change: additions as i64 - deletions as i64,
    completion_rate: COMPLETION_RATE.to_string(),
  }
}

pub fn build_report(prs: &[PullRequest], params: &AggregateParams) -> ReportDocument {
  // Phase 1: per-PR rows
  let rows = process_prs(prs, params);

  // Phase 2: buckets and totals
  let by_category = bucket_by_category(&rows);
  let by_date = bucket_by_date(&rows, &params.tz);
  let summary = summarize(&rows);

  // Phase 3: chart projections
  let start = params.start_date();
  let charts = Charts {
    daily: daily_series(&by_date, start, params.days),
    category: category_series(&by_category),
  };

  let generated_day = params.tz.date_of(&params.generated_at);
  let meta = ReportMeta {
    project_name: params.project_name.clone(),
    author: params.author.clone().unwrap_or_else(|| ALL_CONTRIBUTORS.to_string()),
    start_date: iso_date(start),
    end_date: iso_date(params.today),
    start_date_formatted: format_long(start, params.lang),
    end_date_formatted: format_long(params.today, params.lang),
    generated_at: iso_timestamp(&params.generated_at),
    generated_at_formatted: format_long(generated_day, params.lang),
    timezone: params.tz.label(),
  };

  ReportDocument { meta, summary, prs: rows, by_category, by_date, charts }
}
