// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Pure helper to estimate billable hours for a PR from its diff size and file count
// role: estimation
// outputs: f64 hours (no IO)
// invariants:
// - Result is >= min_hours and a multiple of 0.5 when the config is valid
// - Deterministic math; absent counts are treated as 0
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};

use crate::model::PullRequest;

/// Knobs for the hours estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
  pub lines_per_hour: f64,
  pub file_complexity_multiplier: f64,
  pub min_hours: f64,
}

impl Default for EstimatorConfig {
  fn default() -> Self {
    Self {
      lines_per_hour: 100.0,
      file_complexity_multiplier: 0.25,
      min_hours: 0.5,
    }
  }
}

impl EstimatorConfig {
  pub fn validate(&self) -> Result<()> {
    if !(self.lines_per_hour.is_finite() && self.lines_per_hour > 0.0) {
      bail!("--lines-per-hour must be greater than 0 (got {})", self.lines_per_hour);
    }

    if !(self.file_complexity_multiplier.is_finite() && self.file_complexity_multiplier >= 0.0) {
      bail!("--file-multiplier must be 0 or greater (got {})", self.file_complexity_multiplier);
    }

    // the floor must sit on the 0.5 grid or rounding could dip below it
    if !(self.min_hours > 0.0 && (self.min_hours * 2.0).fract() == 0.0) {
      bail!("--min-hours must be a positive multiple of 0.5 (got {})", self.min_hours);
    }

    Ok(())
  }
}

/// Round to the nearest half hour; halves round up.
fn round_half_hour(hours: f64) -> f64 {
  (hours * 2.0).round() / 2.0
}

pub fn estimate_hours(additions: u64, deletions: u64, changed_files: u64, cfg: &EstimatorConfig) -> f64 {
  let lines = (additions + deletions) as f64;
  let hours = lines / cfg.lines_per_hour + changed_files as f64 * cfg.file_complexity_multiplier;

  round_half_hour(hours.max(cfg.min_hours))
}

pub fn estimate_pr_hours(pr: &PullRequest, cfg: &EstimatorConfig) -> f64 {
  estimate_hours(
    pr.additions.unwrap_or(0),
    pr.deletions.unwrap_or(0),
    pr.changed_files.unwrap_or(0),
    cfg,
  )
}
