// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report run: fetch merged PRs, aggregate, then emit JSON or render and write HTML
// role: processing/orchestrator
// inputs: EffectiveConfig; a PrSource; a writer standing in for stdout
// outputs: Outcome (nothing, JSON on the writer, or an HTML file on disk)
// side_effects: Host CLI calls via the source; writes the HTML file
// invariants:
// - No PRs in the window ⇒ informational log, no output, success
// - --json never touches the template or the filesystem
// - "now" is resolved once and shared by the window, the report date and the file name
// errors: Propagates fetch/parse/render/write errors with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::aggregate::build_report;
use crate::cli::EffectiveConfig;
use crate::dates::{effective_now, window_start};
use crate::params::build_aggregate_params;
use crate::render::render_report;
use crate::source::{FetchQuery, PrSource, build_source, fetch_merged_prs, resolve_project_name};
use crate::writer::{default_output_path, write_html, write_json};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  NoPullRequests,
  Json,
  Html(PathBuf),
}

pub fn run(cfg: &EffectiveConfig) -> Result<Outcome> {
  let source = build_source();
  let stdout = std::io::stdout();
  run_with(cfg, source.as_ref(), stdout.lock())
}

pub fn run_with<W: Write>(cfg: &EffectiveConfig, source: &dyn PrSource, out: W) -> Result<Outcome> {
  // Phase 1: window
  let now = effective_now(cfg.now_override);
  let today = cfg.tz.date_of(&now);
  let start = window_start(today, cfg.days);

  // Phase 2: fetch
  let query = FetchQuery { repo: cfg.repo.clone(), author: cfg.author.clone() };
  let prs = fetch_merged_prs(source, &query, start, &cfg.tz)?;
  info!("Found {} PRs", prs.len());

  if prs.is_empty() {
    info!("No PRs found in the specified period.");
    return Ok(Outcome::NoPullRequests);
  }

  // Phase 3: aggregate
  info!("Aggregating data...");
  let project_name = resolve_project_name(source, cfg.repo.as_deref());
  let params = build_aggregate_params(cfg, project_name, now);
  let doc = build_report(&prs, &params);

  if cfg.json {
    write_json(&doc, out)?;
    return Ok(Outcome::Json);
  }

  // Phase 4: render + persist
  info!("Generating HTML...");
  let rendered = render_report(&doc, &cfg.template_path, cfg.lang)?;
  let path = cfg.output.clone().unwrap_or_else(|| default_output_path(today));
  write_html(&path, &rendered.html)?;
  info!("Report generated: {}", path.display());

  Ok(Outcome::Html(path))
}
