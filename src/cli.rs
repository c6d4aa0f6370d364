use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use crate::dates::{Lang, MAX_DAYS, ReportTz, parse_now_override};
use crate::estimate::EstimatorConfig;
use crate::render::resolve_template_path;

pub const DEFAULT_TEMPLATE: &str = "templates/client-report.html";

#[derive(Parser, Debug)]
#[command(
    name = "harvest-report",
    version,
    about = "Generate a client work report (HTML or JSON) from merged pull requests",
    long_about = None
)]
pub struct Cli {
  /// Look back this many days from today
  #[arg(long, default_value_t = 7)]
  pub days: u32,

  /// Only include PRs by this GitHub login
  #[arg(long)]
  pub author: Option<String>,

  /// Repository as owner/name (default: the repository gh sees in the current dir)
  #[arg(long)]
  pub repo: Option<String>,

  /// HTML output path (default: client-report-YYYY-MM-DD.html)
  #[arg(long)]
  pub output: Option<PathBuf>,

  /// HTML template; relative paths resolve against --base-dir
  #[arg(long, default_value = DEFAULT_TEMPLATE)]
  pub template: PathBuf,

  /// Directory that relative template paths hang off
  #[arg(long, env = "HARVEST_BASE_DIR", default_value = ".")]
  pub base_dir: PathBuf,

  /// Print the report document as JSON to stdout instead of writing HTML
  #[arg(long)]
  pub json: bool,

  /// Language for long dates and standalone page text
  #[arg(long, value_enum, default_value_t = Lang::Ja)]
  pub lang: Lang,

  /// Timezone used to turn merge timestamps into days: local, utc, or an IANA name
  #[arg(long, default_value = "local")]
  pub tz: String,

  /// Changed lines that count as one hour of work
  #[arg(long, default_value_t = 100.0)]
  pub lines_per_hour: f64,

  /// Hours added per changed file
  #[arg(long = "file-multiplier", default_value_t = 0.25)]
  pub file_multiplier: f64,

  /// Floor for a single PR's estimate (multiple of 0.5)
  #[arg(long, default_value_t = 0.5)]
  pub min_hours: f64,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub days: u32,
  pub author: Option<String>,
  pub repo: Option<String>,
  pub output: Option<PathBuf>,
  pub template_path: PathBuf,
  pub json: bool,
  pub lang: Lang,
  pub tz: ReportTz,
  pub estimator: EstimatorConfig,
  pub now_override: Option<DateTime<Utc>>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if cli.days > MAX_DAYS {
    bail!("--days must be at most {} (got {})", MAX_DAYS, cli.days);
  }

  let estimator = EstimatorConfig {
    lines_per_hour: cli.lines_per_hour,
    file_complexity_multiplier: cli.file_multiplier,
    min_hours: cli.min_hours,
  };
  estimator.validate()?;

  let tz = cli.tz.parse::<ReportTz>().context("--tz")?;
  let now_override = parse_now_override(cli.now_override.as_deref())?;

  // Empty strings behave like the flag was omitted.
  let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

  Ok(EffectiveConfig {
    days: cli.days,
    author: non_empty(cli.author),
    repo: non_empty(cli.repo),
    output: cli.output,
    template_path: resolve_template_path(&cli.base_dir, &cli.template),
    json: cli.json,
    lang: cli.lang,
    tz,
    estimator,
    now_override,
  })
}

/// Arguments of the HTML to PDF converter.
#[derive(Parser, Debug)]
#[command(
    name = "harvest-pdf",
    version,
    about = "Print an HTML report to an A4 PDF with headless Chrome",
    long_about = None
)]
pub struct PdfCli {
  /// HTML file to print
  pub input: PathBuf,

  /// PDF file to write
  pub output: PathBuf,
}
