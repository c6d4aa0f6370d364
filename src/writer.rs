// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Persist a rendered report (HTML file) or emit the report document as JSON
// role: persistence/output
// inputs: ReportDocument or rendered HTML; optional explicit output path; report date
// outputs: HTML file on disk or pretty JSON on a writer
// side_effects: Writes to filesystem / stdout
// invariants:
// - Default HTML file name is client-report-<YYYY-MM-DD>.html in the working directory
// - JSON output is pretty-printed and newline-terminated
// errors: IO errors surfaced with full path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use crate::dates::iso_date;
use crate::model::ReportDocument;
use crate::util::write_file;

pub fn default_output_path(today: NaiveDate) -> PathBuf {
  PathBuf::from(format!("client-report-{}.html", iso_date(today)))
}

pub fn write_json<W: Write>(doc: &ReportDocument, mut out: W) -> Result<()> {
  serde_json::to_writer_pretty(&mut out, doc)?;
  writeln!(out)?;
  out.flush()?;
  Ok(())
}

pub fn write_html(path: &Path, html: &str) -> Result<()> {
  write_file(path, html.as_bytes())
}
