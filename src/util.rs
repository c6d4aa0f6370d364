// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for subprocess calls, HTML escaping, number formatting, file output, CLI exit handling and man page rendering
// role: utilities/helpers
// inputs: Various primitives; paths; clap CommandFactory and clap::Error
// outputs: Command stdout, escaped/formatted strings, files written, man page text, process exit codes
// side_effects: run_gh invokes subprocesses; write_file creates parent directories
// invariants:
// - run_gh returns stdout only when the command exits successfully
// - escape_html escapes & < > " so titles are safe in element and attribute positions
// - format_thousands groups by three with ',' regardless of locale
// errors: run_gh surfaces command + stderr; IO errors bubble with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;
use std::process::{Command, ExitCode};

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::debug;

/// Environment override for the host CLI binary (default `gh`).
pub const GH_BIN_ENV: &str = "HARVEST_GH_BIN";

pub fn gh_bin() -> String {
  std::env::var(GH_BIN_ENV)
    .ok()
    .filter(|s| !s.trim().is_empty())
    .unwrap_or_else(|| "gh".to_string())
}

pub fn run_gh(args: &[String]) -> Result<String> {
  let bin = gh_bin();
  debug!(bin = %bin, ?args, "spawning host CLI");

  let out = Command::new(&bin)
    .args(args)
    .output()
    .with_context(|| format!("spawning {} {:?}", bin, args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("{} {:?} failed: {}", bin, args, stderr.trim())
  }
}

pub fn escape_html(s: &str) -> String {
  html_escape::encode_double_quoted_attribute(s).to_string()
}

/// `1234567` -> `1,234,567`.
pub fn format_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }

  out
}

/// Write `bytes` to `path`, creating parent directories first.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent.display()))?;
    }
  }

  std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// Print a clap parse error (or help/version text) and pick the exit code.
/// Help and version exit 0; every usage error exits 1.
pub fn exit_for_clap_error(err: clap::Error) -> ExitCode {
  let _ = err.print();

  if err.use_stderr() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
