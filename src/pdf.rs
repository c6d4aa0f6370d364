// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Print an HTML report to an A4 PDF through headless Chrome
// role: export/pdf
// inputs: input HTML path, output PDF path, a PdfExporter
// outputs: PDF file on disk
// side_effects: Launches a headless browser (ChromeExporter); writes the output file
// invariants:
// - A4 portrait, zero page margins, backgrounds printed
// - Missing input fails before any browser is launched
// errors: browser launch/navigation/print failures propagate with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};

use crate::util::write_file;

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
/// Grace period after load so Chart.js (fetched from a CDN) can draw.
pub const RENDER_SETTLE: Duration = Duration::from_secs(1);
pub const A4_WIDTH_IN: f64 = 8.27;
pub const A4_HEIGHT_IN: f64 = 11.69;

// --- Trait seam for the browser ---
pub trait PdfExporter {
  /// Load `url` and return the printed PDF bytes.
  fn export(&self, url: &str) -> Result<Vec<u8>>;
}

pub fn a4_print_options() -> PrintToPdfOptions {
  PrintToPdfOptions {
    print_background: Some(true),
    paper_width: Some(A4_WIDTH_IN),
    paper_height: Some(A4_HEIGHT_IN),
    margin_top: Some(0.0),
    margin_bottom: Some(0.0),
    margin_left: Some(0.0),
    margin_right: Some(0.0),
    prefer_css_page_size: Some(true),
    ..Default::default()
  }
}

#[derive(Debug, Clone)]
pub struct ChromeExporter {
  pub timeout: Duration,
  pub settle: Duration,
}

impl Default for ChromeExporter {
  fn default() -> Self {
    Self { timeout: NAVIGATION_TIMEOUT, settle: RENDER_SETTLE }
  }
}

impl PdfExporter for ChromeExporter {
  fn export(&self, url: &str) -> Result<Vec<u8>> {
    let options = LaunchOptions::default_builder()
      .headless(true)
      .sandbox(false)
      .build()
      .map_err(|e| anyhow!("building browser launch options: {}", e))?;
    let browser = Browser::new(options).context("launching headless Chrome")?;
    let tab = browser.new_tab().context("opening browser tab")?;
    tab.set_default_timeout(self.timeout);

    debug!(url, "navigating");
    tab
      .navigate_to(url)
      .and_then(|t| t.wait_until_navigated())
      .with_context(|| format!("loading {}", url))?;
    thread::sleep(self.settle);

    tab.print_to_pdf(Some(a4_print_options())).context("printing to PDF")
  }
}

/// `file://` URL for an existing local file.
pub fn file_url(path: &Path) -> Result<String> {
  let abs = std::fs::canonicalize(path).with_context(|| format!("input HTML not found: {}", path.display()))?;
  Ok(format!("file://{}", abs.display()))
}

pub fn convert(input: &Path, output: &Path, exporter: &dyn PdfExporter) -> Result<()> {
  let url = file_url(input)?;
  info!("Converting {} to PDF...", input.display());

  let bytes = exporter.export(&url)?;
  write_file(output, &bytes)?;

  info!("PDF generated: {}", output.display());
  Ok(())
}
