use std::process::ExitCode;

use clap::Parser;

use harvest_report::cli::PdfCli;
use harvest_report::pdf::{ChromeExporter, convert};
use harvest_report::{logging, util};

fn main() -> ExitCode {
  let cli = match PdfCli::try_parse() {
    Ok(cli) => cli,
    Err(err) => return util::exit_for_clap_error(err),
  };

  logging::init();

  match convert(&cli.input, &cli.output, &ChromeExporter::default()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{:#}", e);
      ExitCode::FAILURE
    }
  }
}
