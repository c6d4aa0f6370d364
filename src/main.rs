use std::process::ExitCode;

use clap::Parser;

use harvest_report::cli::{Cli, normalize};
use harvest_report::{logging, pipeline, util};

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => return util::exit_for_clap_error(err),
  };

  logging::init();

  if cli.gen_man {
    return match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        ExitCode::SUCCESS
      }
      Err(e) => {
        tracing::error!("{:#}", e);
        ExitCode::FAILURE
      }
    };
  }

  // Phase 1: normalize CLI, Phase 2: run the report
  match normalize(cli).and_then(|cfg| pipeline::run(&cfg)) {
    Ok(_) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{:#}", e);
      ExitCode::FAILURE
    }
  }
}
