use chrono::Local;
use shop_creators_scraper::config::Config;
use shop_creators_scraper::runner::{self, RunError};
use std::process::ExitCode;

fn main() -> ExitCode {
    // nothing is logged until the run log exists
    let (config, paths, _log_handle) = match setup() {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match runner::run(&config, &paths) {
        Ok(report) => {
            report.summary.log();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup() -> Result<(Config, runner::RunPaths, log4rs::Handle), RunError> {
    let config = Config::load()?;
    let (paths, handle) = runner::prepare_output(&config, &Local::now())?;
    Ok((config, paths, handle))
}
