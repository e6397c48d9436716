use std::process::ExitCode;

use clap::Parser as _;
use clap::error::ErrorKind;
use log::{debug, error};

use perfkit_report::run_report;

mod cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // Usage goes to stdout, like the help text.
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };
    debug!("Arguments: {args:?}");

    let result = run_report(&args.timestamp, &args.data_file, &args.derive_options());
    match cli::write_run_outcome(&result, &mut std::io::stdout()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("Failed to write to stdout: {err}");
            ExitCode::FAILURE
        }
    }
}
