// Entrypoint for the uploader.
// - Keeps `main` small: parse arguments, run the upload sequence.
// - Every failure maps to a distinct exit code, see `error::PushError`.

use clap::Parser;
use std::process::ExitCode;
use test_push::cli::{self, Cli};
use test_push::error::PushError;

fn main() -> ExitCode {
    if let Err(e) = test_push::telemetry::init() {
        eprintln!("warning: {e:#}");
    }

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", PushError::Usage);
            return ExitCode::from(PushError::Usage.exit_code());
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    match cli::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
