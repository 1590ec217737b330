#![deny(unsafe_code)]

use std::{env, io, process::ExitCode};

use finder::cli;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let status = match cli::parse_args(env::args_os()) {
        Ok(options) => {
            cli::init_tracing(options.verbosity);
            cli::execute(&options, &mut stdout, &mut stderr)
        }
        Err(error) => cli::report_parse_error(&error, &mut stdout, &mut stderr),
    };
    ExitCode::from(status)
}
