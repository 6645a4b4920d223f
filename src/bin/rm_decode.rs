use reed_muller::cli::{self, DecodeOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logger();
    let status = match cli::parse_options::<DecodeOptions>() {
        Ok(options) => cli::run_decode(&options),
        Err(status) => status,
    };
    ExitCode::from(status)
}
