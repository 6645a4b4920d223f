use reed_muller::cli::{self, EncodeOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logger();
    let status = match cli::parse_options::<EncodeOptions>() {
        Ok(options) => cli::run_encode(&options),
        Err(status) => status,
    };
    ExitCode::from(status)
}
