use reed_muller::cli::{self, SelfTestOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logger();
    let status = match cli::parse_options::<SelfTestOptions>() {
        Ok(options) => cli::run_self_test(&options),
        Err(status) => status,
    };
    ExitCode::from(status)
}
