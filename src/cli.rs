//! Command-line front ends for the Reed-Muller binaries.
//!
//! `rm_encode`, `rm_decode` and `rm_selftest` are thin wrappers around the option
//! structs and runners below. Results are reported through `log`; runners return the
//! process exit status.

use crate::cs::ecc::{
    exhaustive_self_test, format_word, parse_word, sampled_self_test, Decoding, ReedMuller,
};
use crate::error::{Error, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser};
use env_logger::Env;
use log::{error, info, warn};

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for missing or malformed arguments.
pub const EXIT_USAGE: u8 = 1;
/// Exit status for code parameters that cannot be built.
pub const EXIT_PARAMETERS: u8 = 2;
/// Exit status for a self-test that found decoding failures.
pub const EXIT_SELF_TEST_FAILED: u8 = 3;

/// The `r m` pair selecting the code RM(r, m).
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CodeParameters {
    /// Maximum monomial degree r
    #[arg(value_name = "R")]
    pub r: usize,

    /// Number of boolean variables m, must be greater than r
    #[arg(value_name = "M")]
    pub m: usize,
}

impl CodeParameters {
    /// Build the code these parameters describe.
    pub fn build(&self) -> Result<ReedMuller> {
        ReedMuller::new(self.r, self.m)
    }
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "rm_encode", version, about = "Encode messages with the Reed-Muller code RM(r,m)")]
pub struct EncodeOptions {
    #[command(flatten)]
    pub code: CodeParameters,

    /// Messages to encode, each a 0-1 string of the code's message length
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "rm_decode", version, about = "Decode codewords of the Reed-Muller code RM(r,m)")]
pub struct DecodeOptions {
    #[command(flatten)]
    pub code: CodeParameters,

    /// Received words to decode, each a 0-1 string of the code's block length
    #[arg(value_name = "CODEWORD", required = true)]
    pub codewords: Vec<String>,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "rm_selftest",
    version,
    about = "Check that RM(r,m) corrects every error pattern within its strength"
)]
pub struct SelfTestOptions {
    #[command(flatten)]
    pub code: CodeParameters,

    /// Draw this many random trials instead of enumerating all of them
    #[arg(long)]
    pub samples: Option<usize>,

    /// Seed for --samples
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// What happened to one word given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOutcome {
    Encoded(String),
    Decoded(String),
    Ambiguous,
    Rejected,
}

/// Initialize the global logger.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If unset, `info` is used by default.
pub fn init_logger() {
    let env = Env::default().default_filter_or("info");
    // Ignore errors if the logger was already initialized
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
}

/// Parse the process arguments, or return the exit status to stop with.
///
/// Help and version requests print and stop successfully; anything else clap
/// rejects is a usage error.
pub fn parse_options<T: Parser>() -> std::result::Result<T, u8> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
            _ => EXIT_USAGE,
        }
    })
}

/// Encode every word, logging one line per word.
pub fn encode_words(code: &ReedMuller, words: &[String]) -> Vec<WordOutcome> {
    let k = code.message_length();
    words
        .iter()
        .map(|word| match parse_word(word) {
            Ok(message) if message.len() == k => match code.encode(&message) {
                Ok(codeword) => {
                    let encoded = format_word(&codeword);
                    info!("Encoded word: {}", encoded);
                    WordOutcome::Encoded(encoded)
                }
                Err(err) => {
                    error!("Unexpected error while processing word {}: {}", word, err);
                    WordOutcome::Rejected
                }
            },
            _ => {
                error!("FAIL: word {} is not a 0-1 string of length {}", word, k);
                WordOutcome::Rejected
            }
        })
        .collect()
}

/// Decode every word, logging one line per word.
pub fn decode_words(code: &ReedMuller, codewords: &[String]) -> Vec<WordOutcome> {
    let n = code.block_length();
    codewords
        .iter()
        .map(|word| match parse_word(word) {
            Ok(received) if received.len() == n => match code.decode(&received) {
                Ok(Decoding::Decoded(message)) => {
                    let decoded = format_word(&message);
                    info!("Decoded word: {}", decoded);
                    WordOutcome::Decoded(decoded)
                }
                Ok(Decoding::Ambiguous) => {
                    warn!("Could not unambiguously decode word {}", word);
                    WordOutcome::Ambiguous
                }
                Err(err) => {
                    error!("Unexpected error while processing word {}: {}", word, err);
                    WordOutcome::Rejected
                }
            },
            _ => {
                error!("FAIL: word {} is not a 0-1 string of length {}", word, n);
                WordOutcome::Rejected
            }
        })
        .collect()
}

pub fn run_encode(options: &EncodeOptions) -> u8 {
    match build_code(&options.code) {
        Ok(code) => {
            encode_words(&code, &options.words);
            EXIT_SUCCESS
        }
        Err(status) => status,
    }
}

pub fn run_decode(options: &DecodeOptions) -> u8 {
    match build_code(&options.code) {
        Ok(code) => {
            decode_words(&code, &options.codewords);
            EXIT_SUCCESS
        }
        Err(status) => status,
    }
}

pub fn run_self_test(options: &SelfTestOptions) -> u8 {
    let code = match build_code(&options.code) {
        Ok(code) => code,
        Err(status) => return status,
    };
    info!("{}", code);

    let report = match options.samples {
        Some(samples) => sampled_self_test(&code, samples, options.seed),
        None => exhaustive_self_test(&code),
    };

    match report {
        Ok(report) if report.is_success() => {
            info!("RM({},{}): success.", options.code.r, options.code.m);
            EXIT_SUCCESS
        }
        Ok(report) => {
            error!(
                "RM({},{}): {} of {} trials failed.",
                options.code.r,
                options.code.m,
                report.failures.len(),
                report.trials
            );
            EXIT_SELF_TEST_FAILED
        }
        Err(err @ Error::InputTooLarge { .. }) => {
            error!("{}; use --samples for a randomized check", err);
            EXIT_USAGE
        }
        Err(err) => {
            error!("{}", err);
            EXIT_USAGE
        }
    }
}

fn build_code(parameters: &CodeParameters) -> std::result::Result<ReedMuller, u8> {
    parameters.build().map_err(|err| {
        match err {
            Error::InvalidParameters { .. } => error!("We require r < m."),
            other => error!("{}", other),
        }
        EXIT_PARAMETERS
    })
}
