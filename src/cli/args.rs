//! Command-line argument parsing for the expo-chat CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use super::decode::DEFAULT_CHUNK_SIZE;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Replay a captured event stream through the decoder
    Decode {
        /// Input file; stdin when `None`
        path: Option<PathBuf>,
        /// Bytes per simulated network read
        chunk_size: usize,
    },
    /// Interactive chat (default)
    Chat,
    /// Arguments could not be parsed
    Invalid(String),
}

/// Usage text printed for `--help` and invalid arguments.
pub const USAGE: &str = "\
Usage:
  expo-chat [chat]                              Interactive chat on stdin/stdout
  expo-chat decode [FILE|-] [--chunk-size N]    Decode a captured event stream
  expo-chat --version | -V
  expo-chat --help | -h

Environment:
  EXPO_CHAT_URL, EXPO_CHAT_API_KEY, EXPO_CHAT_MODEL,
  EXPO_CHAT_CONNECT_TIMEOUT_SECS, EXPO_CHAT_MAX_PENDING_BYTES, EXPO_CHAT_LOG";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use expo_chat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["expo-chat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(first) = args.next() else {
        return CliCommand::Chat;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" => CliCommand::Help,
        "chat" => CliCommand::Chat,
        "decode" => parse_decode_args(args),
        other => CliCommand::Invalid(format!("unknown argument '{}'", other)),
    }
}

fn parse_decode_args<I>(mut args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut path = None;
    let mut chunk_size = DEFAULT_CHUNK_SIZE;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chunk-size" => {
                match args
                    .next()
                    .and_then(|value| value.parse::<usize>().ok())
                    .filter(|size| *size > 0)
                {
                    Some(size) => chunk_size = size,
                    None => {
                        return CliCommand::Invalid(
                            "--chunk-size needs a positive integer".to_string(),
                        )
                    }
                }
            }
            "-" => path = None,
            flag if flag.starts_with('-') => {
                return CliCommand::Invalid(format!("unknown decode option '{}'", flag));
            }
            file => {
                if path.is_some() {
                    return CliCommand::Invalid("decode takes a single FILE".to_string());
                }
                path = Some(PathBuf::from(file));
            }
        }
    }

    CliCommand::Decode { path, chunk_size }
}
