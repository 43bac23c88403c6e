//! CLI module for expo-chat.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Replaying captured event streams (`decode`)
//! - Interactive chat
//!
//! # Usage
//!
//! ```ignore
//! use expo_chat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Err(e) = run_cli_command(command) {
//!     eprintln!("Error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

pub mod args;
pub mod chat;
pub mod decode;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use chat::run_chat;
pub use decode::{decode_reader, handle_decode_command, DecodeReport, DEFAULT_CHUNK_SIZE};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::ChatConfig;

/// Run a parsed CLI command.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Invalid(reason) => {
            eprintln!("{}\n", USAGE);
            Err(eyre!(reason))
        }
        CliCommand::Decode { path, chunk_size } => {
            handle_decode_command(path.as_deref(), chunk_size)
        }
        CliCommand::Chat => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_chat(ChatConfig::from_env()))
        }
    }
}
