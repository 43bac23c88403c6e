use color_eyre::Result;
use expo_chat::cli::{parse_args, run_cli_command};
use expo_chat::logging;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_tracing();

    let command = parse_args(std::env::args());
    tracing::debug!("Running {:?}", command);
    run_cli_command(command)
}
