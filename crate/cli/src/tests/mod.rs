mod lookup;

use certsrv_logger::log_init;
use clap::Parser;

use crate::{commands::Cli, error::result::CliResult};

/// Parse `args` as the command line and run it in process,
/// returning what the command printed.
pub(crate) fn run_cli(args: &[&str]) -> CliResult<String> {
    log_init(option_env!("RUST_LOG"));
    let cli = Cli::try_parse_from(std::iter::once("certsrv").chain(args.iter().copied()))
        .map_err(|e| crate::cli_error!(e))?;
    let mut out = Vec::new();
    cli.run(&mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
