use std::io::{Write, stdout};

use certsrv_logger::log_init;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::{
    actions::{
        flags::FlagsCommands,
        list::ListAction,
        lookup::{NameAction, ValueAction},
    },
    error::result::{CliResult, CliResultHelper},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, env = "CERTSRV_JSON")]
    pub json: bool,

    /// Log filter used when `RUST_LOG` is not set, e.g. `debug`
    #[arg(long, env = "CERTSRV_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommands,
}

#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Look up the value of a symbolic name
    Name(NameAction),
    /// Look up the symbolic name of a value
    Value(ValueAction),
    /// Compose and decode request type flags
    #[command(subcommand)]
    Flags(FlagsCommands),
    /// List the members of a domain
    List(ListAction),
}

impl Cli {
    /// Run the parsed command, writing its result to `out`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown name, an unparsable value or a write error.
    pub fn run(&self, out: &mut impl Write) -> CliResult<()> {
        debug!("running {:?}", self.command);
        match &self.command {
            CliCommands::Name(action) => action.run(self.json, out),
            CliCommands::Value(action) => action.run(self.json, out),
            CliCommands::Flags(action) => action.process(self.json, out),
            CliCommands::List(action) => action.run(self.json, out),
        }
    }
}

/// Main function of the `certsrv` binary.
///
/// # Errors
///
/// Returns the error of the executed subcommand.
pub fn certsrv_main() -> CliResult<()> {
    let cli = Cli::parse();
    log_init(cli.log_level.as_deref());
    info!("Starting certsrv CLI");

    let mut out = stdout().lock();
    cli.run(&mut out)?;
    out.flush().context("cannot flush stdout")
}
