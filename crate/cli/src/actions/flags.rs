use std::io::Write;

use certsrv_codes::{CodeDomain, Decoded, RequestFlags, RequestType};
use clap::{Parser, Subcommand};
use serde::Serialize;

use super::parse_value;
use crate::{cli_ensure, error::result::CliResult};

/// Compose and decode request type flags (`CR_IN_*`).
#[derive(Subcommand, Debug)]
pub enum FlagsCommands {
    Compose(ComposeAction),
    Decode(DecodeAction),
}

impl FlagsCommands {
    pub fn process(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        match self {
            Self::Compose(action) => action.run(json, out),
            Self::Decode(action) => action.run(json, out),
        }
    }
}

/// Combine request type names with a bitwise OR and print the value.
///
/// Each argument is a name (canonical or Windows) or an integer;
/// an argument may itself be a `|` separated list.
#[derive(Parser, Debug)]
pub struct ComposeAction {
    /// The names or values to combine
    #[clap(required = true)]
    names: Vec<String>,
}

impl ComposeAction {
    #[must_use]
    pub const fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn run(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        cli_ensure!(!self.names.is_empty(), "at least one flag must be given");
        let flags = RequestFlags::parse_flags(&self.names.join("|"))?;
        if json {
            serde_json::to_writer(&mut *out, &FlagsRow::new(flags))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", flags.bits())?;
        }
        Ok(())
    }
}

/// Split a request type value into its format and modifiers.
#[derive(Parser, Debug)]
pub struct DecodeAction {
    /// The value, in decimal or `0x` hexadecimal
    #[clap(allow_hyphen_values = true)]
    value: String,
}

impl DecodeAction {
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self { value }
    }

    pub fn run(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        let flags = RequestFlags::from_bits_retain(parse_value(&self.value)?);
        let row = FlagsRow::new(flags);
        if json {
            serde_json::to_writer(&mut *out, &row)?;
            writeln!(out)?;
            return Ok(())
        }
        writeln!(out, "value: {} ({:#x})", row.value, row.value)?;
        writeln!(out, "format: {}", row.format)?;
        if row.modifiers.is_empty() {
            writeln!(out, "modifiers: none")?;
        } else {
            writeln!(out, "modifiers: {}", row.modifiers.join(", "))?;
        }
        if row.unknown_bits != 0 {
            writeln!(out, "unknown bits: {:#x}", row.unknown_bits)?;
        }
        Ok(())
    }
}

/// Request type flags, as printed in JSON output.
#[derive(Serialize, Debug)]
pub struct FlagsRow {
    pub value: u32,
    pub flags: String,
    pub format: Decoded<RequestType>,
    pub modifiers: Vec<&'static str>,
    pub unknown_bits: u32,
}

impl FlagsRow {
    #[must_use]
    pub fn new(flags: RequestFlags) -> Self {
        Self {
            value: flags.bits(),
            flags: flags.to_string(),
            format: flags.format(),
            modifiers: flags.modifiers().map(CodeDomain::name).collect(),
            unknown_bits: flags.unknown_bits(),
        }
    }
}
