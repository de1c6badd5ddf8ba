use certsrv_codes::{CodeDomain, Decoded, parse_u32};
use clap::ValueEnum;
use serde::Serialize;

use crate::{
    cli_bail,
    error::{CliError, result::CliResult},
};

pub mod flags;
pub mod list;
pub mod lookup;

/// The independent code domains of the registry.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Disposition returned by the CA for a request (`CR_DISP_*`)
    CaResponse,
    /// Disposition of a request in the CA database (`DB_DISP_*`)
    RequestDisposition,
    /// Request format and modifier flags (`CR_IN_*`)
    RequestType,
}

/// A member of a domain, as printed in JSON output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub domain: &'static str,
    pub name: &'static str,
    pub windows_name: &'static str,
    pub value: u32,
}

impl MemberRow {
    pub fn new<T: CodeDomain>(member: T) -> Self {
        Self {
            domain: T::DOMAIN,
            name: member.name(),
            windows_name: member.windows_name(),
            value: member.value(),
        }
    }
}

/// A decoded integer, as printed in JSON output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow {
    pub domain: &'static str,
    pub value: u32,
    pub recognized: bool,
    pub name: Option<&'static str>,
    pub windows_name: Option<&'static str>,
}

impl DecodedRow {
    pub fn new<T: CodeDomain>(decoded: Decoded<T>) -> Self {
        let known = decoded.known();
        Self {
            domain: T::DOMAIN,
            value: decoded.value(),
            recognized: decoded.is_known(),
            name: known.map(CodeDomain::name),
            windows_name: known.map(CodeDomain::windows_name),
        }
    }
}

/// Parse an integer given on the command line: decimal, `0x` hexadecimal,
/// or a negative `LONG` whose bit pattern is kept.
pub(crate) fn parse_value(value: &str) -> CliResult<u32> {
    let value = value.trim();
    if let Some(unsigned) = parse_u32(value) {
        return Ok(unsigned)
    }
    match value.parse::<i32>() {
        Ok(signed) => Ok(u32::from_ne_bytes(signed.to_ne_bytes())),
        Err(e) => cli_bail!(CliError::InvalidValue(format!("{value}: {e}"))),
    }
}
