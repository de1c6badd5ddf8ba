use std::io::Write;

use certsrv_codes::{
    CaResponseDisposition, CodeDomain, Decoded, RequestDisposition, RequestType,
};
use clap::Parser;
use tracing::{debug, info};

use super::{DecodedRow, Domain, MemberRow, parse_value};
use crate::error::result::CliResult;

/// Print the integer value of a symbolic name.
///
/// Both the canonical name (e.g. `Issued`) and the Windows name
/// (e.g. `CR_DISP_ISSUED`) are accepted.
#[derive(Parser, Debug)]
pub struct NameAction {
    /// The code domain
    #[clap(value_enum)]
    domain: Domain,

    /// The symbolic name to look up
    name: String,
}

impl NameAction {
    #[must_use]
    pub const fn new(domain: Domain, name: String) -> Self {
        Self { domain, name }
    }

    pub fn run(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        match self.domain {
            Domain::CaResponse => self.run_for::<CaResponseDisposition>(json, out),
            Domain::RequestDisposition => self.run_for::<RequestDisposition>(json, out),
            Domain::RequestType => self.run_for::<RequestType>(json, out),
        }
    }

    fn run_for<T: CodeDomain>(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        let member = T::lookup_name(&self.name)?;
        debug!("{}: {} = {}", T::DOMAIN, self.name, member.value());
        if json {
            serde_json::to_writer(&mut *out, &MemberRow::new(member))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", member.value())?;
        }
        Ok(())
    }
}

/// Print the symbolic name of an integer value.
///
/// A value outside the known set is printed as `Unrecognized(<value>)`
/// and is not an error: CAs may return codes newer than this table.
#[derive(Parser, Debug)]
pub struct ValueAction {
    /// The code domain
    #[clap(value_enum)]
    domain: Domain,

    /// The value, in decimal or `0x` hexadecimal
    #[clap(allow_hyphen_values = true)]
    value: String,
}

impl ValueAction {
    #[must_use]
    pub const fn new(domain: Domain, value: String) -> Self {
        Self { domain, value }
    }

    pub fn run(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        let value = parse_value(&self.value)?;
        match self.domain {
            Domain::CaResponse => Self::run_for::<CaResponseDisposition>(value, json, out),
            Domain::RequestDisposition => Self::run_for::<RequestDisposition>(value, json, out),
            Domain::RequestType => Self::run_for::<RequestType>(value, json, out),
        }
    }

    fn run_for<T: CodeDomain>(value: u32, json: bool, out: &mut impl Write) -> CliResult<()> {
        let decoded = Decoded::<T>::from_value(value);
        if !decoded.is_known() {
            info!("{} does not define the value {value}", T::DOMAIN);
        }
        if json {
            serde_json::to_writer(&mut *out, &DecodedRow::new(decoded))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{decoded}")?;
        }
        Ok(())
    }
}
