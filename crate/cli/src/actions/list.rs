use std::io::Write;

use certsrv_codes::{CaResponseDisposition, CodeDomain, RequestDisposition, RequestType};
use clap::Parser;

use super::{Domain, MemberRow};
use crate::error::result::CliResult;

/// List every member of a domain, in value order.
#[derive(Parser, Debug)]
pub struct ListAction {
    /// The code domain
    #[clap(value_enum)]
    domain: Domain,
}

impl ListAction {
    #[must_use]
    pub const fn new(domain: Domain) -> Self {
        Self { domain }
    }

    pub fn run(&self, json: bool, out: &mut impl Write) -> CliResult<()> {
        let rows = match self.domain {
            Domain::CaResponse => rows::<CaResponseDisposition>(),
            Domain::RequestDisposition => rows::<RequestDisposition>(),
            Domain::RequestType => rows::<RequestType>(),
        };
        if json {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
            return Ok(())
        }
        for row in rows {
            writeln!(
                out,
                "{:<16} {:<28} {}",
                row.name, row.windows_name, row.value
            )?;
        }
        Ok(())
    }
}

fn rows<T: CodeDomain>() -> Vec<MemberRow> {
    T::members().iter().copied().map(MemberRow::new).collect()
}
