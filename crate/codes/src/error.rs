use thiserror::Error;

pub type CodeResult<R> = Result<R, CodeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Unknown symbol in {domain}: {name}")]
    UnknownSymbol { domain: &'static str, name: String },

    /// Raised for integers outside the known set. CAs may return codes newer
    /// than this table, so callers should surface it rather than abort.
    #[error("Unrecognized value in {domain}: {value}")]
    UnrecognizedValue { domain: &'static str, value: i64 },

    #[error("Not a format in {domain}: {name}")]
    NotAFormat {
        domain: &'static str,
        name: &'static str,
    },
}

impl CodeError {
    #[must_use]
    pub fn domain(&self) -> &'static str {
        match self {
            Self::UnknownSymbol { domain, .. }
            | Self::UnrecognizedValue { domain, .. }
            | Self::NotAFormat { domain, .. } => *domain,
        }
    }
}
