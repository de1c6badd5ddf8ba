use super::CliError;

pub type CliResult<R> = Result<R, CliError>;

/// Trait for providing helper methods for `CliResult`.
pub trait CliResultHelper<T> {
    /// Sets the context for the error.
    ///
    /// # Errors
    ///
    /// Returns a `CliResult` with the specified context.
    fn context(self, context: &str) -> CliResult<T>;
}

impl<T, E> CliResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> CliResult<T> {
        self.map_err(|e| CliError::Default(format!("{context}: {e}")))
    }
}
