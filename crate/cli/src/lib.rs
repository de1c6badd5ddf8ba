pub mod actions;
pub mod commands;
pub mod error;

pub use commands::certsrv_main;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
