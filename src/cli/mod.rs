//! # CLI Module
//!
//! Command-line access to the CORS engine, exposed as the `brrtcors`
//! binary. Both commands read a configuration file the same way a host
//! service would, including the `BRRTR_CORS_*` overrides.
//!
//! ## Commands
//!
//! ### `show`
//!
//! Print the normalized policy as JSON:
//!
//! ```bash
//! brrtcors show --config cors.yaml
//! ```
//!
//! ### `check`
//!
//! Simulate one request and print the status, headers, whether the inner
//! handler ran, and the decision:
//!
//! ```bash
//! brrtcors check --config cors.yaml --method OPTIONS \
//!     --origin https://app.example.com \
//!     --request-method POST \
//!     --request-headers Content-Type
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brrtcors::cli::run_cli;
//!
//! run_cli()?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{check, run, run_cli, CheckReport, Cli, Commands};
