//! Command-line surface for cadence.
//!
//! Exposes the clap-backed argument model, validated run configuration, and
//! the fetch-aggregate-report pipeline driven by the `cadence` binary.

pub mod bootstrap_helpers;
pub mod channel_report;
pub mod cli_args;
pub mod run_config;

pub use bootstrap_helpers::init_tracing;
pub use channel_report::{fetch_channel_events, run_report};
pub use cli_args::Cli;
pub use run_config::{ConfigError, RunConfig};
