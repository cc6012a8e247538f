//! Shared plumbing for the command line edge
//!
//! - `pager`: `Write` adapter over the `minus` pager
//! - `config`: environment variables read by the binary and by commit creation
//! - `telemetry`: `tracing` subscriber setup

pub mod config;
pub mod pager;
pub mod telemetry;
