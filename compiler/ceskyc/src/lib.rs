//! Command-line driver for cesky.
//!
//! The `cesky` binary is a thin argument parser over [`commands`]; the
//! commands themselves live in this library so they can be tested without
//! spawning processes.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
