//! Command line driver for hoist.
//!
//! - `args` - command line arguments
//! - `config` - JSON configuration and option merging
//! - `driver` - parse, collect metadata, lower and print a set of modules
//! - `tracing_config` - opt-in tracing subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;
