//! Settings for the `hostline` binary.
//!
//! The resolver itself takes no configuration beyond [`Platform`](crate::args::Platform);
//! this file only lets users pin platform capabilities and the log filter.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, PlatformOverrides};
