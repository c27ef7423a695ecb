//! Command-line front gate for a shell host.
//!
//! ```text
//! argv → registry lookup → switch handlers → LaunchConfigBuilder → LaunchConfig
//! ```
//!
//! The resolver decides the host's whole operating mode (interactive vs batch,
//! transport, apartment model, script target, formats) before anything else
//! starts, or stops with a classified [`launch::Diagnostic`].

pub mod args;
pub mod config;
pub mod launch;
pub mod logging;

pub use args::{CommandLineResolver, Platform, StdinState};
pub use launch::{Diagnostic, ExitCode, LaunchConfig, ResolverError};
