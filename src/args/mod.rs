//! Command-line resolution for the shell host.
//!
//! A single forward pass turns the host's argument vector into a
//! [`LaunchConfig`](crate::launch::LaunchConfig):
//!
//! ```text
//! argv → ArgCursor → registry lookup → switch handler → LaunchConfigBuilder → LaunchConfig
//!                          └─ no match → positional script file
//! ```
//!
//! Platform differences are injected through [`Platform`] and [`StdinState`]
//! so every branch is testable on any build target.

mod cursor;
mod encoding;
mod handlers;
mod platform;
mod registry;
mod resolver;

pub use encoding::{decode_arguments, decode_command, DecodeError};
pub use platform::{Platform, StdinState, UNIX_MAX_PIPE_NAME_LENGTH};
pub use registry::{
    lookup, suggest, switch_key, switch_registry, Availability, Switch, SwitchArity, SwitchDef,
};
pub use resolver::CommandLineResolver;
