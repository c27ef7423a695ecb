//! Launch configuration and diagnostic model.

mod config;
mod diagnostic;
mod types;

pub(crate) use config::LaunchConfigBuilder;
pub use config::LaunchConfig;
pub use diagnostic::{Diagnostic, ExitCode, ResolverError};
pub use types::{
    ApartmentState, DataFormat, ScriptTarget, TrailingArg, Transport, WindowStyle,
    WindowStyleParseError,
};
