//! Closed catalog of command-line diagnostics and the exit codes they map to.
//!
//! A diagnostic is a user-input problem: it is returned inside the
//! [`LaunchConfig`](super::LaunchConfig), never thrown past the caller.
//! [`ResolverError`] is the one fault that signals bad calling code instead.

use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::launch::types::{DataFormat, Transport};

/// Process exit code the host uses once startup is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitCode {
    #[default]
    Success,
    BadCommandLineParameter,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::BadCommandLineParameter => 64,
        }
    }
}

impl Serialize for ExitCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Programming-contract violations, distinct from bad command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("the command line resolver has already been used; create a new resolver per argument vector")]
    AlreadyResolved,
}

/// A terminal, classified parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error(
        "The argument '{token}' is not recognized as the name of a script file. Check the \
         spelling of the name, or if a path was included, verify that the path is correct and \
         try again."
    )]
    ArgumentFileDoesNotExist { token: String, resolved: PathBuf },

    #[error("Invalid argument '{token}'{hint}", hint = suggestion_text(.suggestions))]
    UnrecognizedSwitch {
        token: String,
        suggestions: Vec<String>,
    },

    #[error(
        "Cannot process the command because a script file or command was already specified \
         before '{token}'."
    )]
    ConflictingScriptTarget { token: String },

    #[error(
        "Cannot process the command because {} cannot be combined with {}.",
        .requested.switch_name(),
        .current.switch_name()
    )]
    ConflictingTransport {
        current: Transport,
        requested: Transport,
    },

    #[error(
        "Cannot process the command because -ConfigurationName requires an argument that is a \
         remote endpoint configuration name. Specify this argument and try again."
    )]
    MissingConfigurationNameArgument,

    #[error(
        "Cannot process the command because -CustomPipeName requires an argument that is a name \
         of the pipe you want to use. Specify this argument and try again."
    )]
    MissingCustomPipeNameArgument,

    #[error(
        "Cannot process the command because -CustomPipeName specified is too long. Pipe names on \
         this platform can be up to {max_length} characters long. Your pipe name '{name}' is \
         {length} characters."
    )]
    CustomPipeNameTooLong {
        max_length: usize,
        name: String,
        length: usize,
    },

    #[error("-WindowStyle is not implemented on this platform.")]
    WindowStyleArgumentNotImplemented,

    #[error(
        "Cannot process the command because -WindowStyle requires an argument that is normal, \
         hidden, minimized or maximized. Specify one of these argument values and try again."
    )]
    MissingWindowStyleArgument,

    #[error("Processing -WindowStyle '{value}' failed: {reason}.")]
    InvalidWindowStyleArgument { value: String, reason: String },

    #[error(
        "Cannot process the command because -OutputFormat requires a value. Specify one of the \
         following values and try again: {}.",
        DataFormat::NAMES
    )]
    MissingOutputFormatParameter,

    #[error(
        "Cannot process the command because -InputFormat requires a value. Specify one of the \
         following values and try again: {}.",
        DataFormat::NAMES
    )]
    MissingInputFormatParameter,

    #[error(
        "Cannot process the command because the value of the format parameter is not valid. \
         '{value}' is not one of the following values: {}.",
        DataFormat::NAMES
    )]
    BadFormatParameterValue { value: String },

    #[error(
        "Cannot process the execution policy because of a missing policy. A policy must follow \
         -ExecutionPolicy."
    )]
    MissingExecutionPolicyParameter,

    #[error(
        "Cannot process the command because of a missing parameter. A command must follow \
         -Command."
    )]
    MissingCommandParameter,

    #[error(
        "Cannot process the command because the value specified with -EncodedCommand is not \
         properly encoded. The value must be Base64 encoded."
    )]
    BadCommandValue,

    #[error(
        "Cannot process the command because -Command - was specified, but standard input is not \
         redirected."
    )]
    StdinNotRedirected,

    #[error(
        "Cannot process the command because -Command - was specified along with other arguments. \
         No arguments can follow '-Command -'."
    )]
    TooManyParametersToCommand,

    #[error(
        "Cannot process the command because -EncodedArguments requires a value. Specify a Base64 \
         encoded argument list and try again."
    )]
    MissingArgsValue,

    #[error(
        "Cannot process the command because the value specified with -EncodedArguments is not \
         properly encoded. The value must be Base64 encoded."
    )]
    BadArgsValue,

    #[error(
        "Cannot process the command because -SettingsFile requires a file path. Supply a path to \
         the settings file and try again."
    )]
    MissingSettingsFileArgument,

    #[error("Processing -SettingsFile '{}' failed because the file does not exist.", .path.display())]
    SettingsFileNotExists { path: PathBuf },

    #[error("-STA is not implemented on this platform.")]
    StaNotImplemented,

    #[error("-MTA is not implemented on this platform.")]
    MtaNotImplemented,

    #[error("The -STA and -MTA parameters cannot be used together.")]
    MtaStaMutuallyExclusive,

    #[error(
        "Cannot process the command because -WorkingDirectory requires a path. Supply a \
         directory path and try again."
    )]
    MissingWorkingDirectoryArgument,

    #[error(
        "Cannot process the command because -File requires a script file path or '-'. Supply a \
         path and try again."
    )]
    MissingFileArgument,
}

fn suggestion_text(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return ".".to_string();
    }
    let names: Vec<String> = suggestions.iter().map(|s| format!("-{s}")).collect();
    format!(", did you mean: {}?", names.join(", "))
}

impl Diagnostic {
    /// Stable classification name, independent of the message text.
    pub fn classification(&self) -> &'static str {
        match self {
            Self::ArgumentFileDoesNotExist { .. } => "ArgumentFileDoesNotExist",
            Self::UnrecognizedSwitch { .. } => "UnrecognizedSwitch",
            Self::ConflictingScriptTarget { .. } => "ConflictingScriptTarget",
            Self::ConflictingTransport { .. } => "ConflictingTransport",
            Self::MissingConfigurationNameArgument => "MissingConfigurationNameArgument",
            Self::MissingCustomPipeNameArgument => "MissingCustomPipeNameArgument",
            Self::CustomPipeNameTooLong { .. } => "CustomPipeNameTooLong",
            Self::WindowStyleArgumentNotImplemented => "WindowStyleArgumentNotImplemented",
            Self::MissingWindowStyleArgument => "MissingWindowStyleArgument",
            Self::InvalidWindowStyleArgument { .. } => "InvalidWindowStyleArgument",
            Self::MissingOutputFormatParameter => "MissingOutputFormatParameter",
            Self::MissingInputFormatParameter => "MissingInputFormatParameter",
            Self::BadFormatParameterValue { .. } => "BadFormatParameterValue",
            Self::MissingExecutionPolicyParameter => "MissingExecutionPolicyParameter",
            Self::MissingCommandParameter => "MissingCommandParameter",
            Self::BadCommandValue => "BadCommandValue",
            Self::StdinNotRedirected => "StdinNotRedirected",
            Self::TooManyParametersToCommand => "TooManyParametersToCommand",
            Self::MissingArgsValue => "MissingArgsValue",
            Self::BadArgsValue => "BadArgsValue",
            Self::MissingSettingsFileArgument => "MissingSettingsFileArgument",
            Self::SettingsFileNotExists { .. } => "SettingsFileNotExists",
            Self::StaNotImplemented => "STANotImplemented",
            Self::MtaNotImplemented => "MTANotImplemented",
            Self::MtaStaMutuallyExclusive => "MtaStaMutuallyExclusive",
            Self::MissingWorkingDirectoryArgument => "MissingWorkingDirectoryArgument",
            Self::MissingFileArgument => "MissingFileArgument",
        }
    }

    /// Whether the host should print its short usage text with the message.
    pub fn shows_short_help(&self) -> bool {
        matches!(
            self,
            Self::ArgumentFileDoesNotExist { .. }
                | Self::MissingOutputFormatParameter
                | Self::MissingInputFormatParameter
                | Self::BadFormatParameterValue { .. }
                | Self::MissingExecutionPolicyParameter
                | Self::MissingCommandParameter
                | Self::BadCommandValue
                | Self::StdinNotRedirected
                | Self::TooManyParametersToCommand
                | Self::MissingArgsValue
                | Self::BadArgsValue
                | Self::MissingFileArgument
        )
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::BadCommandLineParameter
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 2)?;
        state.serialize_field("classification", self.classification())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
