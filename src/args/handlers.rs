//! Switch behavior.
//!
//! Each handler pulls its own values off the cursor and records the outcome
//! in the builder. Failures go through [`LaunchConfigBuilder::fail`]; the
//! dispatcher stops as soon as one is recorded.

use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::args::cursor::ArgCursor;
use crate::args::encoding;
use crate::args::platform::{Platform, StdinState};
use crate::args::registry::Switch;
use crate::launch::{
    ApartmentState, DataFormat, Diagnostic, LaunchConfigBuilder, ScriptTarget, TrailingArg,
    Transport, WindowStyle,
};

/// Whether the dispatcher keeps reading tokens after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy)]
enum FormatStream {
    Input,
    Output,
}

/// Run the handler for a matched switch. `token` is the switch as typed.
pub(crate) fn dispatch(
    switch: Switch,
    token: &str,
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    platform: &Platform,
    stdin: StdinState,
) -> Flow {
    match switch {
        Switch::Help => {
            builder.show_help();
            return Flow::Stop;
        }
        Switch::Version => {
            builder.show_version();
            return Flow::Stop;
        }
        Switch::Login => {}
        Switch::NoExit => builder.set_no_exit(),
        Switch::NoProfile => builder.set_skip_profiles(),
        Switch::NoLogo => builder.hide_banner(),
        Switch::NonInteractive => builder.set_non_interactive(true),
        Switch::Interactive => builder.set_non_interactive(false),
        Switch::SocketServerMode => server_transport(builder, Transport::SocketServer),
        Switch::NamedPipeServerMode => server_transport(builder, Transport::NamedPipeServer),
        Switch::SshServerMode => server_transport(builder, Transport::SshServer),
        Switch::ServerMode => server_transport(builder, Transport::Server),
        Switch::ConfigurationName => configuration_name(cursor, builder),
        Switch::CustomPipeName => custom_pipe_name(cursor, builder, platform),
        Switch::WindowStyle => window_style(cursor, builder, platform),
        Switch::OutputFormat => data_format(cursor, builder, FormatStream::Output),
        Switch::InputFormat => data_format(cursor, builder, FormatStream::Input),
        Switch::ExecutionPolicy => execution_policy(cursor, builder),
        Switch::EncodedCommand => encoded_command(token, cursor, builder),
        Switch::Command => return command(token, cursor, builder, stdin),
        Switch::EncodedArguments => encoded_arguments(cursor, builder),
        Switch::File => return file(token, cursor, builder),
        Switch::SettingsFile => settings_file(cursor, builder),
        Switch::Sta => apartment(builder, platform, ApartmentState::Sta),
        Switch::Mta => apartment(builder, platform, ApartmentState::Mta),
        Switch::WorkingDirectory => working_directory(cursor, builder),
        Switch::RemoveWorkingDirectoryTrailingCharacter => {
            builder.set_remove_working_directory_trailing_character()
        }
    }
    Flow::Continue
}

/// Make a path absolute against the current directory, converting `/` to
/// the native separator where that differs. Falls back to the raw value when
/// the path cannot be resolved.
pub(crate) fn normalize_path(raw: &str) -> PathBuf {
    let native = if MAIN_SEPARATOR == '\\' {
        raw.replace('/', "\\")
    } else {
        raw.to_string()
    };
    std::path::absolute(&native).unwrap_or_else(|_| PathBuf::from(native))
}

/// Select a script file and hand every remaining token to it.
///
/// The target is recorded even when the file is missing so the host can
/// report which path it tried; `missing` builds the diagnostic from that path.
pub(crate) fn script_file(
    value: &str,
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    missing: impl FnOnce(PathBuf) -> Diagnostic,
) -> Flow {
    let path = normalize_path(value);
    let exists = path.is_file();
    builder.select_script_target(ScriptTarget::File { path: path.clone() });
    if !exists {
        builder.fail(missing(path));
        return Flow::Stop;
    }
    let rest = cursor.rest();
    tracing::trace!(count = rest.len(), "passing remaining tokens to script file");
    builder.push_trailing_args(rest.iter().map(|t| TrailingArg::from_file_token(t)));
    Flow::Stop
}

fn server_transport(builder: &mut LaunchConfigBuilder, requested: Transport) {
    let current = builder.transport();
    if current != Transport::Console && current != requested {
        builder.fail(Diagnostic::ConflictingTransport { current, requested });
    } else {
        builder.set_transport(requested);
    }
}

fn configuration_name(cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    match cursor.next() {
        Some(name) => builder.set_configuration_name(name),
        None => builder.fail(Diagnostic::MissingConfigurationNameArgument),
    }
}

fn custom_pipe_name(
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    platform: &Platform,
) {
    let Some(name) = cursor.next() else {
        builder.fail(Diagnostic::MissingCustomPipeNameArgument);
        return;
    };
    if let Some(max_length) = platform.max_pipe_name_length {
        let length = name.chars().count();
        if length > max_length {
            builder.fail(Diagnostic::CustomPipeNameTooLong {
                max_length,
                name: name.to_string(),
                length,
            });
            return;
        }
    }
    builder.set_custom_pipe_name(name);
}

fn window_style(
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    platform: &Platform,
) {
    if !platform.is_windows {
        builder.fail(Diagnostic::WindowStyleArgumentNotImplemented);
        return;
    }
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingWindowStyleArgument);
        return;
    };
    match value.parse::<WindowStyle>() {
        Ok(style) => builder.set_window_style(style),
        Err(err) => builder.fail(Diagnostic::InvalidWindowStyleArgument {
            value: value.to_string(),
            reason: err.to_string(),
        }),
    }
}

fn data_format(
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    stream: FormatStream,
) {
    let Some(value) = cursor.next() else {
        builder.fail(match stream {
            FormatStream::Input => Diagnostic::MissingInputFormatParameter,
            FormatStream::Output => Diagnostic::MissingOutputFormatParameter,
        });
        return;
    };
    match (value.parse::<DataFormat>(), stream) {
        (Ok(format), FormatStream::Input) => builder.set_input_format(format),
        (Ok(format), FormatStream::Output) => builder.set_output_format(format),
        (Err(()), _) => builder.fail(Diagnostic::BadFormatParameterValue {
            value: value.to_string(),
        }),
    }
}

fn execution_policy(cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    match cursor.next() {
        Some(policy) if !policy.is_empty() => builder.set_execution_policy(policy),
        _ => builder.fail(Diagnostic::MissingExecutionPolicyParameter),
    }
}

fn encoded_command(token: &str, cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    if builder.has_script_target() {
        builder.fail(Diagnostic::ConflictingScriptTarget {
            token: token.to_string(),
        });
        return;
    }
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingCommandParameter);
        return;
    };
    if value == "-" {
        builder.fail(Diagnostic::BadCommandValue);
        return;
    }
    match encoding::decode_command(value) {
        Ok(text) => builder.select_script_target(ScriptTarget::Command {
            text,
            encoded: true,
        }),
        Err(err) => {
            tracing::debug!(error = %err, "-EncodedCommand value rejected");
            builder.fail(Diagnostic::BadCommandValue);
        }
    }
}

fn command(
    token: &str,
    cursor: &mut ArgCursor<'_>,
    builder: &mut LaunchConfigBuilder,
    stdin: StdinState,
) -> Flow {
    if builder.has_script_target() {
        builder.fail(Diagnostic::ConflictingScriptTarget {
            token: token.to_string(),
        });
        return Flow::Stop;
    }
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingCommandParameter);
        return Flow::Stop;
    };

    if value == "-" {
        if cursor.remaining() > 0 {
            builder.fail(Diagnostic::TooManyParametersToCommand);
            return Flow::Stop;
        }
        builder.read_commands_from_stdin(true);
        if !stdin.is_redirected() {
            builder.fail(Diagnostic::StdinNotRedirected);
        }
        return Flow::Stop;
    }

    builder.select_script_target(ScriptTarget::Command {
        text: value.to_string(),
        encoded: false,
    });
    let rest = cursor.rest();
    tracing::trace!(count = rest.len(), "passing remaining tokens to command");
    builder.push_trailing_args(rest.iter().map(|t| TrailingArg::literal(t.as_str())));
    Flow::Stop
}

fn encoded_arguments(cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingArgsValue);
        return;
    };
    match encoding::decode_arguments(value) {
        Ok(args) => builder.push_trailing_args(args.into_iter().map(TrailingArg::literal)),
        Err(err) => {
            tracing::debug!(error = %err, "-EncodedArguments value rejected");
            builder.fail(Diagnostic::BadArgsValue);
        }
    }
}

fn file(token: &str, cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) -> Flow {
    if builder.has_script_target() {
        builder.fail(Diagnostic::ConflictingScriptTarget {
            token: token.to_string(),
        });
        return Flow::Stop;
    }
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingFileArgument);
        return Flow::Stop;
    };
    if value == "-" {
        builder.read_commands_from_stdin(false);
        return Flow::Continue;
    }
    script_file(value, cursor, builder, |resolved| {
        Diagnostic::ArgumentFileDoesNotExist {
            token: value.to_string(),
            resolved,
        }
    })
}

fn settings_file(cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    let Some(value) = cursor.next() else {
        builder.fail(Diagnostic::MissingSettingsFileArgument);
        return;
    };
    let path = normalize_path(value);
    if path.is_file() {
        builder.set_settings_file(value);
    } else {
        builder.fail(Diagnostic::SettingsFileNotExists { path });
    }
}

fn apartment(builder: &mut LaunchConfigBuilder, platform: &Platform, requested: ApartmentState) {
    if !platform.desktop_apartments {
        builder.fail(match requested {
            ApartmentState::Sta => Diagnostic::StaNotImplemented,
            ApartmentState::Mta => Diagnostic::MtaNotImplemented,
        });
        return;
    }
    match builder.apartment() {
        Some(current) if current != requested => builder.fail(Diagnostic::MtaStaMutuallyExclusive),
        _ => builder.set_apartment(requested),
    }
}

fn working_directory(cursor: &mut ArgCursor<'_>, builder: &mut LaunchConfigBuilder) {
    match cursor.next() {
        Some(path) => builder.set_working_directory(path),
        None => builder.fail(Diagnostic::MissingWorkingDirectoryArgument),
    }
}
