//! The resolved launch configuration and the builder handlers write into.

use std::path::Path;

use serde::Serialize;

use crate::launch::diagnostic::{Diagnostic, ExitCode};
use crate::launch::types::{
    ApartmentState, DataFormat, ScriptTarget, TrailingArg, Transport, WindowStyle,
};

/// Fully resolved, immutable description of how the host should start.
///
/// Only the resolver can produce one; consumers get read-only accessors.
/// When [`error`](Self::error) is present the host must abort with
/// [`exit_code`](Self::exit_code) and must not act on any other field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchConfig {
    abort_startup: bool,
    no_exit: bool,
    non_interactive: bool,
    no_prompt: bool,
    show_banner: bool,
    show_short_help: bool,
    show_extended_help: bool,
    show_version: bool,
    skip_profiles: bool,
    apartment: Option<ApartmentState>,
    throw_on_read_and_prompt: bool,
    transport: Transport,
    script_target: ScriptTarget,
    explicit_stdin_read: bool,
    trailing_args: Vec<TrailingArg>,
    configuration_name: Option<String>,
    custom_pipe_name: Option<String>,
    execution_policy: Option<String>,
    settings_file: Option<String>,
    working_directory: Option<String>,
    remove_working_directory_trailing_character: bool,
    window_style: Option<WindowStyle>,
    input_format: DataFormat,
    output_format: DataFormat,
    output_format_explicit: bool,
    exit_code: ExitCode,
    error: Option<Diagnostic>,
}

impl LaunchConfig {
    pub fn abort_startup(&self) -> bool {
        self.abort_startup
    }

    pub fn no_exit(&self) -> bool {
        self.no_exit
    }

    pub fn non_interactive(&self) -> bool {
        self.non_interactive
    }

    pub fn no_prompt(&self) -> bool {
        self.no_prompt
    }

    pub fn show_banner(&self) -> bool {
        self.show_banner
    }

    pub fn show_short_help(&self) -> bool {
        self.show_short_help
    }

    pub fn show_extended_help(&self) -> bool {
        self.show_extended_help
    }

    pub fn show_version(&self) -> bool {
        self.show_version
    }

    pub fn skip_profiles(&self) -> bool {
        self.skip_profiles
    }

    /// Apartment explicitly requested with `-STA`/`-MTA`, if any.
    pub fn apartment(&self) -> Option<ApartmentState> {
        self.apartment
    }

    /// STA unless MTA was requested.
    pub fn sta_mode(&self) -> bool {
        self.apartment != Some(ApartmentState::Mta)
    }

    pub fn throw_on_read_and_prompt(&self) -> bool {
        self.throw_on_read_and_prompt
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn script_target(&self) -> &ScriptTarget {
        &self.script_target
    }

    /// Script file path when the target is a file.
    pub fn file(&self) -> Option<&Path> {
        match &self.script_target {
            ScriptTarget::File { path } => Some(path),
            _ => None,
        }
    }

    /// Command body when the target is a literal or decoded command.
    pub fn initial_command(&self) -> Option<&str> {
        match &self.script_target {
            ScriptTarget::Command { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn was_initial_command_encoded(&self) -> bool {
        matches!(self.script_target, ScriptTarget::Command { encoded: true, .. })
    }

    pub fn explicit_stdin_read(&self) -> bool {
        self.explicit_stdin_read
    }

    pub fn trailing_args(&self) -> &[TrailingArg] {
        &self.trailing_args
    }

    pub fn configuration_name(&self) -> Option<&str> {
        self.configuration_name.as_deref()
    }

    pub fn custom_pipe_name(&self) -> Option<&str> {
        self.custom_pipe_name.as_deref()
    }

    pub fn execution_policy(&self) -> Option<&str> {
        self.execution_policy.as_deref()
    }

    pub fn settings_file(&self) -> Option<&str> {
        self.settings_file.as_deref()
    }

    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }

    pub fn remove_working_directory_trailing_character(&self) -> bool {
        self.remove_working_directory_trailing_character
    }

    pub fn window_style(&self) -> Option<WindowStyle> {
        self.window_style
    }

    pub fn input_format(&self) -> DataFormat {
        self.input_format
    }

    pub fn output_format(&self) -> DataFormat {
        self.output_format
    }

    pub fn output_format_explicit(&self) -> bool {
        self.output_format_explicit
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error(&self) -> Option<&Diagnostic> {
        self.error.as_ref()
    }

    /// Rendered diagnostic text for the host's error stream.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Mutable accumulator used during the single parse pass.
///
/// Every mutator is a no-op once a diagnostic has been recorded, so nothing
/// after the first failure can leak into the frozen configuration.
#[derive(Debug)]
pub(crate) struct LaunchConfigBuilder {
    config: LaunchConfig,
    noexit_seen: bool,
}

impl LaunchConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: LaunchConfig {
                abort_startup: false,
                no_exit: true,
                non_interactive: false,
                no_prompt: false,
                show_banner: true,
                show_short_help: false,
                show_extended_help: false,
                show_version: false,
                skip_profiles: false,
                apartment: None,
                throw_on_read_and_prompt: false,
                transport: Transport::Console,
                script_target: ScriptTarget::None,
                explicit_stdin_read: false,
                trailing_args: Vec::new(),
                configuration_name: None,
                custom_pipe_name: None,
                execution_policy: None,
                settings_file: None,
                working_directory: None,
                remove_working_directory_trailing_character: false,
                window_style: None,
                input_format: DataFormat::Text,
                output_format: DataFormat::Text,
                output_format_explicit: false,
                exit_code: ExitCode::Success,
                error: None,
            },
            noexit_seen: false,
        }
    }

    pub(crate) fn has_error(&self) -> bool {
        self.config.error.is_some()
    }

    /// Record the terminal diagnostic. Only the first one sticks.
    pub(crate) fn fail(&mut self, diagnostic: Diagnostic) {
        if self.has_error() {
            return;
        }
        tracing::debug!(
            classification = diagnostic.classification(),
            "command line rejected"
        );
        let c = &mut self.config;
        c.abort_startup = true;
        c.show_banner = false;
        if diagnostic.shows_short_help() {
            c.show_short_help = true;
        }
        c.error = Some(diagnostic);
    }

    fn edit(&mut self) -> Option<&mut LaunchConfig> {
        if self.has_error() {
            None
        } else {
            Some(&mut self.config)
        }
    }

    pub(crate) fn show_help(&mut self) {
        if let Some(c) = self.edit() {
            c.abort_startup = true;
            c.show_short_help = true;
            c.show_extended_help = true;
            c.show_banner = false;
        }
    }

    pub(crate) fn show_version(&mut self) {
        if let Some(c) = self.edit() {
            c.show_version = true;
            c.non_interactive = true;
            c.skip_profiles = true;
            c.show_banner = false;
            c.no_exit = false;
        }
    }

    pub(crate) fn set_no_exit(&mut self) {
        if let Some(c) = self.edit() {
            c.no_exit = true;
            self.noexit_seen = true;
        }
    }

    pub(crate) fn set_skip_profiles(&mut self) {
        if let Some(c) = self.edit() {
            c.skip_profiles = true;
        }
    }

    pub(crate) fn hide_banner(&mut self) {
        if let Some(c) = self.edit() {
            c.show_banner = false;
        }
    }

    pub(crate) fn set_non_interactive(&mut self, non_interactive: bool) {
        if let Some(c) = self.edit() {
            c.non_interactive = non_interactive;
            if non_interactive {
                c.throw_on_read_and_prompt = true;
            }
        }
    }

    pub(crate) fn transport(&self) -> Transport {
        self.config.transport
    }

    pub(crate) fn set_transport(&mut self, transport: Transport) {
        if let Some(c) = self.edit() {
            c.transport = transport;
        }
    }

    pub(crate) fn apartment(&self) -> Option<ApartmentState> {
        self.config.apartment
    }

    pub(crate) fn set_apartment(&mut self, apartment: ApartmentState) {
        if let Some(c) = self.edit() {
            c.apartment = Some(apartment);
        }
    }

    /// Standard input counts as a script target: once chosen, it forecloses
    /// files and commands.
    pub(crate) fn has_script_target(&self) -> bool {
        !self.config.script_target.is_none() || self.config.explicit_stdin_read
    }

    /// Fix the script target; the host then runs it and exits unless `-NoExit` was given.
    pub(crate) fn select_script_target(&mut self, target: ScriptTarget) {
        let keep_running = self.noexit_seen;
        if let Some(c) = self.edit() {
            c.script_target = target;
            c.show_banner = false;
            if !keep_running {
                c.no_exit = false;
            }
        }
    }

    /// `-File -` and `-Command -`: commands come from standard input.
    pub(crate) fn read_commands_from_stdin(&mut self, no_prompt: bool) {
        if let Some(c) = self.edit() {
            c.explicit_stdin_read = true;
            c.no_prompt = no_prompt;
            c.show_banner = false;
        }
    }

    pub(crate) fn push_trailing_args(&mut self, args: impl IntoIterator<Item = TrailingArg>) {
        if let Some(c) = self.edit() {
            c.trailing_args.extend(args);
        }
    }

    pub(crate) fn set_configuration_name(&mut self, name: &str) {
        if let Some(c) = self.edit() {
            c.configuration_name = Some(name.to_string());
        }
    }

    pub(crate) fn set_custom_pipe_name(&mut self, name: &str) {
        if let Some(c) = self.edit() {
            c.custom_pipe_name = Some(name.to_string());
        }
    }

    pub(crate) fn set_execution_policy(&mut self, policy: &str) {
        if let Some(c) = self.edit() {
            c.execution_policy = Some(policy.to_string());
        }
    }

    pub(crate) fn set_settings_file(&mut self, path: &str) {
        if let Some(c) = self.edit() {
            c.settings_file = Some(path.to_string());
        }
    }

    pub(crate) fn set_working_directory(&mut self, path: &str) {
        if let Some(c) = self.edit() {
            c.working_directory = Some(path.to_string());
        }
    }

    pub(crate) fn set_remove_working_directory_trailing_character(&mut self) {
        if let Some(c) = self.edit() {
            c.remove_working_directory_trailing_character = true;
        }
    }

    pub(crate) fn set_window_style(&mut self, style: WindowStyle) {
        if let Some(c) = self.edit() {
            c.window_style = Some(style);
        }
    }

    pub(crate) fn set_input_format(&mut self, format: DataFormat) {
        if let Some(c) = self.edit() {
            c.input_format = format;
        }
    }

    pub(crate) fn set_output_format(&mut self, format: DataFormat) {
        if let Some(c) = self.edit() {
            c.output_format = format;
            c.output_format_explicit = true;
        }
    }

    /// Freeze the configuration.
    pub(crate) fn build(self) -> LaunchConfig {
        let mut config = self.config;
        if config.error.is_none() && config.remove_working_directory_trailing_character {
            if let Some(dir) = config.working_directory.as_mut() {
                dir.pop();
            }
        }
        config.exit_code = config
            .error
            .as_ref()
            .map_or(ExitCode::Success, Diagnostic::exit_code);
        config
    }
}
