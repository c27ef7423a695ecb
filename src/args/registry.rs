//! Switch registry: the single source of truth for recognised switches.
//!
//! Switches are matched case-insensitively. A key matches a switch when it is
//! a prefix of the canonical name at least `min_prefix` characters long, or
//! when it equals one of the switch's fixed aliases. The table is laid out so
//! that no key can match two switches (see the tests at the bottom).

use crate::args::platform::Platform;

/// Behavior selected by a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    Help,
    Version,
    Login,
    NoExit,
    NoProfile,
    NoLogo,
    NonInteractive,
    Interactive,
    SocketServerMode,
    NamedPipeServerMode,
    SshServerMode,
    ServerMode,
    ConfigurationName,
    CustomPipeName,
    WindowStyle,
    OutputFormat,
    InputFormat,
    ExecutionPolicy,
    EncodedCommand,
    Command,
    EncodedArguments,
    SettingsFile,
    Sta,
    Mta,
    WorkingDirectory,
    RemoveWorkingDirectoryTrailingCharacter,
    File,
}

/// How many tokens a switch consumes after itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchArity {
    /// Boolean switch (e.g. `-NoProfile`).
    NoValue,
    /// Exactly one value (e.g. `-ConfigurationName <name>`).
    RequiresValue,
    /// A value and then every remaining token (`-Command`, `-File`).
    ValueAndRest,
}

/// Platforms on which a switch is recognised at all.
///
/// Switches that exist everywhere but only work on some platforms (`-STA`,
/// `-WindowStyle`) stay `Everywhere` and report "not implemented" instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Everywhere,
    WindowsOnly,
}

/// A single switch definition.
#[derive(Debug, Clone)]
pub struct SwitchDef {
    pub switch: Switch,
    /// Canonical lowercase name without the leading dash.
    pub name: &'static str,
    /// Name as shown to users.
    pub display: &'static str,
    /// Shortest accepted abbreviation of `name`.
    pub min_prefix: usize,
    /// Extra exact spellings that are not prefixes of `name`.
    pub aliases: &'static [&'static str],
    pub arity: SwitchArity,
    pub availability: Availability,
    pub description: &'static str,
}

impl SwitchDef {
    /// Check if this definition matches an already lowercased switch key.
    pub fn matches(&self, key: &str) -> bool {
        (key.len() >= self.min_prefix && self.name.starts_with(key)) || self.aliases.contains(&key)
    }

    pub fn is_available(&self, platform: &Platform) -> bool {
        match self.availability {
            Availability::Everywhere => true,
            Availability::WindowsOnly => platform.is_windows,
        }
    }
}

static SWITCHES: &[SwitchDef] = &[
    // === Informational ===
    SwitchDef {
        switch: Switch::Help,
        name: "help",
        display: "-Help",
        min_prefix: 1,
        aliases: &["?"],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Show usage and exit",
    },
    SwitchDef {
        switch: Switch::Version,
        name: "version",
        display: "-Version",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Show version and exit",
    },
    SwitchDef {
        switch: Switch::Login,
        name: "login",
        display: "-Login",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Start as a login shell",
    },
    // === Session behavior ===
    SwitchDef {
        switch: Switch::NoExit,
        name: "noexit",
        display: "-NoExit",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Keep running after the startup command",
    },
    SwitchDef {
        switch: Switch::NoProfile,
        name: "noprofile",
        display: "-NoProfile",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Skip profile scripts",
    },
    SwitchDef {
        switch: Switch::NoLogo,
        name: "nologo",
        display: "-NoLogo",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Hide the startup banner",
    },
    SwitchDef {
        switch: Switch::NonInteractive,
        name: "noninteractive",
        display: "-NonInteractive",
        min_prefix: 4,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Never prompt the user",
    },
    SwitchDef {
        switch: Switch::Interactive,
        name: "interactive",
        display: "-Interactive",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Present an interactive prompt",
    },
    // === Transports ===
    SwitchDef {
        switch: Switch::SocketServerMode,
        name: "socketservermode",
        display: "-SocketServerMode",
        min_prefix: 2,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Serve a remoting session over a socket",
    },
    SwitchDef {
        switch: Switch::NamedPipeServerMode,
        name: "namedpipeservermode",
        display: "-NamedPipeServerMode",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Serve a remoting session over a named pipe",
    },
    SwitchDef {
        switch: Switch::SshServerMode,
        name: "sshservermode",
        display: "-SSHServerMode",
        min_prefix: 4,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Serve a remoting session as an SSH subsystem",
    },
    SwitchDef {
        switch: Switch::ServerMode,
        name: "servermode",
        display: "-ServerMode",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Serve a remoting session over stdio",
    },
    // === Session parameters ===
    SwitchDef {
        switch: Switch::ConfigurationName,
        name: "configurationname",
        display: "-ConfigurationName",
        min_prefix: 6,
        aliases: &[],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Endpoint configuration to run under",
    },
    SwitchDef {
        switch: Switch::CustomPipeName,
        name: "custompipename",
        display: "-CustomPipeName",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Name of the debugging pipe",
    },
    SwitchDef {
        switch: Switch::WindowStyle,
        name: "windowstyle",
        display: "-WindowStyle",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Initial window state",
    },
    SwitchDef {
        switch: Switch::OutputFormat,
        name: "outputformat",
        display: "-OutputFormat",
        min_prefix: 1,
        aliases: &["of"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Output format: Text or XML",
    },
    SwitchDef {
        switch: Switch::InputFormat,
        name: "inputformat",
        display: "-InputFormat",
        min_prefix: 3,
        aliases: &["if"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Input format: Text or XML",
    },
    SwitchDef {
        switch: Switch::ExecutionPolicy,
        name: "executionpolicy",
        display: "-ExecutionPolicy",
        min_prefix: 2,
        aliases: &["ep"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Execution policy for the session",
    },
    // === Script targets ===
    SwitchDef {
        switch: Switch::EncodedCommand,
        name: "encodedcommand",
        display: "-EncodedCommand",
        min_prefix: 1,
        aliases: &["ec"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Base64-encoded UTF-16 command",
    },
    SwitchDef {
        switch: Switch::Command,
        name: "command",
        display: "-Command",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::ValueAndRest,
        availability: Availability::Everywhere,
        description: "Command text, or '-' to read standard input",
    },
    SwitchDef {
        switch: Switch::EncodedArguments,
        name: "encodedarguments",
        display: "-EncodedArguments",
        min_prefix: 8,
        aliases: &["ea"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Base64-encoded serialized argument list",
    },
    SwitchDef {
        switch: Switch::File,
        name: "file",
        display: "-File",
        min_prefix: 1,
        aliases: &[],
        arity: SwitchArity::ValueAndRest,
        availability: Availability::Everywhere,
        description: "Script file, or '-' to read standard input",
    },
    // === Host environment ===
    SwitchDef {
        switch: Switch::SettingsFile,
        name: "settingsfile",
        display: "-SettingsFile",
        min_prefix: 8,
        aliases: &[],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Settings file overriding the defaults",
    },
    SwitchDef {
        switch: Switch::Sta,
        name: "sta",
        display: "-STA",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Single-threaded apartment",
    },
    SwitchDef {
        switch: Switch::Mta,
        name: "mta",
        display: "-MTA",
        min_prefix: 3,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::Everywhere,
        description: "Multi-threaded apartment",
    },
    SwitchDef {
        switch: Switch::WorkingDirectory,
        name: "workingdirectory",
        display: "-WorkingDirectory",
        min_prefix: 2,
        aliases: &["wd"],
        arity: SwitchArity::RequiresValue,
        availability: Availability::Everywhere,
        description: "Initial working directory",
    },
    SwitchDef {
        switch: Switch::RemoveWorkingDirectoryTrailingCharacter,
        name: "removeworkingdirectorytrailingcharacter",
        display: "-RemoveWorkingDirectoryTrailingCharacter",
        min_prefix: 39,
        aliases: &[],
        arity: SwitchArity::NoValue,
        availability: Availability::WindowsOnly,
        description: "Drop the last character of -WorkingDirectory",
    },
];

/// The complete switch table.
pub fn switch_registry() -> &'static [SwitchDef] {
    SWITCHES
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}' | '\u{2015}')
}

/// Extract the lowercased switch key from a token, or `None` for non-switch tokens.
///
/// Accepts one leading dash (ASCII or typographic), an optional second dash,
/// and `/` on Windows.
pub fn switch_key(token: &str, platform: &Platform) -> Option<String> {
    let mut chars = token.chars();
    let first = chars.next()?;
    let mut rest = chars.as_str();

    if is_dash(first) {
        if let Some(second) = rest.chars().next().filter(|c| is_dash(*c)) {
            rest = &rest[second.len_utf8()..];
        }
    } else if !(first == '/' && platform.is_windows) {
        return None;
    }

    if rest.is_empty() {
        return None;
    }
    Some(rest.to_lowercase())
}

/// Find the switch a token selects on this platform.
pub fn lookup(token: &str, platform: &Platform) -> Option<&'static SwitchDef> {
    let key = switch_key(token, platform)?;
    switch_registry()
        .iter()
        .filter(|d| d.is_available(platform))
        .find(|d| d.matches(&key))
}

/// Canonical names resembling an unrecognised switch token.
pub fn suggest(token: &str, platform: &Platform) -> Vec<String> {
    let Some(key) = switch_key(token, platform) else {
        return Vec::new();
    };
    if key.chars().count() < 2 {
        return Vec::new();
    }
    switch_registry()
        .iter()
        .filter(|d| d.is_available(platform))
        .filter(|d| d.name.contains(key.as_str()))
        .map(|d| d.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(token: &str) -> Option<Switch> {
        lookup(token, &Platform::windows_desktop()).map(|d| d.switch)
    }

    #[test]
    fn no_key_matches_two_switches() {
        let platform = Platform::windows_desktop();
        let live: Vec<&SwitchDef> = switch_registry()
            .iter()
            .filter(|d| d.is_available(&platform))
            .collect();

        let mut keys: Vec<String> = Vec::new();
        for d in &live {
            for len in d.min_prefix..=d.name.len() {
                keys.push(d.name[..len].to_string());
            }
            keys.extend(d.aliases.iter().map(|a| a.to_string()));
        }

        for key in keys {
            let hits: Vec<&str> = live
                .iter()
                .filter(|d| d.matches(&key))
                .map(|d| d.name)
                .collect();
            assert_eq!(hits.len(), 1, "key '{}' matches {:?}", key, hits);
        }
    }

    #[test]
    fn documented_abbreviations_resolve() {
        let cases = [
            ("-h", Switch::Help),
            ("-?", Switch::Help),
            ("-V", Switch::Version),
            ("-l", Switch::Login),
            ("-noe", Switch::NoExit),
            ("-nop", Switch::NoProfile),
            ("-nol", Switch::NoLogo),
            ("-noni", Switch::NonInteractive),
            ("-i", Switch::Interactive),
            ("-so", Switch::SocketServerMode),
            ("-s", Switch::ServerMode),
            ("-nam", Switch::NamedPipeServerMode),
            ("-sshs", Switch::SshServerMode),
            ("-config", Switch::ConfigurationName),
            ("-cus", Switch::CustomPipeName),
            ("-c", Switch::Command),
            ("-w", Switch::WindowStyle),
            ("-o", Switch::OutputFormat),
            ("-of", Switch::OutputFormat),
            ("-inp", Switch::InputFormat),
            ("-if", Switch::InputFormat),
            ("-ex", Switch::ExecutionPolicy),
            ("-ep", Switch::ExecutionPolicy),
            ("-e", Switch::EncodedCommand),
            ("-ec", Switch::EncodedCommand),
            ("-encodeda", Switch::EncodedArguments),
            ("-ea", Switch::EncodedArguments),
            ("-settings", Switch::SettingsFile),
            ("-sta", Switch::Sta),
            ("-mta", Switch::Mta),
            ("-wo", Switch::WorkingDirectory),
            ("-wd", Switch::WorkingDirectory),
            ("-f", Switch::File),
        ];
        for (token, expected) in cases {
            assert_eq!(find(token), Some(expected), "token {}", token);
        }
    }

    #[test]
    fn too_short_prefixes_do_not_match() {
        assert_eq!(find("-no"), None);
        assert_eq!(find("-non"), None);
        assert_eq!(find("-conf"), None);
        assert_eq!(find("-settin"), None);
        assert_eq!(find("-prof"), None);
    }

    #[test]
    fn dash_variants_and_slash() {
        let unix = Platform::unix();
        assert_eq!(switch_key("--Help", &unix).as_deref(), Some("help"));
        assert_eq!(switch_key("\u{2014}NoLogo", &unix).as_deref(), Some("nologo"));
        assert_eq!(switch_key("/help", &unix), None);
        assert_eq!(
            switch_key("/help", &Platform::windows_desktop()).as_deref(),
            Some("help")
        );
        assert_eq!(switch_key("-", &unix), None);
        assert_eq!(switch_key("--", &unix), None);
        assert_eq!(switch_key("script.ps1", &unix), None);
    }

    #[test]
    fn windows_only_switches_are_unknown_elsewhere() {
        let token = "-removeworkingdirectorytrailingcharacter";
        assert!(lookup(token, &Platform::unix()).is_none());
        assert!(lookup(token, &Platform::windows_desktop()).is_some());
    }

    #[test]
    fn suggestions_contain_the_key() {
        let unix = Platform::unix();
        assert_eq!(suggest("-prof", &unix), vec!["noprofile".to_string()]);
        assert!(suggest("-x", &unix).is_empty());
        assert!(suggest("-zzz", &unix).is_empty());
    }
}
