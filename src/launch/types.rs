//! Value types carried by a [`LaunchConfig`](super::LaunchConfig).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// The single channel a session will be carried over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Regular interactive console host.
    #[default]
    Console,
    /// Remoting server over a socket (`-SocketServerMode`).
    SocketServer,
    /// Remoting server over a named pipe (`-NamedPipeServerMode`).
    NamedPipeServer,
    /// Remoting server as an SSH subsystem (`-SSHServerMode`).
    SshServer,
    /// Remoting server over stdio (`-ServerMode`).
    Server,
}

impl Transport {
    /// Switch name that selects this transport, for messages.
    pub fn switch_name(&self) -> &'static str {
        match self {
            Self::Console => "-Interactive",
            Self::SocketServer => "-SocketServerMode",
            Self::NamedPipeServer => "-NamedPipeServerMode",
            Self::SshServer => "-SSHServerMode",
            Self::Server => "-ServerMode",
        }
    }
}

/// The chosen source of code to run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptTarget {
    #[default]
    None,
    /// A script file, already normalised to an absolute path.
    File { path: PathBuf },
    /// A literal command body, possibly decoded from `-EncodedCommand`.
    Command { text: String, encoded: bool },
}

impl ScriptTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A token passed through to the script target verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailingArg {
    pub value: String,
    /// `false` when the script binder should treat the token as a parameter name.
    pub literal: bool,
}

impl TrailingArg {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            literal: true,
        }
    }

    /// Dash-prefixed tokens are parameter names, everything else is a value.
    pub fn from_file_token(token: &str) -> Self {
        let is_parameter = token.len() > 1 && token.starts_with('-');
        Self {
            value: token.to_string(),
            literal: !is_parameter,
        }
    }
}

/// Serialization format for the host's pipeline input/output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DataFormat {
    #[default]
    Text,
    #[serde(rename = "XML")]
    Xml,
}

impl DataFormat {
    pub const NAMES: &'static str = "Text, XML";
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Xml => f.write_str("XML"),
        }
    }
}

impl FromStr for DataFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "xml" => Ok(Self::Xml),
            _ => Err(()),
        }
    }
}

/// Threading apartment the host's main thread runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApartmentState {
    Sta,
    Mta,
}

/// Initial window state for desktop hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowStyle {
    Normal,
    Hidden,
    Minimized,
    Maximized,
}

impl WindowStyle {
    const ALL: [WindowStyle; 4] = [
        Self::Normal,
        Self::Hidden,
        Self::Minimized,
        Self::Maximized,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Hidden => "Hidden",
            Self::Minimized => "Minimized",
            Self::Maximized => "Maximized",
        }
    }
}

/// Conversion failure for `-WindowStyle`; its text is embedded in the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Cannot convert value \"{value}\" to type \"WindowStyle\". Unable to match the identifier \
     name {value} to a valid enumerator name. Specify one of the following enumerator names and \
     try again: Normal, Hidden, Minimized, Maximized"
)]
pub struct WindowStyleParseError {
    value: String,
}

impl FromStr for WindowStyle {
    type Err = WindowStyleParseError;

    /// Accepts enumerator names (any case) or their ordinal values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<usize>() {
            if let Some(style) = Self::ALL.get(ordinal) {
                return Ok(*style);
            }
        }
        Self::ALL
            .iter()
            .find(|style| style.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| WindowStyleParseError {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_format_parses_case_insensitively() {
        assert_eq!("xml".parse::<DataFormat>(), Ok(DataFormat::Xml));
        assert_eq!("TEXT".parse::<DataFormat>(), Ok(DataFormat::Text));
        assert!("json".parse::<DataFormat>().is_err());
        assert_eq!(DataFormat::Xml.to_string(), "XML");
    }

    #[test]
    fn window_style_accepts_names_and_ordinals() {
        assert_eq!("maximized".parse::<WindowStyle>(), Ok(WindowStyle::Maximized));
        assert_eq!("1".parse::<WindowStyle>(), Ok(WindowStyle::Hidden));
        let err = "abbra".parse::<WindowStyle>().unwrap_err();
        assert!(err.to_string().contains("\"abbra\""));
        assert!("7".parse::<WindowStyle>().is_err());
    }

    #[test]
    fn file_tokens_split_parameters_from_values() {
        assert!(!TrailingArg::from_file_token("-Name").literal);
        assert!(TrailingArg::from_file_token("value").literal);
        assert!(TrailingArg::from_file_token("-").literal);
    }
}
