use serde::{Deserialize, Serialize};

use crate::args::Platform;

/// Root configuration container for the `hostline` binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub platform: PlatformOverrides,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-field overrides applied on top of the detected platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOverrides {
    /// Treat the host as Windows (`/switch` syntax, `-WindowStyle`).
    #[serde(default)]
    pub windows: Option<bool>,
    /// Desktop threading model for `-STA`/`-MTA`.
    #[serde(default)]
    pub desktop_apartments: Option<bool>,
    /// Ceiling for `-CustomPipeName`. `0` removes the ceiling.
    #[serde(default)]
    pub max_pipe_name_length: Option<usize>,
}

impl PlatformOverrides {
    pub fn is_empty(&self) -> bool {
        self.windows.is_none()
            && self.desktop_apartments.is_none()
            && self.max_pipe_name_length.is_none()
    }

    /// Overlay the configured fields onto `base`.
    pub fn apply(&self, base: Platform) -> Platform {
        Platform {
            is_windows: self.windows.unwrap_or(base.is_windows),
            desktop_apartments: self.desktop_apartments.unwrap_or(base.desktop_apartments),
            max_pipe_name_length: match self.max_pipe_name_length {
                Some(0) => None,
                Some(max) => Some(max),
                None => base.max_pipe_name_length,
            },
        }
    }
}

/// Diagnostic logging of the resolver itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset (default: "warn").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
