//! Host capabilities the resolver is parameterised over.
//!
//! Platform-restricted switches consult these values at run time, so every
//! platform's behavior can be exercised from any build.

use std::io::IsTerminal;

/// Longest custom pipe name where pipes are Unix domain sockets: the 108-byte
/// `sun_path` minus the `/tmp/CoreFxPipe_` prefix and the terminating NUL.
pub const UNIX_MAX_PIPE_NAME_LENGTH: usize = 91;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Enables `/switch` syntax, `-WindowStyle` and
    /// `-RemoveWorkingDirectoryTrailingCharacter`.
    pub is_windows: bool,
    /// Desktop threading model, required by `-STA` and `-MTA`.
    pub desktop_apartments: bool,
    /// Ceiling for `-CustomPipeName`, `None` where the OS imposes none.
    pub max_pipe_name_length: Option<usize>,
}

impl Platform {
    /// Capabilities of the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::windows_desktop()
        } else {
            Self::unix()
        }
    }

    pub fn unix() -> Self {
        Self {
            is_windows: false,
            desktop_apartments: false,
            max_pipe_name_length: Some(UNIX_MAX_PIPE_NAME_LENGTH),
        }
    }

    pub fn windows_desktop() -> Self {
        Self {
            is_windows: true,
            desktop_apartments: true,
            max_pipe_name_length: None,
        }
    }

    /// Windows without the desktop threading model (Nano Server, IoT).
    pub fn windows_core() -> Self {
        Self {
            is_windows: true,
            desktop_apartments: false,
            max_pipe_name_length: None,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Whether standard input is redirected, or how to find out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdinState {
    /// Probe the real standard input when `-Command -` needs to know.
    #[default]
    Detect,
    Redirected,
    Terminal,
}

impl StdinState {
    pub fn is_redirected(&self) -> bool {
        match self {
            Self::Detect => !std::io::stdin().is_terminal(),
            Self::Redirected => true,
            Self::Terminal => false,
        }
    }
}
