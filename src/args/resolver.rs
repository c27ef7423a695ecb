//! The one-pass dispatcher.
//!
//! Tokens are read strictly left to right. A token is either a switch from
//! the registry (handled by [`handlers::dispatch`]) or a positional token,
//! which names the script file and ends the pass.

use crate::args::cursor::ArgCursor;
use crate::args::handlers::{self, Flow};
use crate::args::platform::{Platform, StdinState};
use crate::args::registry;
use crate::launch::{Diagnostic, LaunchConfig, LaunchConfigBuilder, ResolverError};

/// Turns a host argument vector into a [`LaunchConfig`].
///
/// A resolver handles exactly one argument vector. Calling
/// [`resolve`](Self::resolve) a second time is a programming error and
/// returns [`ResolverError::AlreadyResolved`].
#[derive(Debug, Clone)]
pub struct CommandLineResolver {
    platform: Platform,
    stdin: StdinState,
    used: bool,
}

impl CommandLineResolver {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            stdin: StdinState::default(),
            used: false,
        }
    }

    /// Override how `-Command -` learns whether standard input is redirected.
    pub fn with_stdin(mut self, stdin: StdinState) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn resolve(&mut self, args: &[String]) -> Result<LaunchConfig, ResolverError> {
        if self.used {
            return Err(ResolverError::AlreadyResolved);
        }
        self.used = true;
        Ok(self.run(args))
    }

    /// Consuming variant of [`resolve`](Self::resolve); the resolver cannot
    /// be touched afterwards.
    pub fn resolve_once(mut self, args: &[String]) -> Result<LaunchConfig, ResolverError> {
        self.resolve(args)
    }

    fn run(&self, args: &[String]) -> LaunchConfig {
        let mut builder = LaunchConfigBuilder::new();
        let mut cursor = ArgCursor::new(args);

        while let Some(token) = cursor.next() {
            let flow = match registry::lookup(token, &self.platform) {
                Some(def) => {
                    tracing::debug!(switch = def.display, token, "matched switch");
                    handlers::dispatch(
                        def.switch,
                        token,
                        &mut cursor,
                        &mut builder,
                        &self.platform,
                        self.stdin,
                    )
                }
                None => self.positional(token, &mut cursor, &mut builder),
            };
            if flow == Flow::Stop || builder.has_error() {
                break;
            }
        }

        tracing::trace!(
            consumed = cursor.consumed(),
            total = args.len(),
            "command line pass finished"
        );
        builder.build()
    }

    fn positional(
        &self,
        token: &str,
        cursor: &mut ArgCursor<'_>,
        builder: &mut LaunchConfigBuilder,
    ) -> Flow {
        if builder.has_script_target() {
            builder.fail(Diagnostic::ConflictingScriptTarget {
                token: token.to_string(),
            });
            return Flow::Stop;
        }
        if token == "-" {
            builder.read_commands_from_stdin(false);
            return Flow::Continue;
        }

        let looks_like_switch = registry::switch_key(token, &self.platform).is_some();
        handlers::script_file(token, cursor, builder, |resolved| {
            if looks_like_switch {
                Diagnostic::UnrecognizedSwitch {
                    token: token.to_string(),
                    suggestions: registry::suggest(token, &self.platform),
                }
            } else {
                Diagnostic::ArgumentFileDoesNotExist {
                    token: token.to_string(),
                    resolved,
                }
            }
        })
    }
}

impl Default for CommandLineResolver {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}
