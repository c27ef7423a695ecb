use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use hostline::args::{switch_registry, SwitchArity};
use hostline::config::Config;
use hostline::launch::ScriptTarget;
use hostline::{CommandLineResolver, LaunchConfig, Platform, StdinState};

const SHORT_USAGE: &str = "Usage: <host> [-File <path> [args]] [-Command { - | <text> [args] }] \
[-EncodedCommand <base64>] [-ConfigurationName <name>] [-CustomPipeName <name>] \
[-ExecutionPolicy <policy>] [-InputFormat {Text | XML}] [-OutputFormat {Text | XML}] \
[-Login] [-NoExit] [-NoLogo] [-NonInteractive] [-NoProfile] [-SettingsFile <path>] \
[-WorkingDirectory <dir>] [-Version] [-Help]";

#[derive(Parser, Debug)]
#[command(name = "hostline")]
#[command(version, about = "Resolve a shell host command line into a launch configuration")]
struct Cli {
    /// How `-Command -` decides whether standard input is redirected
    #[arg(long, value_enum, default_value_t = StdinArg::Detect)]
    stdin: StdinArg,

    /// Platform capabilities to resolve against
    #[arg(long, value_enum, default_value_t = PlatformArg::Detect)]
    platform: PlatformArg,

    /// Config file (default: <config dir>/hostline/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for the resolved configuration
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print the switches recognised on the selected platform and exit
    #[arg(long)]
    list_switches: bool,

    /// Host command line, given after `--`
    #[arg(last = true, allow_hyphen_values = true)]
    host_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StdinArg {
    Detect,
    Redirected,
    Terminal,
}

impl From<StdinArg> for StdinState {
    fn from(arg: StdinArg) -> Self {
        match arg {
            StdinArg::Detect => StdinState::Detect,
            StdinArg::Redirected => StdinState::Redirected,
            StdinArg::Terminal => StdinState::Terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    Detect,
    WindowsDesktop,
    WindowsCore,
    Unix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

/// An explicit `--platform` preset wins over the config file's overrides.
fn select_platform(arg: PlatformArg, config: &Config) -> Result<Platform> {
    let platform = match arg {
        PlatformArg::Detect => {
            if !config.platform.is_empty() {
                tracing::debug!(
                    overrides = ?config.platform,
                    "applying configured platform overrides"
                );
            }
            config
                .platform_for(Platform::current())
                .context("invalid platform overrides")?
        }
        PlatformArg::WindowsDesktop => Platform::windows_desktop(),
        PlatformArg::WindowsCore => Platform::windows_core(),
        PlatformArg::Unix => Platform::unix(),
    };
    Ok(platform)
}

fn print_switches(platform: &Platform) {
    for def in switch_registry().iter().filter(|d| d.is_available(platform)) {
        let value = match def.arity {
            SwitchArity::NoValue => "",
            SwitchArity::RequiresValue => "<value>",
            SwitchArity::ValueAndRest => "<value> [args...]",
        };
        println!("{:<42} {:<18} {}", def.display, value, def.description);
    }
}

fn summary(launch: &LaunchConfig) -> String {
    if let Some(diagnostic) = launch.error() {
        return format!(
            "error {} exit={}",
            diagnostic.classification(),
            launch.exit_code().code()
        );
    }
    if launch.show_extended_help() {
        return "help".to_string();
    }
    if launch.show_version() {
        return "version".to_string();
    }

    let target = match launch.script_target() {
        ScriptTarget::None if launch.explicit_stdin_read() => "stdin".to_string(),
        ScriptTarget::None => "none".to_string(),
        ScriptTarget::File { path } => format!("file:{}", path.display()),
        ScriptTarget::Command { encoded: true, .. } => "encoded-command".to_string(),
        ScriptTarget::Command { encoded: false, .. } => "command".to_string(),
    };
    format!(
        "ok transport={:?} target={} args={} no_exit={} banner={}",
        launch.transport(),
        target,
        launch.trailing_args().len(),
        launch.no_exit(),
        launch.show_banner()
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config =
        Config::load_from(&config_path).context("failed to load hostline configuration")?;

    hostline::logging::init_tracing(&config.logging.filter);
    tracing::debug!(
        path = %config_path.display(),
        found = config_path.exists(),
        "configuration loaded"
    );

    let platform = select_platform(cli.platform, &config)?;
    if cli.list_switches {
        print_switches(&platform);
        return Ok(());
    }

    let launch = CommandLineResolver::new(platform)
        .with_stdin(cli.stdin.into())
        .resolve_once(&cli.host_args)?;

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&launch)
                .context("failed to serialize launch configuration")?;
            println!("{json}");
        }
        OutputFormat::Summary => println!("{}", summary(&launch)),
    }

    if let Some(message) = launch.error_message() {
        eprintln!("{message}");
    }
    if launch.show_short_help() {
        eprintln!("{SHORT_USAGE}");
    }

    process::exit(launch.exit_code().code());
}
