// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::{Controller, FileKind};
use crate::file_utils::FileManager;

mod app_config;
mod app_controller;
mod catalog;
mod diagnostics;
mod errors;
mod file_utils;
mod normalize;
mod quotes;
mod rules;
mod scenario;

/// CLI Wrapper for FileKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFileKind {
    Scenario,
    Translation,
}

impl From<CliFileKind> for FileKind {
    fn from(cli_kind: CliFileKind) -> Self {
        match cli_kind {
            CliFileKind::Scenario => FileKind::Scenario,
            CliFileKind::Translation => FileKind::Translation,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint scenario scripts and translation catalogs (default command)
    #[command(alias = "check")]
    Lint(LintArgs),

    /// Generate shell completions for kslint
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct LintArgs {
    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Report issues without writing fixed files back
    #[arg(short = 'n', long)]
    check: bool,

    /// Treat every input file as this kind instead of using the extension
    #[arg(short, long, value_enum)]
    kind: Option<CliFileKind>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// kslint - scenario and catalog linter
///
/// Normalizes French typography and reports style issues in KiriKiri-style
/// scenario scripts and gettext-style translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "kslint")]
#[command(version = "1.0.0")]
#[command(about = "Typography fixer and style linter for game-script localization")]
#[command(long_about = "kslint normalizes French typography (non-breaking spaces, ellipses,
apostrophes, quotes, paragraph indents) and reports style issues in
scenario scripts and translation catalogs.

EXAMPLES:
    kslint scenario/                     # Lint a whole directory
    kslint prologue.ks                   # Lint a single scenario file
    kslint -n fr.po                      # Report issues without rewriting
    kslint -k translation strings.txt    # Force the catalog pass
    kslint --log-level debug scenario/   # Verbose run
    kslint completions bash > kslint.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Report issues without writing fixed files back
    #[arg(short = 'n', long)]
    check: bool,

    /// Treat every input file as this kind instead of using the extension
    #[arg(short, long, value_enum)]
    kind: Option<CliFileKind>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "kslint", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Lint(args)) => run_lint(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let lint_args = LintArgs {
                input_path,
                check: cli.check,
                kind: cli.kind,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_lint(lint_args)
        }
    }
}

fn run_lint(options: LintArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if FileManager::file_exists(config_path) {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if options.check {
        config.check_only = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create controller and run it over the input path
    let controller =
        Controller::with_config(config).with_kind_override(options.kind.map(Into::into));
    controller.run(&options.input_path)?;

    Ok(())
}
