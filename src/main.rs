// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use subdetect::app_config::{self, Config};
use subdetect::app_controller::{Controller, OutputFormat, RunStatus};
use subdetect::errors::{AppError, DetectionError};

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
    /// Generate shell completions for subdetect
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subdetect - detect the language of subtitle tracks
///
/// Reads container metadata when it carries a language tag, otherwise samples
/// text subtitles or runs OCR on image subtitles and identifies the language.
#[derive(Parser, Debug)]
#[command(name = "subdetect")]
#[command(version)]
#[command(about = "Detect subtitle languages in media files or subtitle files")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subdetect identifies the language of subtitle tracks inside media containers
or of standalone subtitle files.

EXAMPLES:
    subdetect movie.mkv                 # All subtitle streams of a container
    subdetect -t 3 movie.mkv            # Only stream #3
    subdetect episode.srt               # A standalone subtitle file
    subdetect --json movie.mkv          # Machine readable output
    subdetect completions bash > subdetect.bash

REQUIREMENTS:
    ffprobe and ffmpeg for media inspection and extraction,
    tesseract for image-based subtitles (PGS, VobSub).

CONFIGURATION:
    Optional JSON configuration is read from --config, ./subdetect.json or
    <config dir>/subdetect/config.json, in that order.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Media file or subtitle file path
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specific subtitle track index to analyze (for media files only)
    #[arg(short, long)]
    track: Option<usize>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker for log level
    fn marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✗",
            Level::Warn => "!",
            Level::Info => "·",
            Level::Debug => "»",
            Level::Trace => "…",
        }
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                Self::marker_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Warn until the configuration says otherwise
    if CustomLogger::init(LevelFilter::Warn).is_err() {
        eprintln!("Error: failed to initialize logger");
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subdetect", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(file) = cli.file.clone() else {
        eprintln!("Error: FILE is required");
        return ExitCode::FAILURE;
    };

    // Missing input is reported before any configuration or pipeline work
    if !file.exists() {
        eprintln!("Error: File '{}' does not exist", file.display());
        return ExitCode::FAILURE;
    }

    match run_detect(cli, file).await {
        Ok(RunStatus::Detected) => ExitCode::SUCCESS,
        // The report already carries the "no tracks" message
        Ok(RunStatus::NoTracks) => ExitCode::FAILURE,
        Err(AppError::Detection(DetectionError::InputNotFound(path))) => {
            eprintln!("Error: File '{}' does not exist", path.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_detect(options: CommandLineOptions, file: PathBuf) -> Result<RunStatus, AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load(options.config.as_deref())
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    let format = if options.json { OutputFormat::Json } else { OutputFormat::Text };

    controller.run(&file, options.track, format).await
}
