// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, warn};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use translingua::app_config::{self, Config};
use translingua::model_discovery::resolve_model;
use translingua::providers::ModelCatalog;
use translingua::providers::gemini::Gemini;
use translingua::{Controller, SupportedLanguage};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Start an interactive translation session (default command)
    Interactive,

    /// Translate text given as arguments, or read from stdin
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },

    /// List the supported languages
    Languages,

    /// List the models available for the API key
    Models,

    /// Generate shell completions for translingua
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// TransLingua - AI Powered Language Translator
///
/// Translates text between a fixed set of languages using a hosted
/// generative model.
#[derive(Parser, Debug)]
#[command(name = "translingua")]
#[command(version)]
#[command(about = "AI-powered text translator")]
#[command(long_about = "TransLingua sends text to a Gemini model and prints the translation.

EXAMPLES:
    translingua                                   # Interactive session
    translingua -s english -t tamil               # Interactive, with a language pair
    translingua translate -t es Good morning      # One-shot translation
    echo 'Hello' | translingua translate -t fr    # Translate stdin
    translingua languages                         # List supported languages
    translingua models                            # List models for the API key
    translingua completions bash > translingua.bash

CONFIGURATION:
    The API key is read from GEMINI_API_KEY (a .env file in the working
    directory is loaded first). Optional settings are read from
    translingua.json or the file given with --config-path (or
    TRANSLINGUA_CONFIG). TRANSLINGUA_MODEL sets the model like --model.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source language (name or ISO code, e.g. 'English', 'en')
    #[arg(short, long, global = true)]
    source_language: Option<SupportedLanguage>,

    /// Target language (name or ISO code, e.g. 'Tamil', 'ta')
    #[arg(short, long, global = true)]
    target_language: Option<SupportedLanguage>,

    /// Model to use instead of automatic selection
    #[arg(short, long, env = "TRANSLINGUA_MODEL", global = true)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "TRANSLINGUA_CONFIG", default_value = "translingua.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Colour and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
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
            let (colour, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Warn by default; raised once the configuration is known
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "translingua", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            let mut stdout = std::io::stdout();
            for language in SupportedLanguage::ALL {
                writeln!(stdout, "{}", language)?;
            }
            Ok(())
        }
        _ => run(cli).await,
    }
}

/// Load the configuration file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if !cli.config_path.exists() {
        debug!("No config file at {:?}, using defaults", cli.config_path);
    }
    let mut config = Config::load_or_default(&cli.config_path)?;

    if let Some(source) = cli.source_language {
        config.source_language = source;
    }
    if let Some(target) = cli.target_language {
        config.target_language = target;
    }
    if let Some(model) = &cli.model {
        config.model = Some(model.clone());
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    let config = load_config(&cli)?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    // Startup: credential, then model selection. Either failing ends the process.
    if dotenv::dotenv().is_err() {
        debug!("No .env file loaded");
    }
    let api_key = config.api_key()?;
    let gemini = Gemini::new(api_key, &config.endpoint, &config.api_version);

    if let Some(Commands::Models) = cli.command {
        return list_models(&gemini).await;
    }

    let model = resolve_model(config.model.as_deref(), &gemini).await?;
    let mut controller = Controller::new(gemini.model(&model), model, &config);

    let mut stdout = std::io::stdout();
    match cli.command {
        Some(Commands::Translate { text }) => {
            let text = if text.is_empty() {
                let mut buffer = String::new();
                tokio::io::stdin().read_to_string(&mut buffer).await
                    .context("Failed to read text from stdin")?;
                buffer
            } else {
                text.join(" ")
            };
            controller.run_once(&text, &mut stdout, &mut std::io::stderr()).await
        }
        _ => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            controller.run_session(input, &mut stdout).await
        }
    }
}

/// Print every model, marking the ones usable for translation
async fn list_models(gemini: &Gemini) -> Result<()> {
    let models = gemini.list_models().await
        .context("Failed to list available models")?;
    if models.is_empty() {
        warn!("The API returned no models for this key");
    }

    let mut stdout = std::io::stdout();
    for model in &models {
        let marker = if model.supports_generation() { "*" } else { " " };
        let display = model.display_name.as_deref().unwrap_or("");
        writeln!(stdout, "{} {:<48} {}", marker, model.name, display)?;
    }
    writeln!(stdout, "\n* supports generateContent")?;
    Ok(())
}
