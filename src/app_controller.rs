use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::language_utils::SupportedLanguage;
use crate::providers::Provider;
use crate::translation::Translator;

// @module: Terminal front-end around the translator

/// Warning shown for blank input
pub const EMPTY_INPUT_WARNING: &str = "⚠️  Please enter some text.";

/// Warning shown for a line that is not valid UTF-8
pub const INVALID_INPUT_WARNING: &str = "⚠️  Input is not valid UTF-8 text, line ignored.";

/// Title printed when an interactive session starts
pub const TITLE: &str = "🌐 TransLingua - AI Powered Language Translator";

const HELP: &str = "Type text and press Enter to translate it.
Commands:
  :from <language>   set the source language
  :to <language>     set the target language
  :swap              swap source and target
  :languages         list supported languages
  :model             show the model in use
  :help              show this help
  :quit              leave the session
Start a line with :: to translate text that begins with a colon.";

/// A line entered in the interactive session
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Plain text to translate
    Translate(String),
    /// Show or set the source language
    From(Option<SupportedLanguage>),
    /// Show or set the target language
    To(Option<SupportedLanguage>),
    Swap,
    Languages,
    Model,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line
    ///
    /// A `:` followed by a word is a command; `::` escapes a literal colon.
    /// Everything else, including a blank line or `:)`, is text to translate.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Ok(Self::Translate(line.to_string()));
        };
        if command.starts_with(':') {
            return Ok(Self::Translate(command.to_string()));
        }

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        let is_word = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic());
        if !is_word && name != "?" {
            return Ok(Self::Translate(line.to_string()));
        }
        let language = |argument: &str| -> Result<Option<SupportedLanguage>> {
            if argument.is_empty() {
                Ok(None)
            } else {
                argument.parse().map(Some)
            }
        };

        match name.to_lowercase().as_str() {
            "from" | "source" => Ok(Self::From(language(argument)?)),
            "to" | "target" => Ok(Self::To(language(argument)?)),
            "swap" => Ok(Self::Swap),
            "languages" | "langs" => Ok(Self::Languages),
            "model" => Ok(Self::Model),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            _ => Err(anyhow!("Unknown command ':{}'. Type :help for the list of commands.", name)),
        }
    }
}

/// Main application controller for text translation
pub struct Controller<P: Provider> {
    // @field: Initialized model client, read-only after startup
    provider: P,
    // @field: Name of the selected model
    model_name: String,
    // @field: Current source language
    source_language: SupportedLanguage,
    // @field: Current target language
    target_language: SupportedLanguage,
}

impl<P: Provider> Controller<P> {
    // @method: Create a new controller with the given client and configuration
    pub fn new(provider: P, model_name: impl Into<String>, config: &Config) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
            source_language: config.source_language,
            target_language: config.target_language,
        }
    }

    /// Name of the model in use
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Current `(source, target)` pair
    pub fn languages(&self) -> (SupportedLanguage, SupportedLanguage) {
        (self.source_language, self.target_language)
    }

    /// Set the source language
    pub fn set_source_language(&mut self, language: SupportedLanguage) {
        self.source_language = language;
    }

    /// Set the target language
    pub fn set_target_language(&mut self, language: SupportedLanguage) {
        self.target_language = language;
    }

    /// Translate user input with the current language pair
    ///
    /// Returns `Ok(None)` without contacting the model when the input is
    /// blank. The untrimmed text is what gets translated.
    pub async fn translate_input(&self, text: &str) -> Result<Option<String>, TranslationError> {
        if text.trim().is_empty() {
            debug!("Blank input, no request sent");
            return Ok(None);
        }

        let spinner = busy_indicator("Translating...");
        let result = Translator::new(&self.provider)
            .translate(
                text,
                self.source_language.display_name(),
                self.target_language.display_name(),
            )
            .await;
        spinner.finish_and_clear();

        result.map(Some)
    }

    /// Translate once and print the bare result to `output`
    ///
    /// Blank input prints the warning to `diagnostics` and succeeds; a client
    /// failure is returned to the caller.
    pub async fn run_once<W: Write, D: Write>(&self, text: &str, output: &mut W, diagnostics: &mut D) -> Result<()> {
        match self.translate_input(text).await? {
            Some(translated) => {
                writeln!(output, "{}", translated)?;
                output.flush()?;
            }
            None => writeln!(diagnostics, "{}", EMPTY_INPUT_WARNING)?,
        }
        Ok(())
    }

    /// Run the interactive session until `:quit` or end of input
    pub async fn run_session<R, W>(&mut self, mut input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(output, "{}", TITLE)?;
        writeln!(output, "Using model: {}", self.model_name)?;
        writeln!(output, "Type :help for commands.")?;
        self.write_pair(output)?;

        let mut buffer = Vec::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer).await? == 0 {
                writeln!(output)?;
                break;
            }
            let line = match std::str::from_utf8(&buffer) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    debug!("Rejected input line: {}", e);
                    writeln!(output, "{}", INVALID_INPUT_WARNING)?;
                    continue;
                }
            };

            let command = match ShellCommand::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            if !self.handle_command(command, output).await? {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Execute one command; returns `false` when the session should end
    async fn handle_command<W: Write>(&mut self, command: ShellCommand, output: &mut W) -> Result<bool> {
        match command {
            ShellCommand::Translate(text) => match self.translate_input(&text).await {
                Ok(Some(translated)) => {
                    writeln!(output, "📘 Translated Text")?;
                    writeln!(output, "{}", translated)?;
                }
                Ok(None) => writeln!(output, "{}", EMPTY_INPUT_WARNING)?,
                Err(e) => writeln!(output, "❌ Translation failed: {}", e)?,
            },
            ShellCommand::From(Some(language)) => {
                self.set_source_language(language);
                self.write_pair(output)?;
            }
            ShellCommand::To(Some(language)) => {
                self.set_target_language(language);
                self.write_pair(output)?;
            }
            ShellCommand::From(None) | ShellCommand::To(None) => self.write_pair(output)?,
            ShellCommand::Swap => {
                std::mem::swap(&mut self.source_language, &mut self.target_language);
                self.write_pair(output)?;
            }
            ShellCommand::Languages => {
                for language in SupportedLanguage::ALL {
                    writeln!(output, "  {}", language)?;
                }
            }
            ShellCommand::Model => writeln!(output, "Using model: {}", self.model_name)?,
            ShellCommand::Help => writeln!(output, "{}", HELP)?,
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn write_pair<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "🌍 {} -> 🌐 {}", self.source_language, self.target_language)?;
        Ok(())
    }
}

/// Spinner shown on stderr while a request is in flight
fn busy_indicator(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
