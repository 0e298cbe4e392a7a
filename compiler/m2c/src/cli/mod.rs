//! Command-line handling.
//!
//! Arguments are matched by hand: a handful of switches mapped onto
//! [`ParseOptions`], then a list of files.

use std::path::PathBuf;

use m2c_diagnostic::emitter::ColorMode;
use m2c_diagnostic::Severity;
use m2c_lexer::LexerOptions;
use m2c_parse::{ParseOptions, RecordGrammar, SourceKind};

pub const USAGE: &str = "\
Usage: m2c [options] <file>...

Options:
  --def                    Accept only definition modules
  --mod                    Accept only implementation and program modules
  --dollar-ids             Allow '$' inside identifiers
  --lowline-ids            Allow '_' inside identifiers
  --preserve-comments      Keep comments as trivia
  --errant-semicolon=<s>   Severity of a ';' before a closing symbol: warn, error
  --extensible-records     Use extensible record syntax instead of variant records
  --max-nesting=<n>        Deepest allowed nesting (default: 256)
  --color=<when>           auto, always, never
  --tokens                 Print the symbol stream instead of parsing
  --ast                    Print the syntax tree of each file
  -v, --verbose            Echo source lines under diagnostics, print statistics
  -h, --help               Show this message";

/// What the driver does with each file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Syntax check and report diagnostics.
    #[default]
    Check,
    /// Print the syntax tree as an S-expression.
    Ast,
    /// Print the lexer's symbol stream.
    Tokens,
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cli {
    pub files: Vec<PathBuf>,
    /// Forced unit kind; `None` picks it from the file extension.
    pub kind: Option<SourceKind>,
    pub options: ParseOptions,
    pub mode: Mode,
    pub color: ColorMode,
}

impl Default for Cli {
    fn default() -> Self {
        Cli {
            files: Vec::new(),
            kind: None,
            options: ParseOptions::default(),
            mode: Mode::Check,
            color: ColorMode::Auto,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("help requested")]
    Help,
    #[error("no input files")]
    NoInput,
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: &'static str, value: String },
    #[error("--def and --mod are mutually exclusive")]
    ConflictingKinds,
}

impl Cli {
    /// Build a command line from arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> Result<Cli, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cli = Cli::default();
        let mut only_files = false;

        for arg in args {
            let arg = arg.as_ref();
            if only_files || !arg.starts_with('-') {
                cli.files.push(PathBuf::from(arg));
                continue;
            }
            match arg {
                "--" => only_files = true,
                "-h" | "--help" => return Err(CliError::Help),
                "--def" => cli.set_kind(SourceKind::Definition)?,
                "--mod" => cli.set_kind(SourceKind::ImplementationOrProgram)?,
                "--dollar-ids" => cli.options.lexer |= LexerOptions::DOLLAR_IDENTIFIERS,
                "--lowline-ids" => cli.options.lexer |= LexerOptions::LOWLINE_IDENTIFIERS,
                "--preserve-comments" => cli.options.lexer |= LexerOptions::PRESERVE_COMMENTS,
                "--extensible-records" => cli.options.record_grammar = RecordGrammar::Extensible,
                "--tokens" => cli.mode = Mode::Tokens,
                "--ast" => cli.mode = Mode::Ast,
                "-v" | "--verbose" => cli.options.verbose = true,
                _ => cli.parse_valued(arg)?,
            }
        }

        if cli.files.is_empty() {
            return Err(CliError::NoInput);
        }
        Ok(cli)
    }

    fn set_kind(&mut self, kind: SourceKind) -> Result<(), CliError> {
        match self.kind {
            Some(existing) if existing != kind => Err(CliError::ConflictingKinds),
            _ => {
                self.kind = Some(kind);
                Ok(())
            }
        }
    }

    /// `--name=value` switches.
    fn parse_valued(&mut self, arg: &str) -> Result<(), CliError> {
        let Some((name, value)) = arg.split_once('=') else {
            return Err(CliError::UnknownOption(arg.to_owned()));
        };
        let invalid = |option| CliError::InvalidValue {
            option,
            value: value.to_owned(),
        };
        match name {
            "--errant-semicolon" => {
                self.options.errant_semicolon = match value {
                    "warn" | "warning" => Severity::Warning,
                    "error" => Severity::Error,
                    _ => return Err(invalid("--errant-semicolon")),
                };
            }
            "--max-nesting" => {
                self.options.max_nesting = match value.parse::<u32>() {
                    Ok(limit) if limit > 0 => limit,
                    _ => return Err(invalid("--max-nesting")),
                };
            }
            "--color" => {
                self.color = match value {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    _ => return Err(invalid("--color")),
                };
            }
            _ => return Err(CliError::UnknownOption(arg.to_owned())),
        }
        Ok(())
    }
}
