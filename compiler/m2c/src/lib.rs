//! Driver for the m2c front end.
//!
//! Parses every file named on the command line, in parallel, and renders
//! the diagnostics of each in command-line order. Nothing here changes how
//! a single unit is parsed; see [`m2c_parse`] for that.

pub mod cli;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

use m2c_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use m2c_diagnostic::{Diagnostic, Statistics};
use m2c_lexer::{tokenize, LexerOptions};
use m2c_lexer_core::SourceBuffer;
use m2c_parse::{ParseFailure, ParseOptions, ParseOutput, SourceKind};
use rayon::prelude::*;

use cli::{Cli, Mode};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Unit kind for `path`: forced by the command line, else by extension.
pub fn source_kind(path: &Path, forced: Option<SourceKind>) -> SourceKind {
    if let Some(kind) = forced {
        return kind;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("def") => SourceKind::Definition,
        Some("mod") => SourceKind::ImplementationOrProgram,
        _ => SourceKind::Any,
    }
}

/// Outcome of parsing one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<ParseOutput, ParseFailure>,
}

impl FileReport {
    pub fn stats(&self) -> Statistics {
        match &self.result {
            Ok(output) => output.stats,
            Err(failure) => failure.stats,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.result {
            Ok(output) => &output.diagnostics,
            Err(failure) => &failure.diagnostics,
        }
    }
}

/// Parse `files` in parallel. Reports come back in input order.
pub fn parse_files(
    files: &[PathBuf],
    forced: Option<SourceKind>,
    options: &ParseOptions,
) -> Vec<FileReport> {
    files
        .par_iter()
        .map(|path| {
            let kind = source_kind(path, forced);
            tracing::debug!(path = %path.display(), ?kind, "parsing");
            FileReport {
                path: path.clone(),
                result: m2c_parse::parse(kind, path, options),
            }
        })
        .collect()
}

/// Totals over a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub stats: Statistics,
    /// Files that produced no tree.
    pub failures: usize,
}

impl Summary {
    pub fn succeeded(&self) -> bool {
        self.failures == 0 && self.stats.error_count() == 0
    }
}

/// Listing of the symbol stream, one symbol per line, plus the lexical
/// diagnostics met on the way.
pub fn token_listing(source: &str, options: LexerOptions) -> (String, Vec<Diagnostic>) {
    let tokenized = tokenize(source, options);
    let mut listing = String::new();
    for symbol in &tokenized.symbols {
        let text = tokenized.text(symbol);
        let line = if text.is_empty() {
            format!("{}:{}\t{}\n", symbol.line, symbol.column, symbol.token)
        } else {
            format!(
                "{}:{}\t{}\t{}\n",
                symbol.line, symbol.column, symbol.token, text
            )
        };
        listing.push_str(&line);
    }
    (listing, tokenized.diagnostics)
}

/// Run the driver for `cli`, writing listings and trees to `out` and
/// diagnostics to `err`.
pub fn run<O: Write, E: Write>(cli: &Cli, is_tty: bool, out: &mut O, err: &mut E) -> Summary {
    let summary = match cli.mode {
        Mode::Tokens => run_tokens(cli, is_tty, out, err),
        Mode::Check | Mode::Ast => {
            let reports = parse_files(&cli.files, cli.kind, &cli.options);
            report(&reports, cli, is_tty, out, err)
        }
    };
    let errors = usize::try_from(summary.stats.error_count()).unwrap_or(usize::MAX);
    let warnings = usize::try_from(summary.stats.warning_count()).unwrap_or(usize::MAX);
    let mut emitter = TerminalEmitter::with_color_mode(&mut *err, cli.color, is_tty);
    emitter.emit_summary(errors, warnings);
    emitter.flush();
    summary
}

/// Render parse reports in input order and total their statistics.
pub fn report<O: Write, E: Write>(
    reports: &[FileReport],
    cli: &Cli,
    is_tty: bool,
    out: &mut O,
    err: &mut E,
) -> Summary {
    let mut summary = Summary::default();
    for file in reports {
        // Only needed for the verbose source echo.
        let source = if cli.options.verbose {
            std::fs::read_to_string(&file.path).ok()
        } else {
            None
        };
        emit_diagnostics(&file.path, source.as_deref(), file.diagnostics(), cli, is_tty, err);

        match &file.result {
            Ok(output) => {
                if cli.mode == Mode::Ast {
                    let _ = writeln!(out, "{}", output.sexpr());
                }
                if cli.options.verbose {
                    write_stats(out, &file.path, &output.stats);
                }
            }
            Err(failure) => {
                summary.failures += 1;
                let _ = writeln!(err, "{}: fatal: {failure}", file.path.display());
            }
        }
        summary.stats = summary.stats.merged(file.stats());
    }
    summary
}

fn run_tokens<O: Write, E: Write>(cli: &Cli, is_tty: bool, out: &mut O, err: &mut E) -> Summary {
    let mut summary = Summary::default();
    for path in &cli.files {
        let buffer = match SourceBuffer::from_path(path) {
            Ok(buffer) => buffer,
            Err(error) => {
                summary.failures += 1;
                let _ = writeln!(err, "{}: fatal: {error}", path.display());
                continue;
            }
        };
        let (listing, diagnostics) = token_listing(buffer.as_str(), cli.options.lexer);
        let _ = out.write_all(listing.as_bytes());

        let source = cli.options.verbose.then_some(buffer.as_str());
        emit_diagnostics(path, source, &diagnostics, cli, is_tty, err);
        for diagnostic in &diagnostics {
            summary.stats.record(diagnostic);
        }
    }
    summary
}

fn emit_diagnostics<E: Write>(
    path: &Path,
    source: Option<&str>,
    diagnostics: &[Diagnostic],
    cli: &Cli,
    is_tty: bool,
    err: &mut E,
) {
    if diagnostics.is_empty() {
        return;
    }
    let mut emitter = TerminalEmitter::with_color_mode(&mut *err, cli.color, is_tty)
        .with_origin(path.display().to_string());
    if let Some(source) = source {
        emitter = emitter.verbose(source);
    }
    emitter.emit_all(diagnostics);
    emitter.flush();
}

fn write_stats<O: Write>(out: &mut O, path: &Path, stats: &Statistics) {
    let _ = writeln!(
        out,
        "{}: {} lines, {} declarations, {} procedures, {} statements, {} errors, {} warnings",
        path.display(),
        stats.lines,
        stats.declarations,
        stats.procedures,
        stats.statements,
        stats.error_count(),
        stats.warning_count(),
    );
}
