#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use m2c_ir::Token;
use pretty_assertions::assert_eq;

use super::*;
use crate::{ErrorCode, Expected};

fn render(origin: Option<&str>, source: Option<&str>, diag: &Diagnostic) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    if let Some(origin) = origin {
        emitter = emitter.with_origin(origin);
    }
    if let Some(source) = source {
        emitter = emitter.verbose(source);
    }
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

fn missing_then() -> Diagnostic {
    Diagnostic::new(ErrorCode::E0201, 2, 13)
        .with_found(Token::StdIdent)
        .with_lexeme("x")
        .with_expected(Expected::Token(Token::Then))
}

#[test]
fn test_plain_line() {
    let text = render(None, None, &missing_then());
    assert_eq!(
        text,
        "2:13: error[E0201]: unexpected identifier `x`, expected `THEN`\n"
    );
}

#[test]
fn test_origin_prefix() {
    let text = render(Some("Foo.mod"), None, &missing_then());
    assert!(text.starts_with("Foo.mod:2:13: error[E0201]"));
}

#[test]
fn test_verbose_echo_with_caret() {
    let source = "BEGIN\n  IF a > 0 x := 1 END\nEND M.\n";
    let diag = Diagnostic::new(ErrorCode::E0201, 2, 12).with_found(Token::StdIdent);
    let text = render(None, Some(source), &diag);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "    IF a > 0 x := 1 END");
    assert_eq!(lines[2], "             ^");
}

#[test]
fn test_verbose_line_out_of_range() {
    let diag = Diagnostic::new(ErrorCode::E0102, 40, 1);
    let text = render(None, Some("one line"), &diag);
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_colors_wrap_severity() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&Diagnostic::new(ErrorCode::E0204, 1, 1));
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.contains("\x1b[1;33mwarning\x1b[0m"));
}

#[test]
fn test_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(0, 3);
    emitter.emit_summary(0, 0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        text,
        "error: aborting due to 2 previous errors; 1 warning emitted\nwarning: 3 warnings emitted\n"
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_summary_single_error() {
    assert_eq!(
        summary_text(1, 0).map(|(_, label, text)| format!("{label}: {text}")),
        Some("error: aborting due to previous error".to_owned())
    );
    assert!(summary_text(0, 0).is_none());
}
