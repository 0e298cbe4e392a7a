use pretty_assertions::assert_eq;

use super::*;

#[test]
fn illegal_character_message() {
    let diag = Diagnostic::new(ErrorCode::E0101, 1, 2).with_char('\'');
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message(), "illegal character '\\''");
    assert_eq!(diag.to_string(), "1:2: error[E0101]: illegal character '\\''");
}

#[test]
fn unexpected_token_expected_token() {
    let diag = Diagnostic::new(ErrorCode::E0201, 3, 12)
        .with_found(Token::StdIdent)
        .with_lexeme("x")
        .with_expected(Expected::Token(Token::Then));
    assert_eq!(diag.message(), "unexpected identifier `x`, expected `THEN`");
}

#[test]
fn unexpected_token_expected_set() {
    let set = TokenSet::from_list(&[Token::Comma, Token::Semicolon]);
    let diag = Diagnostic::new(ErrorCode::E0201, 1, 1)
        .with_found(Token::EndOfFile)
        .with_expected(Expected::Set(set));
    assert_eq!(diag.message(), "unexpected end of file, expected `,` or `;`");
}

#[test]
fn mismatched_identifier_message() {
    let diag = Diagnostic::new(ErrorCode::E0202, 9, 5)
        .with_lexeme("Foo")
        .with_expected(Expected::Name("Bar".to_owned()));
    assert_eq!(
        diag.message(),
        "closing identifier `Foo` does not match `Bar`"
    );
}

#[test]
fn severities() {
    assert!(Severity::Fatal.is_error());
    assert!(Severity::Error.is_error());
    assert!(!Severity::Warning.is_error());
    let warn = Diagnostic::new(ErrorCode::E0203, 1, 1).with_severity(Severity::Warning);
    assert!(!warn.is_error());
    assert_eq!(warn.phase(), Phase::Syntax);
}

#[test]
fn lexical_with_lexeme() {
    let diag = Diagnostic::new(ErrorCode::E0111, 2, 4).with_lexeme("0z12");
    assert_eq!(diag.message(), "malformed number literal `0z12`");
}
