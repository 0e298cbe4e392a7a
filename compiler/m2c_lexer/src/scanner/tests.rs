use m2c_diagnostic::{Diagnostic, ErrorCode};
use m2c_ir::Token;
use m2c_lexer_core::SourceBuffer;
use pretty_assertions::assert_eq;

use super::Scanner;
use crate::LexerOptions;

fn scan_with(source: &str, options: LexerOptions) -> (Vec<(Token, String)>, Vec<Diagnostic>) {
    let buf = SourceBuffer::new(source);
    let mut scanner = Scanner::new(buf.cursor(), options);
    let mut out = Vec::new();
    loop {
        let sym = scanner.next_symbol();
        if sym.token == Token::EndOfFile {
            break;
        }
        out.push((sym.token, scanner.text(&sym).to_owned()));
    }
    (out, scanner.take_diagnostics())
}

fn scan(source: &str) -> (Vec<(Token, String)>, Vec<Diagnostic>) {
    scan_with(source, LexerOptions::empty())
}

fn tokens(source: &str) -> Vec<Token> {
    scan(source).0.into_iter().map(|(t, _)| t).collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

// === Identifiers and Reserved Words ===

#[test]
fn reserved_words_need_all_uppercase() {
    assert_eq!(
        tokens("MODULE Module module MODULEX"),
        vec![Token::Module, Token::StdIdent, Token::StdIdent, Token::StdIdent]
    );
}

#[test]
fn uppercase_run_followed_by_digit_is_identifier() {
    assert_eq!(tokens("END1 BY2"), vec![Token::StdIdent, Token::StdIdent]);
}

#[test]
fn lowline_without_option_is_illegal() {
    let (syms, diags) = scan("foo_bar");
    assert_eq!(
        syms,
        vec![
            (Token::StdIdent, "foo".to_owned()),
            (Token::StdIdent, "bar".to_owned())
        ]
    );
    assert_eq!(codes(&diags), vec![ErrorCode::E0101]);
    assert_eq!(diags[0].offending_char, Some('_'));
}

#[test]
fn lowline_with_option_is_foreign() {
    let (syms, diags) = scan_with("foo_bar", LexerOptions::LOWLINE_IDENTIFIERS);
    assert_eq!(syms, vec![(Token::ForeignIdent, "foo_bar".to_owned())]);
    assert!(diags.is_empty());
}

#[test]
fn dollar_with_option_is_foreign() {
    let (syms, _) = scan_with("sys$call", LexerOptions::DOLLAR_IDENTIFIERS);
    assert_eq!(syms, vec![(Token::ForeignIdent, "sys$call".to_owned())]);
}

#[test]
fn separator_placement_rules() {
    let opts = LexerOptions::LOWLINE_IDENTIFIERS | LexerOptions::DOLLAR_IDENTIFIERS;
    for text in ["foo__bar", "foo_", "_foo", "a$_b"] {
        let (syms, diags) = scan_with(text, opts);
        assert_eq!(syms, vec![(Token::MalformedIdent, text.to_owned())], "{text}");
        assert_eq!(codes(&diags), vec![ErrorCode::E0112], "{text}");
    }
}

#[test]
fn apostrophe_after_identifier_is_illegal() {
    let (syms, diags) = scan("a' :=");
    assert_eq!(
        syms,
        vec![(Token::StdIdent, "a".to_owned()), (Token::Assign, ":=".to_owned())]
    );
    assert_eq!(codes(&diags), vec![ErrorCode::E0101]);
    assert_eq!(diags[0].offending_char, Some('\''));
    assert_eq!((diags[0].line, diags[0].column), (1, 2));
}

#[test]
fn apostrophe_after_reserved_word_does_not_open_string() {
    let (syms, diags) = scan("END' M");
    assert_eq!(
        syms,
        vec![(Token::End, "END".to_owned()), (Token::StdIdent, "M".to_owned())]
    );
    assert_eq!(codes(&diags), vec![ErrorCode::E0101]);
}

// === Numbers ===

#[test]
fn whole_numbers() {
    let (syms, diags) = scan("0 42 1'000'000 0b1010 0x7F 0u41");
    assert_eq!(
        syms.iter().map(|(t, _)| *t).collect::<Vec<_>>(),
        vec![
            Token::WholeNumber,
            Token::WholeNumber,
            Token::WholeNumber,
            Token::WholeNumber,
            Token::WholeNumber,
            Token::CharCode
        ]
    );
    assert_eq!(syms[2].1, "1'000'000");
    assert!(diags.is_empty());
}

#[test]
fn real_numbers() {
    let (syms, diags) = scan("3.14 0.5 1.0e10 2.5E-3 6.02e+23");
    assert!(syms.iter().all(|(t, _)| *t == Token::RealNumber));
    assert_eq!(syms.len(), 5);
    assert!(diags.is_empty());
}

#[test]
fn range_after_number_is_not_real() {
    assert_eq!(
        tokens("0..9 1..10"),
        vec![
            Token::WholeNumber,
            Token::DotDot,
            Token::WholeNumber,
            Token::WholeNumber,
            Token::DotDot,
            Token::WholeNumber
        ]
    );
}

#[test]
fn separator_needs_following_digit() {
    let (syms, diags) = scan("1' ");
    assert_eq!(syms, vec![(Token::WholeNumber, "1'".to_owned())]);
    assert_eq!(codes(&diags), vec![ErrorCode::E0108]);
}

#[test]
fn decimal_point_needs_digit() {
    let (syms, diags) = scan("1.;");
    assert_eq!(syms[0].0, Token::RealNumber);
    assert_eq!(syms[1].0, Token::Semicolon);
    assert_eq!(codes(&diags), vec![ErrorCode::E0109]);
}

#[test]
fn exponent_needs_digit() {
    let (syms, diags) = scan("1.5e+ ");
    assert_eq!(syms, vec![(Token::RealNumber, "1.5e+".to_owned())]);
    assert_eq!(codes(&diags), vec![ErrorCode::E0110]);
}

#[test]
fn malformed_numbers() {
    for text in ["0z12", "0x", "0b2", "007", "12abc", "0xff"] {
        let (syms, diags) = scan(text);
        assert_eq!(syms, vec![(Token::MalformedNumber, text.to_owned())], "{text}");
        assert_eq!(codes(&diags), vec![ErrorCode::E0111], "{text}");
    }
}

// === Quoted Literals ===

#[test]
fn quoted_literals_both_delimiters() {
    let (syms, diags) = scan(r#"'it"s' "don't""#);
    assert_eq!(
        syms,
        vec![
            (Token::QuotedString, r#"'it"s'"#.to_owned()),
            (Token::QuotedString, r#""don't""#.to_owned())
        ]
    );
    assert!(diags.is_empty());
}

#[test]
fn valid_and_invalid_escapes() {
    let (syms, diags) = scan(r"'a\nb\tc' 'x\qy'");
    assert_eq!(syms.len(), 2);
    assert!(syms.iter().all(|(t, _)| *t == Token::QuotedString));
    assert_eq!(codes(&diags), vec![ErrorCode::E0106]);
    assert_eq!(diags[0].offending_char, Some('q'));
}

#[test]
fn backslash_does_not_escape_delimiter() {
    let (syms, diags) = scan(r"'a\' b");
    assert_eq!(
        syms,
        vec![
            (Token::QuotedString, r"'a\'".to_owned()),
            (Token::StdIdent, "b".to_owned())
        ]
    );
    assert_eq!(codes(&diags), vec![ErrorCode::E0106]);
}

#[test]
fn unterminated_string_runs_to_eof() {
    let (syms, diags) = scan("'abc\nMODULE");
    assert_eq!(syms.len(), 1);
    assert_eq!(syms[0].0, Token::MalformedString);
    assert_eq!(codes(&diags), vec![ErrorCode::E0107, ErrorCode::E0102]);
    assert_eq!((diags[1].line, diags[1].column), (1, 1));
}

// === Comments, Pragmas, Disabled Code ===

#[test]
fn nested_block_comment_is_one_symbol() {
    let text = "(* outer (* inner *) still-outer *)";
    let (syms, diags) = scan(text);
    assert_eq!(syms, vec![(Token::BlockComment, text.to_owned())]);
    assert!(diags.is_empty());
}

#[test]
fn comment_nesting_limit() {
    let open = "(* ".repeat(11);
    let close = "*) ".repeat(11);
    let (syms, diags) = scan(&format!("{open}{close}"));
    assert_eq!(codes(&diags), vec![ErrorCode::E0113]);
    assert_eq!(syms[0].0, Token::BlockComment);
}

#[test]
fn closers_of_ignored_openers_stay_in_comment() {
    let text = format!("{}{}", "(* ".repeat(13), "*) ".repeat(13));
    let comment = text.trim_end();
    let (syms, diags) = scan(&format!("{comment} x"));
    assert_eq!(
        syms,
        vec![
            (Token::BlockComment, comment.to_owned()),
            (Token::StdIdent, "x".to_owned()),
        ]
    );
    assert_eq!(codes(&diags), vec![ErrorCode::E0113]);
}

#[test]
fn unterminated_block_comment() {
    let (syms, diags) = scan("x (* never closed");
    assert_eq!(syms[1].0, Token::MalformedComment);
    assert_eq!(codes(&diags), vec![ErrorCode::E0103]);
    assert_eq!(diags[0].column, 3);
}

#[test]
fn line_comment_to_end_of_line() {
    let (syms, _) = scan("a ! rest := of line\nb");
    assert_eq!(
        syms,
        vec![
            (Token::StdIdent, "a".to_owned()),
            (Token::LineComment, "! rest := of line".to_owned()),
            (Token::StdIdent, "b".to_owned())
        ]
    );
}

#[test]
fn pragmas() {
    let (syms, diags) = scan("<* INLINE *> <*open");
    assert_eq!(syms[0], (Token::Pragma, "<* INLINE *>".to_owned()));
    assert_eq!(syms[1].0, Token::MalformedPragma);
    assert_eq!(codes(&diags), vec![ErrorCode::E0104]);
}

#[test]
fn disabled_code_is_skipped() {
    let (syms, diags) = scan("a\n?<\n@@ garbage '\n?> trailing\nb");
    assert_eq!(
        syms,
        vec![(Token::StdIdent, "a".to_owned()), (Token::StdIdent, "b".to_owned())]
    );
    assert!(diags.is_empty());
}

#[test]
fn disabled_code_needs_column_one() {
    let (_, diags) = scan(" ?<");
    assert_eq!(codes(&diags), vec![ErrorCode::E0101]);
}

#[test]
fn unterminated_disabled_code_warns() {
    let (syms, diags) = scan("?<\nnever closed\n");
    assert!(syms.is_empty());
    assert_eq!(codes(&diags), vec![ErrorCode::E0105]);
    assert!(!diags[0].is_error());
}

// === Special Symbols ===

#[test]
fn special_symbols() {
    assert_eq!(
        tokens(". .. , : := :: ; | ( ) [ ] { } = == # < <= > >= + - * / ^"),
        vec![
            Token::Dot,
            Token::DotDot,
            Token::Comma,
            Token::Colon,
            Token::Assign,
            Token::TypeConv,
            Token::Semicolon,
            Token::Bar,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
            Token::LBrace,
            Token::RBrace,
            Token::Equal,
            Token::Identity,
            Token::NotEqual,
            Token::Less,
            Token::LessOrEqual,
            Token::Greater,
            Token::GreaterOrEqual,
            Token::Plus,
            Token::Minus,
            Token::Asterisk,
            Token::Solidus,
            Token::Deref,
        ]
    );
}

#[test]
fn illegal_characters_reported_individually() {
    let (syms, diags) = scan("a @ ~ \u{e9} b");
    assert_eq!(syms.len(), 2);
    assert_eq!(
        diags.iter().map(|d| d.offending_char).collect::<Vec<_>>(),
        vec![Some('@'), Some('~'), Some('\u{e9}')]
    );
}

#[test]
fn eof_repeats() {
    let buf = SourceBuffer::new("x");
    let mut scanner = Scanner::new(buf.cursor(), LexerOptions::empty());
    assert_eq!(scanner.next_symbol().token, Token::StdIdent);
    for _ in 0..3 {
        assert_eq!(scanner.next_symbol().token, Token::EndOfFile);
    }
}

#[test]
fn positions_are_one_based() {
    let buf = SourceBuffer::new("MODULE M;\n  END");
    let mut scanner = Scanner::new(buf.cursor(), LexerOptions::empty());
    let positions: Vec<(u32, u32)> = (0..4)
        .map(|_| {
            let s = scanner.next_symbol();
            (s.line, s.column)
        })
        .collect();
    assert_eq!(positions, vec![(1, 1), (1, 8), (1, 9), (2, 3)]);
}
