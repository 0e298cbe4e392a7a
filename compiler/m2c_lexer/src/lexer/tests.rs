use m2c_diagnostic::ErrorCode;
use m2c_ir::Token;
use m2c_lexer_core::SourceBuffer;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn token_kinds(tokenized: &Tokenized) -> Vec<Token> {
    tokenized.symbols.iter().map(|s| s.token).collect()
}

// === Window ===

#[test]
fn window_starts_before_first_symbol() {
    let buf = SourceBuffer::new("MODULE M;");
    let lexer = Lexer::new(&buf, LexerOptions::empty());
    assert_eq!(lexer.current().token, Token::Unknown);
    assert_eq!(lexer.lookahead().token, Token::Module);
}

#[test]
fn next_sym_shifts_window() {
    let buf = SourceBuffer::new("MODULE M;");
    let mut lexer = Lexer::new(&buf, LexerOptions::empty());
    assert_eq!(lexer.next_sym(), Token::StdIdent);
    assert_eq!(lexer.current().token, Token::Module);
    assert_eq!(lexer.next_sym(), Token::Semicolon);
    let ident = lexer.current();
    assert_eq!(ident.token, Token::StdIdent);
    assert_eq!(ident.lexeme.map(|n| lexer.lexeme(n)), Some("M"));
    assert_eq!(lexer.next_sym(), Token::EndOfFile);
    assert_eq!(lexer.next_sym(), Token::EndOfFile);
}

#[test]
fn reserved_words_carry_no_lexeme() {
    let buf = SourceBuffer::new("BEGIN");
    let lexer = Lexer::new(&buf, LexerOptions::empty());
    assert_eq!(lexer.lookahead().lexeme, None);
}

#[test]
fn repeated_identifiers_share_a_name() {
    let out = tokenize("foo bar foo", LexerOptions::empty());
    assert_eq!(out.symbols[0].lexeme, out.symbols[2].lexeme);
    assert_ne!(out.symbols[0].lexeme, out.symbols[1].lexeme);
}

#[test]
fn line_count_counts_source_lines() {
    let buf = SourceBuffer::new("a\nb\nc\n");
    let lexer = Lexer::new(&buf, LexerOptions::empty());
    assert_eq!(lexer.line_count(), 3);
}

// === Comments ===

#[test]
fn comments_dropped_by_default() {
    let out = tokenize("a (* c *) ! tail\nb", LexerOptions::empty());
    assert_eq!(
        token_kinds(&out),
        vec![Token::StdIdent, Token::StdIdent, Token::EndOfFile]
    );
}

#[test]
fn nested_comment_preserved_as_one_symbol() {
    let text = "(* outer (* inner *) still-outer *)";
    let out = tokenize(text, LexerOptions::PRESERVE_COMMENTS);
    assert_eq!(token_kinds(&out), vec![Token::BlockComment, Token::EndOfFile]);
    assert_eq!(out.text(&out.symbols[0]), text);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn pragmas_always_emitted() {
    let out = tokenize("<* INLINE *> x", LexerOptions::empty());
    assert_eq!(
        token_kinds(&out),
        vec![Token::Pragma, Token::StdIdent, Token::EndOfFile]
    );
}

#[test]
fn unterminated_comment_emitted_without_preserve() {
    let out = tokenize("x (* open", LexerOptions::empty());
    assert_eq!(
        token_kinds(&out),
        vec![Token::StdIdent, Token::MalformedComment, Token::EndOfFile]
    );
}

// === Stray Characters ===

#[test]
fn stray_apostrophe_after_identifier() {
    let out = tokenize("a' :=", LexerOptions::empty());
    assert_eq!(
        token_kinds(&out),
        vec![Token::StdIdent, Token::Assign, Token::EndOfFile]
    );
    assert_eq!(out.text(&out.symbols[0]), "a");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code, ErrorCode::E0101);
}

#[test]
fn text_of_special_symbol_is_its_spelling() {
    let out = tokenize(":=", LexerOptions::empty());
    assert_eq!(out.text(&out.symbols[0]), ":=");
}

// === Properties ===

proptest! {
    #[test]
    fn tokenize_is_deterministic(source in "[ -~\n\t]{0,200}") {
        let first = tokenize(&source, LexerOptions::PRESERVE_COMMENTS);
        let second = tokenize(&source, LexerOptions::PRESERVE_COMMENTS);
        prop_assert_eq!(&first.symbols, &second.symbols);
        prop_assert_eq!(first.diagnostics.len(), second.diagnostics.len());
    }

    #[test]
    fn tokenize_ends_with_single_eof(source in "[ -~\n\t]{0,200}") {
        let out = tokenize(&source, LexerOptions::empty());
        let eofs = out.symbols.iter().filter(|s| s.token == Token::EndOfFile).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(out.symbols.last().map(|s| s.token), Some(Token::EndOfFile));
    }

    #[test]
    fn positions_never_decrease(source in "[ -~\n\t]{0,200}") {
        let out = tokenize(&source, LexerOptions::PRESERVE_COMMENTS);
        let positions: Vec<(u32, u32)> = out
            .symbols
            .iter()
            .filter(|s| s.token != Token::EndOfFile)
            .map(|s| (s.line, s.column))
            .collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
