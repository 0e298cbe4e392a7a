//! Property-based tests for the parser.
//!
//! Arbitrary symbol soup inside a module frame must always yield a tree:
//! recovery terminates, and the same input gives the same result.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use m2c_parse::{parse_source, ParseOptions, SourceKind};
use proptest::prelude::*;

/// Spellings drawn on to build random bodies.
const VOCABULARY: &[&str] = &[
    "x", "y", "Foo", "1", "2.5", "0u41", "'s'", ":=", "=", "#", "<", ">=", "+", "-", "*", "/",
    "DIV", "MOD", "AND", "OR", "NOT", "IN", "::", "(", ")", "[", "]", "{", "}", ".", "..", ",",
    ";", ":", "|", "^", "IF", "THEN", "ELSIF", "ELSE", "END", "CASE", "OF", "LOOP", "WHILE",
    "DO", "REPEAT", "UNTIL", "FOR", "TO", "BY", "RETURN", "EXIT", "BEGIN", "CONST", "TYPE",
    "VAR", "PROCEDURE", "RECORD", "ARRAY", "POINTER", "SET", "ALIAS", "OPAQUE", "ARGLIST",
    "CAST", "IMPORT", "FROM", "MODULE", "@", "(* c *)", "<*P*>",
];

fn soup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..64)
        .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn recovery_always_terminates_with_a_tree(body in soup_strategy()) {
        let source = format!("MODULE M; {body} END M.");
        let output = parse_source(SourceKind::Any, &source, &ParseOptions::default());
        prop_assert!(output.is_ok());
    }

    #[test]
    fn declarations_soup_terminates(body in soup_strategy()) {
        let source = format!("DEFINITION MODULE M; {body} END M.");
        let output = parse_source(SourceKind::Definition, &source, &ParseOptions::default());
        prop_assert!(output.is_ok());
    }

    #[test]
    fn parsing_is_deterministic(body in soup_strategy()) {
        let source = format!("MODULE M; BEGIN {body} END M.");
        let options = ParseOptions::default();
        let first = parse_source(SourceKind::Any, &source, &options).unwrap();
        let second = parse_source(SourceKind::Any, &source, &options).unwrap();
        prop_assert_eq!(first.sexpr(), second.sexpr());
        prop_assert_eq!(first.diagnostics, second.diagnostics);
        prop_assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn clean_parse_counts_no_errors(n in 1usize..20) {
        let body = (0..n).map(|i| format!("x := {i}")).collect::<Vec<_>>().join("; ");
        let source = format!("MODULE M; BEGIN {body} END M.");
        let output = parse_source(SourceKind::Any, &source, &ParseOptions::default()).unwrap();
        prop_assert!(output.diagnostics.is_empty());
        prop_assert_eq!(output.stats.statements, u32::try_from(n).unwrap());
    }
}
