//! Golden tests over the Modula-2 sources in `tests/fixtures/`.
//!
//! Every `.def` and `.mod` fixture is parsed. A first line of the form
//! `(* expect: E0201 E0204 *)` lists the diagnostic codes the fixture must
//! produce, in order; fixtures without it must parse cleanly. A sibling
//! `<fixture>.sexpr` file, when present, holds the expected tree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::{Path, PathBuf};

use m2c_parse::{parse, ParseOptions, ParseOutput, SourceKind};
use pretty_assertions::assert_eq;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Fixture sources, sorted for stable failure output.
fn fixture_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .expect("fixtures directory")
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("def" | "mod")
            )
        })
        .collect();
    files.sort();
    files
}

fn source_kind(path: &Path) -> SourceKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("def") => SourceKind::Definition,
        _ => SourceKind::ImplementationOrProgram,
    }
}

/// Codes listed in the fixture's `(* expect: ... *)` header.
fn expected_codes(source: &str) -> Vec<String> {
    let Some(first) = source.lines().next() else {
        return Vec::new();
    };
    let Some(rest) = first.trim().strip_prefix("(* expect:") else {
        return Vec::new();
    };
    rest.trim_end_matches("*)")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn parse_fixture(path: &Path) -> ParseOutput {
    parse(source_kind(path), path, &ParseOptions::default())
        .unwrap_or_else(|failure| panic!("{}: {failure}", path.display()))
}

#[test]
fn fixtures_exist() {
    assert!(fixture_files().len() >= 4);
}

#[test]
fn fixtures_report_expected_diagnostics() {
    for path in fixture_files() {
        let source = fs::read_to_string(&path).unwrap();
        let output = parse_fixture(&path);
        let codes: Vec<String> = output
            .diagnostics
            .iter()
            .map(|d| d.code.as_str().to_owned())
            .collect();
        assert_eq!(codes, expected_codes(&source), "{}", path.display());
    }
}

#[test]
fn fixture_trees_match_goldens() {
    let mut compared = 0;
    for path in fixture_files() {
        let mut golden = path.clone().into_os_string();
        golden.push(".sexpr");
        let golden = PathBuf::from(golden);
        if !golden.exists() {
            continue;
        }
        let expected = fs::read_to_string(&golden).unwrap();
        let output = parse_fixture(&path);
        assert_eq!(output.sexpr(), expected.trim_end(), "{}", path.display());
        compared += 1;
    }
    assert!(compared > 0);
}

#[test]
fn stack_definition_statistics() {
    let output = parse_fixture(&fixtures_dir().join("Stack.def"));
    assert_eq!(output.stats.declarations, 7);
    assert_eq!(output.stats.procedures, 4);
    assert_eq!(output.stats.statements, 0);
    assert_eq!(output.stats.lines, 18);
}

#[test]
fn stack_implementation_statistics() {
    let output = parse_fixture(&fixtures_dir().join("Stack.mod"));
    assert_eq!(output.stats.procedures, 4);
    assert_eq!(output.stats.declarations, 6);
    assert_eq!(output.stats.statements, 14);
}

#[test]
fn broken_fixture_still_yields_a_tree() {
    let output = parse_fixture(&fixtures_dir().join("Broken.mod"));
    assert!(output.has_errors());
    assert_eq!(output.stats.syntax_errors, 2);
    assert_eq!(output.stats.syntax_warnings, 2);
    assert!(output.ast.node_count() > 10);
}
