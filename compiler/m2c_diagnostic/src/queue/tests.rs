use super::*;
use crate::{ErrorCode, Severity};

#[test]
fn push_updates_counts_by_phase() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::new(ErrorCode::E0101, 1, 1));
    queue.push(Diagnostic::new(ErrorCode::E0105, 9, 1));
    queue.push(Diagnostic::new(ErrorCode::E0201, 2, 3));
    queue.push(Diagnostic::new(ErrorCode::E0204, 4, 1));
    queue.push(Diagnostic::new(ErrorCode::E0207, 5, 1));

    let stats = queue.stats();
    assert_eq!(stats.lexical_errors, 1);
    assert_eq!(stats.lexical_warnings, 1);
    assert_eq!(stats.syntax_errors, 2);
    assert_eq!(stats.syntax_warnings, 1);
    assert_eq!(stats.error_count(), 3);
    assert_eq!(stats.warning_count(), 2);
    assert!(queue.has_errors());
    assert_eq!(queue.diagnostics().len(), 5);
}

#[test]
fn severity_override_moves_counter() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::new(ErrorCode::E0203, 1, 1).with_severity(Severity::Warning));
    assert_eq!(queue.stats().syntax_warnings, 1);
    assert_eq!(queue.stats().syntax_errors, 0);
    assert!(!queue.has_errors());
}

#[test]
fn merged_sums_fields() {
    let a = Statistics {
        declarations: 2,
        lines: 10,
        syntax_errors: 1,
        ..Statistics::default()
    };
    let b = Statistics {
        declarations: 3,
        lines: 5,
        procedures: 1,
        ..Statistics::default()
    };
    let sum = a.merged(b);
    assert_eq!(sum.declarations, 5);
    assert_eq!(sum.lines, 15);
    assert_eq!(sum.procedures, 1);
    assert_eq!(sum.syntax_errors, 1);
}

#[test]
fn into_parts_keeps_order() {
    let mut queue = DiagnosticQueue::new();
    queue.extend([
        Diagnostic::new(ErrorCode::E0102, 1, 1),
        Diagnostic::new(ErrorCode::E0201, 2, 1),
    ]);
    let (diagnostics, stats) = queue.into_parts();
    assert_eq!(diagnostics[0].code, ErrorCode::E0102);
    assert_eq!(diagnostics[1].code, ErrorCode::E0201);
    assert_eq!(stats.error_count(), 2);
}
