use pretty_assertions::assert_eq;

use super::*;

// === End of File ===

#[test]
fn every_follow_and_resync_set_contains_eof() {
    let sets = [
        ("STATEMENT_SEQUENCE_END", STATEMENT_SEQUENCE_END),
        ("FOLLOW_STATEMENT", FOLLOW_STATEMENT),
        ("FIELD_LIST_SEQUENCE_END", FIELD_LIST_SEQUENCE_END),
        ("FOLLOW_FIELD_LIST", FOLLOW_FIELD_LIST),
        ("FOLLOW_TYPE", FOLLOW_TYPE),
        ("FOLLOW_EXPRESSION", FOLLOW_EXPRESSION),
        ("FOLLOW_DECLARATION", FOLLOW_DECLARATION),
        ("FOLLOW_IMPORT", FOLLOW_IMPORT),
        ("FOLLOW_FORMAL_PARAMS", FOLLOW_FORMAL_PARAMS),
        ("FOLLOW_PROCEDURE_HEADER", FOLLOW_PROCEDURE_HEADER),
        ("FOLLOW_BLOCK", FOLLOW_BLOCK),
        ("THEN_RESYNC", THEN_RESYNC),
        ("MODULE_NAME_RESYNC", MODULE_NAME_RESYNC),
        ("MODULE_KEYWORD_RESYNC", MODULE_KEYWORD_RESYNC),
        ("MODULE_HEADER_RESYNC", MODULE_HEADER_RESYNC),
        ("DECLARATION_ITEM_RESYNC", DECLARATION_ITEM_RESYNC),
        ("IMPORT_ITEM_RESYNC", IMPORT_ITEM_RESYNC),
        ("TYPE_RESYNC", TYPE_RESYNC),
        ("EXPRESSION_RESYNC", EXPRESSION_RESYNC),
        ("STATEMENT_RESYNC", STATEMENT_RESYNC),
        ("END_OF_UNIT", END_OF_UNIT),
    ];
    for (name, set) in sets {
        assert!(set.contains(Token::EndOfFile), "{name} lacks EndOfFile");
    }
}

#[test]
fn first_sets_never_contain_eof() {
    for set in [FIRST_DECLARATION, FIRST_TYPE, FIRST_STATEMENT, FIRST_EXPRESSION] {
        assert!(!set.contains(Token::EndOfFile));
    }
}

// === Termination ===

#[test]
fn statements_cannot_start_with_a_sequence_closer() {
    assert!(FIRST_STATEMENT.is_disjoint(&STATEMENT_SEQUENCE_END));
    assert!(FIRST_FIELD_LIST.is_disjoint(&FIELD_LIST_SEQUENCE_END));
}

#[test]
fn expressions_cannot_start_with_their_follow() {
    assert!(FIRST_EXPRESSION.is_disjoint(&FOLLOW_EXPRESSION));
}

#[test]
fn operator_levels_are_disjoint() {
    assert!(OPER_L1.is_disjoint(&OPER_L2));
    assert!(OPER_L1.is_disjoint(&OPER_L3));
    assert!(OPER_L2.is_disjoint(&OPER_L3));
}

// === Composition ===

#[test]
fn resync_sets_are_first_plus_follow() {
    assert!(FIRST_STATEMENT.is_subset_of(&STATEMENT_RESYNC));
    assert!(FOLLOW_STATEMENT.is_subset_of(&STATEMENT_RESYNC));
    assert!(FIRST_TYPE.is_subset_of(&TYPE_RESYNC));
    assert!(FOLLOW_TYPE.is_subset_of(&TYPE_RESYNC));
    assert!(FIRST_EXPRESSION.is_subset_of(&EXPRESSION_RESYNC));
    assert!(FOLLOW_EXPRESSION.is_subset_of(&EXPRESSION_RESYNC));
}

#[test]
fn literals_and_identifiers_start_expressions() {
    assert!(LITERAL.is_subset_of(&FIRST_EXPRESSION));
    assert!(IDENT.is_subset_of(&FIRST_EXPRESSION));
    assert!(IDENT.is_subset_of(&FIRST_TYPE));
    assert!(IDENT.is_subset_of(&FIRST_STATEMENT));
}

#[test]
fn declarations_follow_declarations() {
    assert!(FIRST_DECLARATION.is_subset_of(&FOLLOW_DECLARATION));
    assert!(FIRST_IMPORT.is_subset_of(&FOLLOW_IMPORT));
    assert!(FOLLOW_DECLARATION.is_subset_of(&FOLLOW_IMPORT));
}

#[test]
fn set_sizes() {
    assert_eq!(IDENT.count(), 3);
    assert_eq!(FIRST_DECLARATION.count(), 4);
    assert_eq!(OPER_L1.count(), 8);
    assert_eq!(OPER_L2.count(), 3);
    assert_eq!(OPER_L3.count(), 5);
    assert_eq!(STATEMENT_SEQUENCE_END.count(), 6);
    assert_eq!(FOLLOW_STATEMENT.count(), 7);
}
