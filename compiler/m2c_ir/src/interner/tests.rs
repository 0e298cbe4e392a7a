use super::*;

#[test]
fn empty_string_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.len(), 1);
    assert!(interner.is_empty());
    assert_eq!(interner.get(""), Some(Name::EMPTY));
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn same_content_same_handle() {
    let mut interner = StringInterner::new();
    let a = interner.intern("Foo");
    let b = interner.intern("Foo");
    let c = interner.intern("foo");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 3);
}

#[test]
fn lookup_and_length() {
    let mut interner = StringInterner::new();
    let name = interner.intern("WriteString");
    assert_eq!(interner.lookup(name), "WriteString");
    assert_eq!(interner.length(name), 11);
}

#[test]
fn foreign_handle_resolves_to_empty() {
    let mut big = StringInterner::new();
    for i in 0..10 {
        big.intern(&format!("n{i}"));
    }
    let handle = big.intern("late");
    let small = StringInterner::new();
    assert_eq!(small.lookup(handle), "");
    assert_eq!(small.length(handle), 0);
}
