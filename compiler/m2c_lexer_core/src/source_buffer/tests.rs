use std::io::Write;

use super::*;

// === Construction ===

#[test]
fn empty_source() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.as_bytes().is_empty());
    assert_eq!(buf.as_sentinel_bytes()[0], 0);
}

#[test]
fn ascii_source() {
    let buf = SourceBuffer::new("MODULE M;");
    assert_eq!(buf.len(), 9);
    assert_eq!(buf.as_bytes(), b"MODULE M;");
    assert_eq!(buf.as_str(), "MODULE M;");
    assert_eq!(buf.as_sentinel_bytes()[9], 0);
}

#[test]
fn buffer_aligned_to_cache_line() {
    for len in [0, 1, 10, 62, 63, 64, 65, 127, 128, 1000] {
        let source = "x".repeat(len);
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.as_sentinel_bytes().len() % CACHE_LINE, 0);
        assert!(buf.as_sentinel_bytes().len() > len);
    }
}

#[test]
fn line_text_lookup() {
    let buf = SourceBuffer::new("first\nsecond\r\nthird");
    assert_eq!(buf.line_text(1), Some("first"));
    assert_eq!(buf.line_text(2), Some("second"));
    assert_eq!(buf.line_text(3), Some("third"));
    assert_eq!(buf.line_text(4), None);
    assert_eq!(buf.line_text(0), None);
}

// === Opening Files ===

#[test]
fn from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("{e}"));
    let _ = write!(file, "MODULE Hello;\nEND Hello.\n");
    let buf = SourceBuffer::from_path(file.path()).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(buf.as_str(), "MODULE Hello;\nEND Hello.\n");
}

#[test]
fn from_path_missing_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let path = dir.path().join("Missing.mod");
    assert!(matches!(
        SourceBuffer::from_path(&path),
        Err(SourceError::NotFound { .. })
    ));
}

#[test]
fn from_path_rejects_empty_name() {
    assert!(matches!(
        SourceBuffer::from_path(Path::new("")),
        Err(SourceError::InvalidFilename { .. })
    ));
    assert!(matches!(
        SourceBuffer::from_path(Path::new("/")),
        Err(SourceError::InvalidFilename { .. })
    ));
}

#[test]
fn from_path_replaces_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("{e}"));
    let _ = file.write_all(&[b'a', 0xFF, b'b']);
    let buf = SourceBuffer::from_path(file.path()).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(buf.as_str(), "a\u{FFFD}b");
}

#[test]
fn source_error_messages() {
    let err = SourceError::NotFound {
        path: PathBuf::from("Foo.def"),
    };
    assert_eq!(err.to_string(), "source file `Foo.def` not found");
}
