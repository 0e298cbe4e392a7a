//! Character source for the m2c lexer.
//!
//! Standalone: no other `m2c_*` crate is needed to read a file and walk it
//! byte by byte with line and column positions.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::{SourceBuffer, SourceError};
