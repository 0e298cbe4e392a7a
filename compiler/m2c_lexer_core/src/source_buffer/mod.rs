//! Sentinel-terminated source buffer.
//!
//! The buffer appends a `0x00` sentinel after the source content and pads the
//! allocation to the next 64-byte boundary, so the cursor can look up to two
//! bytes ahead anywhere without bounds checks failing.
//!
//! ```text
//! [source_bytes..., 0x00, padding_zeros...]
//!  ^                ^     ^
//!  0                |     rounded up to 64-byte boundary
//!              source_len (sentinel)
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Failure to obtain source text for a parse.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid source file name `{}`", path.display())]
    InvalidFilename { path: PathBuf },

    #[error("source file `{}` not found", path.display())]
    NotFound { path: PathBuf },

    #[error("access to source file `{}` denied", path.display())]
    AccessDenied { path: PathBuf },

    #[error("device error reading `{}`: {source}", path.display())]
    Device {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot allocate {bytes} bytes for source buffer")]
    Allocation { bytes: usize },
}

/// Owned, sentinel-terminated copy of one source file.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[source_bytes..., 0x00 sentinel, 0x00 padding...]`
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Buffer over in-memory source text.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let mut buf = vec![0u8; padded_len(source_bytes.len())];
        buf[..source_bytes.len()].copy_from_slice(source_bytes);
        SourceBuffer {
            buf,
            source_len: u32::try_from(source_bytes.len()).unwrap_or(u32::MAX),
        }
    }

    /// Read the file at `path` into a new buffer.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, which the
    /// lexer then reports as illegal characters.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        if path.as_os_str().is_empty() || path.file_name().is_none() {
            return Err(SourceError::InvalidFilename {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => SourceError::AccessDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidInput => SourceError::InvalidFilename {
                path: path.to_path_buf(),
            },
            _ => SourceError::Device {
                path: path.to_path_buf(),
                source: err,
            },
        })?;
        debug!(path = %path.display(), len = bytes.len(), "read source file");

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };

        let len = padded_len(text.len());
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| SourceError::Allocation { bytes: len })?;
        buf.extend_from_slice(text.as_bytes());
        buf.resize(len, 0);

        Ok(SourceBuffer {
            buf,
            source_len: u32::try_from(text.len()).unwrap_or(u32::MAX),
        })
    }

    /// Source bytes without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Source text without sentinel or padding.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Full buffer including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Cursor positioned at line 1, column 1.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Text of 1-based line `line` without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.as_str().lines().nth(index)
    }
}

/// Source length plus sentinel, rounded up to the next cache line.
fn padded_len(source_len: usize) -> usize {
    (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1)
}

#[cfg(test)]
mod tests;
