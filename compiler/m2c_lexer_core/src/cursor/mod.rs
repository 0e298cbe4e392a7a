//! Cursor over a sentinel-terminated buffer with line and column tracking.
//!
//! EOF is the sentinel byte at `pos >= source_len`; interior NUL bytes are
//! distinguished by position. Line and column are 1-based; the column counts
//! bytes from the start of the line.

/// Read position in a [`SourceBuffer`](crate::SourceBuffer).
///
/// The cursor is [`Copy`], so saving and restoring it is a plain assignment.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
    line: u32,
    /// Byte offset of the first character of the current line.
    line_start: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        Cursor {
            buf,
            pos: 0,
            source_len,
            line: 1,
            line_start: 0,
        }
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(1))
    }

    /// Byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(2))
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        if pos < self.source_len {
            self.buf[pos as usize]
        } else {
            0
        }
    }

    /// Consume one byte, starting a new line after `\n`.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos >= self.source_len {
            return;
        }
        if self.current() == b'\n' {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    /// Consume `n` bytes.
    pub fn advance_n(&mut self, n: u32) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Byte length of the UTF-8 sequence introduced by `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Consume one full UTF-8 character.
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Character starting at the current position.
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let width = Self::utf8_char_width(self.current());
        let end = self.pos.saturating_add(width).min(self.source_len);
        self.slice(self.pos, end).chars().next()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.pos - self.line_start + 1
    }

    /// Whether the cursor sits on the first byte of a line.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.pos == self.line_start
    }

    /// Source text between two byte offsets.
    ///
    /// Offsets not on character boundaries yield `""`.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or_default()
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Consume bytes while `pred` holds.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Consume blanks, tabs and line terminators.
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C));
    }

    /// Advance to the next `\n` or EOF without consuming the newline.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset is bounded by source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr(b'\n', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Skip whole lines until one starts with `first` `second`.
    ///
    /// Returns `true` with the cursor on that line's first byte, or `false`
    /// with the cursor at EOF.
    pub fn skip_to_line_starting_with(&mut self, first: u8, second: u8) -> bool {
        loop {
            self.eat_until_newline_or_eof();
            if self.is_eof() {
                return false;
            }
            self.advance();
            if self.current() == first && self.peek() == second {
                return true;
            }
        }
    }
}
