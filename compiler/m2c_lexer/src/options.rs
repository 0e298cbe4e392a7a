//! Lexer configuration.

use bitflags::bitflags;

bitflags! {
    /// Lexical modes fixed for the duration of one parse.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LexerOptions: u8 {
        /// Accept `$` inside identifiers (foreign identifiers).
        const DOLLAR_IDENTIFIERS = 1 << 0;
        /// Accept `_` inside identifiers (foreign identifiers).
        const LOWLINE_IDENTIFIERS = 1 << 1;
        /// Emit comments as symbols instead of discarding them.
        const PRESERVE_COMMENTS = 1 << 2;
    }
}

impl LexerOptions {
    /// Whether `b` may appear inside an identifier under these options.
    #[inline]
    pub fn allows_ident_separator(self, b: u8) -> bool {
        (b == b'_' && self.contains(LexerOptions::LOWLINE_IDENTIFIERS))
            || (b == b'$' && self.contains(LexerOptions::DOLLAR_IDENTIFIERS))
    }
}
