//! Fixed-width token bitsets.
//!
//! FIRST, FOLLOW and resync sets are built once, in `const` context, and are
//! read-only afterwards. Membership is a single bit test; the cardinality is
//! computed at construction and cached.
//!
//! The width is a const generic so one implementation serves any vocabulary
//! size; [`TokenSet`] fixes it to the number of segments [`Token::COUNT`]
//! needs.
//!
//! ```text
//! const FIRST_IMPORT: TokenSet = TokenSet::from_list(&[Token::Import, Token::From]);
//! const FOLLOW_IMPORT: TokenSet = TokenSet::union_of(&[FIRST_IMPORT, FIRST_BLOCK]);
//! ```

use std::fmt;

use crate::Token;

/// Bits per segment.
const SEGMENT_BITS: usize = u64::BITS as usize;

/// Number of `u64` segments needed to give every token its own bit.
pub const TOKEN_SEGMENTS: usize = Token::COUNT.div_ceil(SEGMENT_BITS);

/// Token set sized for the full vocabulary.
pub type TokenSet = SegmentSet<TOKEN_SEGMENTS>;

/// A set of tokens stored as `W` 64-bit segments plus a cached cardinality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentSet<const W: usize> {
    segments: [u64; W],
    count: u32,
}

impl<const W: usize> SegmentSet<W> {
    /// Highest bit position (exclusive) a member may occupy.
    const LIMIT: usize = if W * SEGMENT_BITS < Token::COUNT {
        W * SEGMENT_BITS
    } else {
        Token::COUNT
    };

    /// The empty set.
    pub const EMPTY: Self = Self {
        segments: [0; W],
        count: 0,
    };

    /// Build a set from an explicit token list. Duplicates are harmless.
    pub const fn from_list(tokens: &[Token]) -> Self {
        let mut segments = [0u64; W];
        let mut i = 0;
        while i < tokens.len() {
            let bit = tokens[i].index();
            if bit < Self::LIMIT {
                segments[bit / SEGMENT_BITS] |= 1 << (bit % SEGMENT_BITS);
            }
            i += 1;
        }
        Self::from_segments(segments)
    }

    /// Build a set from raw discriminant indices.
    ///
    /// Indices outside the vocabulary are silently excluded.
    pub const fn from_indices(indices: &[usize]) -> Self {
        let mut segments = [0u64; W];
        let mut i = 0;
        while i < indices.len() {
            let bit = indices[i];
            if bit < Self::LIMIT {
                segments[bit / SEGMENT_BITS] |= 1 << (bit % SEGMENT_BITS);
            }
            i += 1;
        }
        Self::from_segments(segments)
    }

    /// Segment-wise union of every set in `sets`.
    pub const fn union_of(sets: &[Self]) -> Self {
        let mut segments = [0u64; W];
        let mut i = 0;
        while i < sets.len() {
            let mut s = 0;
            while s < W {
                segments[s] |= sets[i].segments[s];
                s += 1;
            }
            i += 1;
        }
        Self::from_segments(segments)
    }

    /// This set plus one token.
    #[must_use]
    pub const fn with(self, token: Token) -> Self {
        let mut segments = self.segments;
        let bit = token.index();
        if bit < Self::LIMIT {
            segments[bit / SEGMENT_BITS] |= 1 << (bit % SEGMENT_BITS);
        }
        Self::from_segments(segments)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::union_of(&[self, other])
    }

    const fn from_segments(segments: [u64; W]) -> Self {
        let mut count = 0;
        let mut s = 0;
        while s < W {
            count += segments[s].count_ones();
            s += 1;
        }
        Self { segments, count }
    }

    /// Membership test.
    #[inline]
    pub const fn contains(&self, token: Token) -> bool {
        let bit = token.index();
        bit < Self::LIMIT && self.segments[bit / SEGMENT_BITS] & (1 << (bit % SEGMENT_BITS)) != 0
    }

    /// Whether every member of `self` is also in `other`.
    pub const fn is_subset_of(&self, other: &Self) -> bool {
        let mut s = 0;
        while s < W {
            if self.segments[s] & other.segments[s] != self.segments[s] {
                return false;
            }
            s += 1;
        }
        true
    }

    /// Whether `self` contains every member of `sub`.
    #[inline]
    pub const fn subset(&self, sub: &Self) -> bool {
        sub.is_subset_of(self)
    }

    pub const fn is_disjoint(&self, other: &Self) -> bool {
        let mut s = 0;
        while s < W {
            if self.segments[s] & other.segments[s] != 0 {
                return false;
            }
            s += 1;
        }
        true
    }

    /// Number of members.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Members in ascending discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(s, &segment)| SegmentBits { bits: segment }.map(move |b| s * SEGMENT_BITS + b))
            .filter_map(Token::from_index)
    }

    /// Readable member list for diagnostics: "`a`, `b` or `c`".
    pub fn phrase(&self) -> String {
        let names: Vec<String> = self.iter().map(Token::describe).collect();
        match names.as_slice() {
            [] => "nothing".to_owned(),
            [single] => single.clone(),
            [rest @ .., last] => format!("{} or {last}", rest.join(", ")),
        }
    }
}

impl<const W: usize> Default for SegmentSet<W> {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Set bit positions of one segment, lowest first.
struct SegmentBits {
    bits: u64,
}

impl Iterator for SegmentBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(bit)
    }
}

impl<const W: usize> fmt::Debug for SegmentSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for token in self.iter() {
            f.write_str(if first { " " } else { ", " })?;
            f.write_str(token.name())?;
            first = false;
        }
        f.write_str(" }")
    }
}

impl<const W: usize> fmt::Display for SegmentSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
