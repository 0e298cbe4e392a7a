//! Per-parse string interner.
//!
//! Every lexeme a parse produces is stored once in a single arena owned by
//! that parse. Handles are plain indices, so equality of two [`Name`]s is
//! equality of the strings they denote. The whole arena is dropped together
//! when the parse result is dropped.

use rustc_hash::FxHashMap;

/// Handle to an interned string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u32);

impl Name {
    /// The empty string, pre-interned in every interner.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// String arena keyed by content.
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut interner = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        interner.intern("");
        interner
    }

    /// Intern `s`, returning the existing handle when it was seen before.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let index = u32::try_from(self.strings.len()).unwrap_or(u32::MAX);
        let name = Name(index);
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Handle for `s` if it has been interned.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// String for `name`. Handles from another interner resolve to `""`.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| s)
    }

    /// Byte length of the string for `name`.
    pub fn length(&self, name: Name) -> usize {
        self.lookup(name).len()
    }

    /// Number of distinct strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.strings.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
