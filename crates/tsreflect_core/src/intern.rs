//! String interning for identifier text.
//!
//! Identifiers and other frequently compared strings are interned to
//! enable O(1) comparison via integer IDs.

use lasso::{Key, Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned string identifier. This is a lightweight handle (u32)
/// that can be used to look up the actual string content.
///
/// Comparing two `InternedString` values is an O(1) integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    /// Create from a raw lasso key.
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the raw lasso key.
    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }

    /// Create a "dummy" interned string for placeholder purposes.
    #[inline]
    pub fn dummy() -> Self {
        Self(Spur::try_from_usize(0).unwrap())
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Stores one copy of each unique string and returns lightweight handles.
/// Cloning the interner is cheap; clones share the same backing store.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    /// Create a new string interner.
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning a handle to the interned value.
    /// If the string was already interned, returns the existing handle.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Intern a static string. More efficient than `intern` for literals.
    #[inline]
    pub fn intern_static(&self, s: &'static str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern_static(s))
    }

    /// Look up an already-interned string without interning it if absent.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    /// Resolve an interned string back to its text.
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.rodeo.resolve(&s.as_spur())
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_round_trip() {
        let interner = StringInterner::new();
        let a = interner.intern("name");
        let b = interner.intern("name");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "name");
    }

    #[test]
    fn distinct_strings_distinct_handles() {
        let interner = StringInterner::new();
        let a = interner.intern("Foo");
        let b = interner.intern("Bar");
        assert_ne!(a, b);
    }

    #[test]
    fn get_without_interning() {
        let interner = StringInterner::new();
        assert!(interner.get("absent").is_none());
        let a = interner.intern("present");
        assert_eq!(interner.get("present"), Some(a));
    }
}
