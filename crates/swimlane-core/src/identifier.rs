//! Identifier management using string interning for efficient string storage and comparison
//!
//! Kind ids, subtype tags and element ids are all represented by [`Id`], so that
//! classification reduces to cheap symbol equality.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::Id;
///
/// let task = Id::new("userTask");
/// assert_eq!(task, "userTask");
///
/// let element = Id::indexed("userTask", 3);
/// assert_eq!(element, "userTask_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an id of the form `{prefix}_{idx}`.
    ///
    /// Used by diagrams to mint element and edge ids from their kind id.
    pub fn indexed(prefix: impl fmt::Display, idx: usize) -> Self {
        let name = format!("{prefix}_{idx}");
        Self::new(&name)
    }

    /// Returns the interned string as an owned `String`.
    pub fn to_owned_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(str_value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().get(other) == Some(self.0)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
