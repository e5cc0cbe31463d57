//! Interned identifiers for history tree records.
//!
//! Every record of a provenance history carries a stable [`Id`]. The history
//! is re-laid-out on every change, so identifiers are compared and hashed far
//! more often than they are printed; interning keeps both operations to a
//! single integer comparison.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide interner shared by all [`Id`] values.
///
/// # Thread Safety
///
/// Access goes through a `Mutex`; identifiers themselves are plain `Copy`
/// symbols and can be sent freely between threads.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Stable identifier of a history record.
///
/// # Examples
///
/// ```
/// use provtree_core::identifier::Id;
///
/// let root = Id::new("root");
/// let state = Id::from_sequence("state", 3);
///
/// assert_eq!(root, "root");
/// assert_eq!(state, "state-3");
/// assert_ne!(root, state);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its textual form.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an `Id` of the form `{prefix}-{index}`.
    ///
    /// Useful for histories whose records are numbered rather than named,
    /// e.g. states appended by a tracker.
    pub fn from_sequence(prefix: &str, index: usize) -> Self {
        Self::new(&format!("{prefix}-{index}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let name = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f.write_str(name)
        })
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Compares the identifier with its textual form: `id == "root"`.
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_some_and(|name| name == other)
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("root");
        let id2 = Id::new("root");
        let id3 = Id::new("state");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "root");
    }

    #[test]
    fn test_from_sequence() {
        let id1 = Id::from_sequence("s", 0);
        let id2 = Id::from_sequence("s", 1);
        let id3 = Id::from_sequence("s", 0);

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id2, "s-1");
    }

    #[test]
    fn test_display() {
        let id = Id::new("add-five");
        assert_eq!(format!("{id}"), "add-five");
        assert_eq!(id.to_string(), "add-five");
    }

    #[test]
    fn test_from_str_slice() {
        let id1: Id = "subtract".into();
        let id2 = Id::new("subtract");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("multiply");

        assert!(id == "multiply");
        assert!(id != "divide");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");

        let owned = String::from("multiply");
        assert!(id == owned.as_str());
    }
}
