//! Identifier management using string interning for efficient string storage and comparison
//!
//! Actor names are compared and hashed on every signal lookup, so they are
//! interned once into an [`Id`].

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use sequin_core::identifier::Id;
///
/// let client = Id::new("Client");
/// let server: Id = "Server".into();
///
/// assert_ne!(client, server);
/// assert_eq!(client, Id::new("Client"));
/// assert_eq!(server.to_string(), "Server");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
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
        let interner = interner().lock().expect("Failed to acquire interner lock");
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_once() {
        let id1 = Id::new("Backend");
        let id2 = Id::new("Backend");
        let id3 = Id::new("Frontend");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_compare_with_str() {
        let id = Id::new("Vianney");
        assert!(id == "Vianney");
        assert!(id != "Server");
        assert_eq!(id, "Vianney");
    }

    #[test]
    fn test_display_roundtrip() {
        let id: Id = "Database".into();
        assert_eq!(format!("{id}"), "Database");
    }
}
