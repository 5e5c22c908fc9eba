//! Interned binding names with precomputed hash codes.
//!
//! The runtime does a lot of repetitive name lookups against environment
//! records; computing the hash once at construction lets every comparison
//! short-circuit on the hash before touching the text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;
use serde::{Serialize, Serializer};

/// A binding name paired with its precomputed ordinal hash.
///
/// Cheap to clone (the text is shared) and compared hash-first. The hash is
/// byte-exact over the UTF-8 text, never locale-aware.
#[derive(Clone, Debug)]
pub struct Key {
    name: Arc<str>,
    hash: u64,
}

fn ordinal_hash(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    hasher.finish()
}

impl Key {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            hash: ordinal_hash(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash_code(&self) -> u64 {
        self.hash
    }

    /// Test-only constructor that lets a collision be forced, so the
    /// text-comparison fallback in `PartialEq` stays covered.
    #[cfg(test)]
    fn with_hash(name: &str, hash: u64) -> Self {
        Self {
            name: Arc::from(name),
            hash,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        // Hash first; text decides on a (possible) collision.
        self.hash == other.hash && self.name == other.name
    }
}

impl Eq for Key {}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        *self.name == *other
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::new(&name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn equal_text_means_equal_keys_and_hashes() {
        let a = Key::new("counter");
        let b = Key::from(String::from("counter"));
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn distinct_text_means_unequal_keys() {
        assert_ne!(Key::new("x"), Key::new("y"));
    }

    #[test]
    fn forced_hash_collision_falls_back_to_text() {
        let a = Key::with_hash("alpha", 42);
        let b = Key::with_hash("beta", 42);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_across_clones() {
        let a = Key::new("value");
        let b = a.clone();
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(a, b);
    }

    #[test]
    fn compares_against_plain_text() {
        let key = Key::new("arguments");
        assert!(key == *"arguments");
        assert!(key != *"eval");
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = FxHashMap::default();
        map.insert(Key::new("x"), 1);
        map.insert(Key::new("y"), 2);
        assert_eq!(map.get(&Key::new("x")), Some(&1));
        assert_eq!(map.get(&Key::new("z")), None);
    }
}
