// crates/upy-shim-plist/src/value.rs

//! Public data structures for representing a parsed property list.

use alloc::string::String;
use alloc::vec::Vec;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// --- Plist Value Tree ---

/// A single node of a parsed plist document.
///
/// The tree is built bottom-up by the parser: every child is complete before
/// it is inserted into its parent, and nothing refers back into the XML
/// source once parsing has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    /// `<dict>`: insertion-ordered mapping from key to value.
    Dictionary(Dictionary),
    /// `<array>`: values in document order.
    Array(Vec<PlistValue>),
    /// `<string>`: may be empty.
    String(String),
    /// `<integer>`: signed base-10 integer.
    Integer(i64),
    /// `<true/>` or `<false/>`.
    Boolean(bool),
    /// `<data>`: raw element text. Base64 decoding is left to the caller.
    Data(String),
}

impl PlistValue {
    /// Returns the dictionary if this value is a `Dictionary`.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            PlistValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the elements if this value is an `Array`.
    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text if this value is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PlistValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PlistValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the undecoded element text if this value is `Data`.
    pub fn as_data(&self) -> Option<&str> {
        match self {
            PlistValue::Data(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a `Dictionary`.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }
}

impl From<Dictionary> for PlistValue {
    fn from(dict: Dictionary) -> Self {
        PlistValue::Dictionary(dict)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(items: Vec<PlistValue>) -> Self {
        PlistValue::Array(items)
    }
}

impl From<String> for PlistValue {
    fn from(s: String) -> Self {
        PlistValue::String(s)
    }
}

impl From<&str> for PlistValue {
    fn from(s: &str) -> Self {
        PlistValue::String(s.into())
    }
}

impl From<i64> for PlistValue {
    fn from(i: i64) -> Self {
        PlistValue::Integer(i)
    }
}

impl From<bool> for PlistValue {
    fn from(b: bool) -> Self {
        PlistValue::Boolean(b)
    }
}

// --- Dictionary ---

/// An insertion-ordered string-keyed map.
///
/// Re-inserting an existing key replaces its value in place, so the key keeps
/// the position of its first occurrence while the last value wins. Two
/// dictionaries are equal only if their entries match in the same order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: IndexMap<String, PlistValue>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: PlistValue) -> Option<PlistValue> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Dictionary {}

/// Borrowing iterator over a [`Dictionary`].
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, PlistValue>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a PlistValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a str, &'a PlistValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, PlistValue);
    type IntoIter = indexmap::map::IntoIter<String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, PlistValue)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, PlistValue)>>(iter: T) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.insert(key.into(), value);
        }
        dict
    }
}

// --- Serde Support ---

impl Serialize for PlistValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlistValue::Dictionary(dict) => dict.serialize(serializer),
            PlistValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PlistValue::String(s) | PlistValue::Data(s) => serializer.serialize_str(s),
            PlistValue::Integer(i) => serializer.serialize_i64(*i),
            PlistValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
