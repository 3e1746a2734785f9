//! Case-insensitive header and cookie collections plus the fixed skip sets.
//!
//! # Design Decisions
//! - Keys compare with ASCII case folding; the casing of the first insert is kept
//! - Insertion order is preserved so folded cookies and joined values are stable
//! - Skip sets are compile-time constants, never mutated

/// Insertion-ordered map with case-insensitive string keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseInsensitiveMap<V> {
    entries: Vec<(String, V)>,
}

/// Multi-valued header collection.
pub type HeaderBag = CaseInsensitiveMap<Vec<String>>;

/// Cookie name to value.
pub type CookieJar = CaseInsensitiveMap<String>;

/// Header collection with values already joined by `, `.
pub type FlatHeaders = CaseInsensitiveMap<String>;

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    /// Insert or replace the value stored under `key`.
    ///
    /// A replaced entry keeps its position and original key casing.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Insert only if the key is not present yet. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for CaseInsensitiveMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for CaseInsensitiveMap<V> {
    /// Later duplicates of a key replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl HeaderBag {
    /// Append one value to `key`, creating the entry if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// All values of `key` joined with `, `.
    pub fn get_joined(&self, key: &str) -> Option<String> {
        self.get(key).map(|values| values.join(", "))
    }
}

/// A closed set of header names matched case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct SkipSet(&'static [&'static str]);

impl SkipSet {
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.0
    }
}

/// Name of the directive header carrying the destination URL.
pub const FORWARD_URL_HEADER: &str = "x-forward-url";

/// Inbound headers never copied to the downstream request.
pub const REQUEST_SKIP: SkipSet = SkipSet::new(&[
    "host",
    FORWARD_URL_HEADER,
    "content-length",
    "transfer-encoding",
    "connection",
]);

/// Downstream headers never relayed back to the caller.
pub const RESPONSE_SKIP: SkipSet = SkipSet::new(&[
    "transfer-encoding",
    "connection",
    "upgrade",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "content-length",
    "content-type",
]);

/// Representation headers that describe a body rather than the message.
pub const CONTENT_HEADERS: SkipSet = SkipSet::new(&[
    "allow",
    "content-disposition",
    "content-encoding",
    "content-language",
    "content-length",
    "content-location",
    "content-md5",
    "content-range",
    "content-type",
    "expires",
    "last-modified",
]);
