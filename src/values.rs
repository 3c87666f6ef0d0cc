//! The ordered multi-map produced by encoding.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ser::encode::{encode_key, encode_value};

/// URL query values: string keys mapped to ordered lists of string values.
///
/// Keys keep the order in which they were first added, and the values for a
/// key keep the order in which they were added.
///
/// ```
/// use query_values::Values;
///
/// let mut values = Values::new();
/// values.add("q", "rust");
/// values.add("tag", "a");
/// values.add("tag", "b");
///
/// assert_eq!(values.get("q"), Some("rust"));
/// assert_eq!(values.get_all("tag"), ["a", "b"]);
/// assert_eq!(values.encode(), "q=rust&tag=a&tag=b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Values {
    inner: IndexMap<String, Vec<String>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the list for `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces any existing values for `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// The first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `key`, in insertion order. Empty if the key is absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Removes `key`, returning its values. Preserves the order of the
    /// remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.inner.shift_remove(key)
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterates over each key with all of its values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterates over every key/value pair, repeating keys with several values.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
    }

    /// Renders the values as a querystring using the default
    /// [`Config`](crate::Config).
    pub fn encode(&self) -> String {
        self.encode_with(crate::Config::default())
    }

    /// Renders the values as a querystring, escaping keys and values as
    /// configured.
    pub fn encode_with(&self, config: crate::Config) -> String {
        let form = config.form_encoding();
        let mut out = String::with_capacity(128);
        for (key, value) in self.pairs() {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&encode_key(key, form));
            out.push('=');
            out.push_str(&encode_value(value, form));
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.extend(iter);
        values
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Values {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl IntoIterator for Values {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Serializes as a map from each key to its list of values.
impl Serialize for Values {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, values) in self.iter() {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}
