use std::collections::{hash_map, HashMap};

use crate::Prefix;

/// A set of cookie names mapped to their values.
///
/// A `CookieMap` is produced once per request by [`codec::decode()`] and is
/// not modified afterwards. Each name appears at most once: when a `Cookie`
/// header repeats a name, the last occurrence wins.
///
/// [`codec::decode()`]: crate::codec::decode()
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieMap {
    data: HashMap<String, String>,
}

impl CookieMap {
    /// Creates an empty `CookieMap`.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.data.insert(name.into(), value.into());
    }

    /// Returns the value of the cookie named `name`, if present.
    ///
    /// ```rust
    /// use cookie_guard::codec;
    ///
    /// let cookies = codec::decode(Some("theme=dark"));
    /// assert_eq!(cookies.get("theme"), Some("dark"));
    /// assert_eq!(cookies.get("lang"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    /// Returns the value of the cookie named `name` with `prefix` prepended.
    ///
    /// ```rust
    /// use cookie_guard::{codec, Prefix};
    ///
    /// let cookies = codec::decode(Some("__Host-id=42"));
    /// assert_eq!(cookies.get_prefixed(Prefix::Host, "id"), Some("42"));
    /// assert_eq!(cookies.get("id"), None);
    /// ```
    pub fn get_prefixed(&self, prefix: Prefix, name: &str) -> Option<&str> {
        self.get(&prefix.apply(name))
    }

    /// Returns `true` if a cookie named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// The number of cookies in `self`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if `self` holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.data.iter())
    }
}

/// Iterator over the `(name, value)` pairs of a [`CookieMap`].
#[derive(Debug)]
pub struct Iter<'a>(hash_map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a CookieMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CookieMap {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for CookieMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = CookieMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }

        map
    }
}
