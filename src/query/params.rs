use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

use crate::codec::Encoder;
use crate::error::CodecError;

/// Decoded query parameters: each name maps to its values in the order they
/// were appended. Names are kept sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    params: BTreeMap<String, Vec<String>>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_default().push(value.into());
    }

    /// First value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.params.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.params.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.params
    }

    /// `name=value` pairs joined by `&`, one pair per value. Names with an
    /// empty value are written as `name=`.
    pub fn to_query_string(&self, encoder: &Encoder) -> Result<String, CodecError> {
        let mut out = String::new();
        for (name, values) in &self.params {
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                encoder.encode_into(name, &mut out)?;
                out.push('=');
                encoder.encode_into(value, &mut out)?;
            }
        }
        Ok(out)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = ParameterMap::new();
        for (name, value) in iter {
            params.append(name, value);
        }
        params
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
