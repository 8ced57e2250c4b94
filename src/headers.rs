//! Ordered, case-insensitive header map shared by requests and responses.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::HEADER_JOIN_SEPARATOR;

/// Canonical name of the content type header
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header names in insertion order, unique after ASCII case-folding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Insert a header. An existing entry with the same name (ignoring case)
    /// keeps its position but takes the new name and value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().trim().to_string();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Append a header, joining with any earlier value of the same name.
    pub fn append_joined(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().trim().to_string();
        let value = value.into();
        match self.position(&name) {
            Some(i) => {
                let existing = &mut self.entries[i].1;
                existing.push_str(HEADER_JOIN_SEPARATOR);
                existing.push_str(&value);
            }
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct HeaderMapVisitor;

impl<'de> Visitor<'de> for HeaderMapVisitor {
    type Value = HeaderMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of header names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderMap, A::Error> {
        let mut map = HeaderMap::new();
        while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(de::Error::custom(format!(
                        "value of header '{}' must be a string, number or boolean, got {}",
                        name.trim(),
                        json_kind(&other)
                    )))
                }
            };
            map.insert(name, value);
        }
        Ok(map)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HeaderMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_case_insensitively_in_place() {
        let mut map = HeaderMap::new();
        map.insert("Accept", "text/html");
        map.insert("X-Trace", "1");
        map.insert("accept", "application/json");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("ACCEPT"), Some("application/json"));
        let names: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["accept", "X-Trace"]);
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut map = HeaderMap::new();
        map.insert("  X-Id ", "7");
        assert_eq!(map.get("x-id"), Some("7"));
        assert_eq!(map.iter().next(), Some(("X-Id", "7")));
    }

    #[test]
    fn test_append_joined_keeps_every_value() {
        let mut map = HeaderMap::new();
        map.append_joined("Set-Cookie", "a=1");
        map.append_joined("set-cookie", "b=2");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Set-Cookie"), Some("a=1, b=2"));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let map: HeaderMap = [("Zeta", "1"), ("Alpha", "2"), ("Mid", "three")]
            .into_iter()
            .collect();
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"Zeta":"1","Alpha":"2","Mid":"three"}"#);
        let back: HeaderMap = serde_json::from_str(&text).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_deserialize_rejects_nested_values() {
        let err = serde_json::from_str::<HeaderMap>(r#"{"X-List": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("X-List"));
        assert!(err.to_string().contains("an array"));
    }
}
