//! Ordered HTML attribute bags
//!
//! Attributes keep insertion order. Overwriting a key replaces its value in
//! place, so a merged bag renders keys where they first appeared.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value: text or an HTML boolean attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Flag(bool),
}

impl AttrValue {
    /// Text form used when the value lands inside markup
    pub fn to_text(&self) -> String {
        match self {
            AttrValue::Text(s) => s.clone(),
            AttrValue::Flag(true) => "1".to_string(),
            AttrValue::Flag(false) => String::new(),
        }
    }

    /// False for `""`, `"0"` and `false`; everything else counts as set
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Text(s) => is_truthy(s),
            AttrValue::Flag(b) => *b,
        }
    }
}

/// Truthiness of a raw text value (empty and "0" are unset)
pub fn is_truthy(s: &str) -> bool {
    !s.is_empty() && s != "0"
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::Text(s) => serializer.serialize_str(s),
            AttrValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

struct AttrValueVisitor;

impl<'de> Visitor<'de> for AttrValueVisitor {
    type Value = AttrValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    // Sparse data reads as empty rather than failing the request
    fn visit_unit<E: de::Error>(self) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(String::new()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<AttrValue, E> {
        Ok(AttrValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttrValueVisitor)
    }
}

/// Insertion-ordered attribute map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text of `key`, if present
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(AttrValue::to_text)
    }

    /// Set `key`, keeping its position if it already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Attributes::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copy without the listed keys
    pub fn without(&self, keys: &[&str]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Overlay `other` on top of `self`; colliding keys take `other`'s value
    pub fn merge(&mut self, other: &Attributes) {
        for (k, v) in &other.entries {
            self.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AttrValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as ` key="value"` pairs.
    ///
    /// `true` renders as `key="key"`; `false` and empty text are omitted.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            match value {
                AttrValue::Flag(true) => {
                    out.push_str(&format!(" {key}=\"{key}\""));
                }
                AttrValue::Flag(false) => {}
                AttrValue::Text(s) if s.is_empty() => {}
                AttrValue::Text(s) => {
                    out.push_str(&format!(" {key}=\"{s}\""));
                }
            }
        }
        out
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct AttributesVisitor;

impl<'de> Visitor<'de> for AttributesVisitor {
    type Value = Attributes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of attributes or a list of boolean attribute names")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Attributes, E> {
        Ok(Attributes::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Attributes, E> {
        Ok(Attributes::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
        let mut attrs = Attributes::new();
        while let Some((key, value)) = access.next_entry::<String, AttrValue>()? {
            attrs.insert(key, value);
        }
        Ok(attrs)
    }

    // ["required", "disabled"] means required="required" disabled="disabled"
    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
        let mut attrs = Attributes::new();
        while let Some(name) = access.next_element::<String>()? {
            attrs.insert(name, true);
        }
        Ok(attrs)
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributesVisitor)
    }
}
