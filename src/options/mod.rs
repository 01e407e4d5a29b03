//! Option lists and their normalization
//!
//! Callers hand options over either as a list of labels, a value => label
//! map, or a list of pre-built option maps (which is also how groups are
//! expressed). Everything is normalized to a list of [`OptionEntry`] maps
//! before rendering.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use crate::attributes::{AttrValue, Attributes};

/// `type` value that marks a pseudo-option as a group boundary
pub const GROUP_MARKER: &str = "optgroup";

/// Alternative spelling of [`GROUP_MARKER`]
pub const GROUP_MARKER_ALIAS: &str = "group-marker";

/// Label of a group marker that closes the current group
pub const GROUP_END: &str = "__end__";

/// A normalized option: an ordered map carrying at least `value` and `label`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionEntry(Attributes);

impl OptionEntry {
    /// A selectable value/label pair
    pub fn leaf(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self(
            Attributes::new()
                .with("value", value.into())
                .with("label", label.into()),
        )
    }

    /// Marker opening a group titled `label`
    pub fn group(label: impl Into<String>) -> Self {
        Self(
            Attributes::new()
                .with("type", GROUP_MARKER)
                .with("label", label.into()),
        )
    }

    /// Marker closing the open group
    pub fn group_end() -> Self {
        Self::group(GROUP_END)
    }

    /// Add an extra key (`disabled`, `id`, `option_before`, ...)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.0.insert(key, value);
        self
    }

    /// Missing values read as empty
    pub fn value(&self) -> String {
        self.0.text("value").unwrap_or_default()
    }

    pub fn label(&self) -> String {
        self.0.text("label").unwrap_or_default()
    }

    pub fn is_group_marker(&self) -> bool {
        matches!(
            self.0.text("type").as_deref(),
            Some(GROUP_MARKER) | Some(GROUP_MARKER_ALIAS)
        )
    }

    pub fn is_group_end(&self) -> bool {
        self.is_group_marker() && self.0.text("label").as_deref() == Some(GROUP_END)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.0
    }
}

impl From<Attributes> for OptionEntry {
    fn from(attrs: Attributes) -> Self {
        Self(attrs)
    }
}

/// One caller-supplied option before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOption {
    /// A bare label (its value comes from the index or map key)
    Scalar(String),
    /// An already-normalized option or group marker
    Mapped(OptionEntry),
}

impl From<&str> for RawOption {
    fn from(s: &str) -> Self {
        RawOption::Scalar(s.to_string())
    }
}

impl From<String> for RawOption {
    fn from(s: String) -> Self {
        RawOption::Scalar(s)
    }
}

impl From<OptionEntry> for RawOption {
    fn from(entry: OptionEntry) -> Self {
        RawOption::Mapped(entry)
    }
}

struct RawOptionVisitor;

impl<'de> Visitor<'de> for RawOptionVisitor {
    type Value = RawOption;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an option label or an option map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(String::new()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(AttrValue::Flag(v).to_text()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawOption, E> {
        Ok(RawOption::Scalar(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawOption, A::Error> {
        let mut attrs = Attributes::new();
        while let Some((key, value)) = access.next_entry::<String, AttrValue>()? {
            attrs.insert(key, value);
        }
        Ok(RawOption::Mapped(OptionEntry(attrs)))
    }
}

impl<'de> Deserialize<'de> for RawOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawOptionVisitor)
    }
}

/// The two input shapes an option list can arrive in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOptions {
    /// `["Red", "Green"]`
    Indexed(Vec<RawOption>),
    /// `{"r": "Red", "g": "Green"}`, in insertion order
    Associative(Vec<(String, RawOption)>),
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions::Indexed(Vec::new())
    }
}

impl RawOptions {
    pub fn indexed<I, O>(items: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<RawOption>,
    {
        RawOptions::Indexed(items.into_iter().map(Into::into).collect())
    }

    pub fn associative<I, K, O>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, O)>,
        K: Into<String>,
        O: Into<RawOption>,
    {
        RawOptions::Associative(
            items
                .into_iter()
                .map(|(k, o)| (k.into(), o.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            RawOptions::Indexed(items) => items.len(),
            RawOptions::Associative(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when key `0` and key `len - 1` both exist.
    ///
    /// A map keyed `"0".."n-1"` therefore counts as indexed too, and its
    /// labels double as values.
    pub fn is_indexed(&self) -> bool {
        match self {
            RawOptions::Indexed(items) => !items.is_empty(),
            RawOptions::Associative(items) => {
                let last = items.len().saturating_sub(1).to_string();
                let has = |key: &str| items.iter().any(|(k, _)| k == key);
                !items.is_empty() && has("0") && has(&last)
            }
        }
    }
}

struct RawOptionsVisitor;

impl<'de> Visitor<'de> for RawOptionsVisitor {
    type Value = RawOptions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of options or a map of value => label")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawOptions, E> {
        Ok(RawOptions::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<RawOptions, E> {
        Ok(RawOptions::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<RawOptions, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = access.next_element::<RawOption>()? {
            items.push(item);
        }
        Ok(RawOptions::Indexed(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawOptions, A::Error> {
        let mut items = Vec::new();
        while let Some(entry) = access.next_entry::<String, RawOption>()? {
            items.push(entry);
        }
        Ok(RawOptions::Associative(items))
    }
}

impl<'de> Deserialize<'de> for RawOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawOptionsVisitor)
    }
}

/// Normalize caller options into [`OptionEntry`] maps.
///
/// If the first option is already a map the list is taken as normalized and
/// passed through. Otherwise each label becomes `{value, label}`, where the
/// value is the label itself for indexed input and the key for associative
/// input.
pub fn normalize(raw: &RawOptions) -> Vec<OptionEntry> {
    if raw.is_empty() {
        return Vec::new();
    }

    let indexed = raw.is_indexed();
    let items: Vec<(String, &RawOption)> = match raw {
        RawOptions::Indexed(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        RawOptions::Associative(items) => items.iter().map(|(k, item)| (k.clone(), item)).collect(),
    };

    let pass_through = matches!(items.first(), Some((_, RawOption::Mapped(_))));

    items
        .into_iter()
        .map(|(key, item)| match item {
            RawOption::Mapped(entry) => {
                if !pass_through {
                    tracing::warn!("option map `{}` mixed into a label list", key);
                }
                entry.clone()
            }
            RawOption::Scalar(label) => {
                if pass_through {
                    tracing::warn!("bare label `{}` mixed into a normalized list", label);
                    return OptionEntry::leaf(label.as_str(), label.as_str());
                }
                let value = if indexed { label.clone() } else { key };
                OptionEntry::leaf(value, label.as_str())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&RawOptions::default()).is_empty());
        assert!(normalize(&RawOptions::Associative(Vec::new())).is_empty());
    }

    #[test]
    fn test_normalize_associative() {
        let options = normalize(&RawOptions::associative([("v1", "l1"), ("v2", "l2")]));
        assert_eq!(
            options,
            vec![OptionEntry::leaf("v1", "l1"), OptionEntry::leaf("v2", "l2")]
        );
    }

    #[test]
    fn test_normalize_indexed_uses_label_as_value() {
        let options = normalize(&RawOptions::indexed(["l1", "l2"]));
        assert_eq!(
            options,
            vec![OptionEntry::leaf("l1", "l1"), OptionEntry::leaf("l2", "l2")]
        );
    }

    #[test]
    fn test_numeric_keys_count_as_indexed() {
        let raw = RawOptions::associative([("0", "Zero"), ("1", "One")]);
        assert!(raw.is_indexed());
        assert_eq!(normalize(&raw)[1], OptionEntry::leaf("One", "One"));

        // "0" present but the last key is not len - 1
        let raw = RawOptions::associative([("0", "Zero"), ("5", "Five")]);
        assert!(!raw.is_indexed());
        assert_eq!(normalize(&raw)[1], OptionEntry::leaf("5", "Five"));
    }

    #[test]
    fn test_mapped_options_pass_through() {
        let entries = vec![
            OptionEntry::group("Warm"),
            OptionEntry::leaf("r", "Red").with("disabled", true),
            OptionEntry::group_end(),
        ];
        let raw = RawOptions::indexed(entries.clone());
        let once = normalize(&raw);
        assert_eq!(once, entries);

        let twice = normalize(&RawOptions::indexed(once.clone()));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_missing_value_and_label_default_to_empty() {
        let entry = OptionEntry::from(Attributes::new().with("disabled", true));
        assert_eq!(entry.value(), "");
        assert_eq!(entry.label(), "");
        assert!(!entry.is_group_marker());
    }

    #[test]
    fn test_group_markers() {
        assert!(OptionEntry::group("Warm").is_group_marker());
        assert!(!OptionEntry::group("Warm").is_group_end());
        assert!(OptionEntry::group_end().is_group_end());

        let alias = OptionEntry::from(
            Attributes::new()
                .with("type", GROUP_MARKER_ALIAS)
                .with("label", GROUP_END),
        );
        assert!(alias.is_group_end());
    }

    #[test]
    fn test_deserialize_nulls_as_empty() {
        let raw: RawOptions = serde_json::from_str(r#"["Red", null]"#).unwrap();
        assert_eq!(raw, RawOptions::indexed(["Red", ""]));

        let raw: RawOptions = serde_json::from_str(r#"[{"value": "a", "label": null}]"#).unwrap();
        let options = normalize(&raw);
        assert_eq!(options[0].value(), "a");
        assert_eq!(options[0].label(), "");

        let raw: RawOptions = serde_json::from_str("null").unwrap();
        assert!(normalize(&raw).is_empty());
    }

    #[test]
    fn test_deserialize_shapes() {
        let raw: RawOptions = serde_json::from_str(r#"{"r": "Red", "g": "Green"}"#).unwrap();
        assert_eq!(raw, RawOptions::associative([("r", "Red"), ("g", "Green")]));

        let raw: RawOptions = serde_json::from_str(r#"["Red", 2]"#).unwrap();
        assert_eq!(raw, RawOptions::indexed(["Red", "2"]));

        let raw: RawOptions =
            serde_json::from_str(r#"[{"type": "optgroup", "label": "Warm"}, {"value": "r", "label": "Red"}]"#)
                .unwrap();
        assert_eq!(
            normalize(&raw),
            vec![OptionEntry::group("Warm"), OptionEntry::leaf("r", "Red")]
        );
    }
}
