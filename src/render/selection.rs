use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use super::RenderKind;
use crate::attributes::{is_truthy, AttrValue, Attributes};
use crate::options::OptionEntry;

/// Value(s) rendered as selected/checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Selection {
    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Many(values.into_iter().map(Into::into).collect())
    }

    /// Empty text, "0" and empty sets count as no default
    pub fn is_set(&self) -> bool {
        match self {
            Selection::None => false,
            Selection::One(value) => is_truthy(value),
            Selection::Many(values) => !values.is_empty(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::None => false,
            Selection::One(default) => default == value,
            Selection::Many(defaults) => defaults.iter().any(|d| d == value),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::One(value.to_string())
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::One(value)
    }
}

impl From<Vec<String>> for Selection {
    fn from(values: Vec<String>) -> Self {
        Selection::Many(values)
    }
}

struct SelectionVisitor;

impl<'de> Visitor<'de> for SelectionVisitor {
    type Value = Selection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a default value or a list of default values")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Selection, E> {
        Ok(Selection::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Selection, E> {
        Ok(Selection::None)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Selection, E> {
        Ok(Selection::One(AttrValue::Flag(v).to_text()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Selection, E> {
        Ok(Selection::One(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Selection, E> {
        Ok(Selection::One(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Selection, E> {
        Ok(Selection::One(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Selection, E> {
        Ok(Selection::One(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Selection, A::Error> {
        let mut values = Vec::new();
        while let Some(value) = access.next_element::<AttrValue>()? {
            values.push(value.to_text());
        }
        Ok(Selection::Many(values))
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SelectionVisitor)
    }
}

/// `{selected: "selected"}` / `{checked: "checked"}` when `entry` is a default,
/// otherwise empty
pub fn selection_attribute(entry: &OptionEntry, kind: RenderKind, default: &Selection) -> Attributes {
    let value = entry.value();
    if !is_truthy(&value) || !default.is_set() {
        return Attributes::new();
    }

    let key = kind.selection_key();
    if default.matches(&value) {
        Attributes::new().with(key, key)
    } else {
        Attributes::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_default() {
        let default = Selection::from("b");
        let hit = selection_attribute(&OptionEntry::leaf("b", "B"), RenderKind::Radio, &default);
        assert_eq!(hit.to_html(), " checked=\"checked\"");

        let miss = selection_attribute(&OptionEntry::leaf("a", "A"), RenderKind::Radio, &default);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_set_default() {
        let default = Selection::many(["v1", "v3"]);
        let kind = RenderKind::Multiselect;
        assert!(!selection_attribute(&OptionEntry::leaf("v1", "1"), kind, &default).is_empty());
        assert!(selection_attribute(&OptionEntry::leaf("v2", "2"), kind, &default).is_empty());
        assert_eq!(
            selection_attribute(&OptionEntry::leaf("v3", "3"), kind, &default).to_html(),
            " selected=\"selected\""
        );
    }

    #[test]
    fn test_falsy_values_never_match() {
        let kind = RenderKind::Select;
        let empty = OptionEntry::leaf("", "None");
        assert!(selection_attribute(&empty, kind, &Selection::from("")).is_empty());

        let zero = OptionEntry::leaf("0", "Zero");
        assert!(selection_attribute(&zero, kind, &Selection::from("0")).is_empty());
        assert!(selection_attribute(&zero, kind, &Selection::many(["0"])).is_empty());
    }

    #[test]
    fn test_no_default() {
        let entry = OptionEntry::leaf("a", "A");
        assert!(selection_attribute(&entry, RenderKind::Select, &Selection::None).is_empty());
        assert!(selection_attribute(&entry, RenderKind::Select, &Selection::many(Vec::<String>::new())).is_empty());
    }

    #[test]
    fn test_deserialize() {
        assert_eq!(serde_json::from_str::<Selection>("null").unwrap(), Selection::None);
        assert_eq!(serde_json::from_str::<Selection>("7").unwrap(), Selection::from("7"));
        assert_eq!(
            serde_json::from_str::<Selection>(r#"["a", 2]"#).unwrap(),
            Selection::many(["a", "2"])
        );
    }
}
