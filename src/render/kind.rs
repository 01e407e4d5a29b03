//! Render kinds and their markup templates
//!
//! Each kind has one template for a leaf option, one for opening a group and
//! one for closing it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attributes::Attributes;
use crate::error::RenderError;
use crate::options::OptionEntry;

/// The flavor of form input being rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RenderKind {
    #[default]
    Select,
    Multiselect,
    Radio,
    CheckboxList,
}

impl RenderKind {
    pub const ALL: [RenderKind; 4] = [
        RenderKind::Select,
        RenderKind::Multiselect,
        RenderKind::Radio,
        RenderKind::CheckboxList,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderKind::Select => "select",
            RenderKind::Multiselect => "multiselect",
            RenderKind::Radio => "radio",
            RenderKind::CheckboxList => "checkbox_list",
        }
    }

    /// Attribute that marks a default option: `selected` or `checked`
    pub fn selection_key(self) -> &'static str {
        match self {
            RenderKind::Select | RenderKind::Multiselect => "selected",
            RenderKind::Radio | RenderKind::CheckboxList => "checked",
        }
    }

    /// Whether each option inherits the top-level attributes (`name`, `id`, ...)
    pub fn inherits_attributes(self) -> bool {
        matches!(self, RenderKind::Radio | RenderKind::CheckboxList)
    }

    /// Markup for one leaf option; `attrs` are already derived
    pub(crate) fn single(self, entry: &OptionEntry, attrs: &Attributes) -> String {
        let value = entry.value();
        let label = entry.label();
        let attrs = attrs.to_html();
        match self {
            RenderKind::Select | RenderKind::Multiselect => {
                format!("<option value=\"{value}\"{attrs}>{label}</option>")
            }
            RenderKind::Radio => {
                format!("<label><input type=\"radio\" value=\"{value}\"{attrs}/> {label}</label>")
            }
            RenderKind::CheckboxList => {
                format!("<label><input type=\"checkbox\" value=\"{value}\"{attrs}/> {label}</label>")
            }
        }
    }

    pub(crate) fn group_start(self, entry: &OptionEntry) -> String {
        let label = entry.label();
        let attrs = entry.attributes().without(&["type", "label"]).to_html();
        match self {
            RenderKind::Select | RenderKind::Multiselect => {
                format!("<optgroup label=\"{label}\"{attrs}>")
            }
            RenderKind::Radio | RenderKind::CheckboxList => {
                format!("<div><label{attrs}>{label}</label><br/>")
            }
        }
    }

    pub(crate) fn group_end(self) -> &'static str {
        match self {
            RenderKind::Select | RenderKind::Multiselect => "</optgroup>",
            RenderKind::Radio | RenderKind::CheckboxList => "</div>",
        }
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "select" | "dropdown" => Ok(RenderKind::Select),
            "multiselect" => Ok(RenderKind::Multiselect),
            "radio" => Ok(RenderKind::Radio),
            "checkbox_list" | "checkboxList" | "checkbox-list" => Ok(RenderKind::CheckboxList),
            other => Err(RenderError::UnsupportedKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for RenderKind {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RenderKind> for String {
    fn from(kind: RenderKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        for kind in RenderKind::ALL {
            assert_eq!(kind.as_str().parse::<RenderKind>().unwrap(), kind);
        }
        assert_eq!("dropdown".parse::<RenderKind>().unwrap(), RenderKind::Select);
        assert_eq!("checkboxList".parse::<RenderKind>().unwrap(), RenderKind::CheckboxList);
    }

    #[test]
    fn test_unsupported_kind_names_the_kind() {
        let err = "button".parse::<RenderKind>().unwrap_err();
        assert_eq!(err, RenderError::UnsupportedKind("button".to_string()));
        assert!(err.to_string().contains("button"));
    }

    #[test]
    fn test_deserialize_unsupported_kind() {
        let err = serde_json::from_str::<RenderKind>(r#""textarea""#).unwrap_err();
        assert!(err.to_string().contains("textarea"));
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(RenderKind::Select.selection_key(), "selected");
        assert_eq!(RenderKind::Multiselect.selection_key(), "selected");
        assert_eq!(RenderKind::Radio.selection_key(), "checked");
        assert_eq!(RenderKind::CheckboxList.selection_key(), "checked");
    }

    #[test]
    fn test_leaf_templates() {
        let entry = OptionEntry::leaf("r", "Red");
        let attrs = Attributes::new().with("disabled", true);
        assert_eq!(
            RenderKind::Select.single(&entry, &attrs),
            "<option value=\"r\" disabled=\"disabled\">Red</option>"
        );
        assert_eq!(
            RenderKind::Radio.single(&entry, &Attributes::new()),
            "<label><input type=\"radio\" value=\"r\"/> Red</label>"
        );
        assert_eq!(
            RenderKind::CheckboxList.single(&entry, &Attributes::new()),
            "<label><input type=\"checkbox\" value=\"r\"/> Red</label>"
        );
    }

    #[test]
    fn test_group_templates() {
        let group = OptionEntry::group("Warm").with("class", "warm");
        assert_eq!(
            RenderKind::Multiselect.group_start(&group),
            "<optgroup label=\"Warm\" class=\"warm\">"
        );
        assert_eq!(
            RenderKind::CheckboxList.group_start(&group),
            "<div><label class=\"warm\">Warm</label><br/>"
        );
        assert_eq!(RenderKind::Select.group_end(), "</optgroup>");
        assert_eq!(RenderKind::Radio.group_end(), "</div>");
    }
}
