//! Render requests as read from files or stdin

use anyhow::{Context, Result};
use clap::ValueEnum;
use html_options::{AttrValue, Attributes, RawOptions, RenderKind, RenderRequest, Selection};
use serde::Deserialize;
use std::path::Path;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Guess from the file extension; JSON unless it says toml
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => InputFormat::Toml,
            _ => InputFormat::Json,
        }
    }
}

/// A request document; `kind` may be left to the config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub kind: Option<RenderKind>,
    #[serde(default)]
    pub default: Selection,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub options: RawOptions,
}

impl RequestDocument {
    pub fn parse(content: &str, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Json => serde_json::from_str(content).context("Invalid JSON request"),
            InputFormat::Toml => toml::from_str(content).context("Invalid TOML request"),
        }
    }

    /// Build the final request: config attributes sit under the document's
    pub fn into_request(self, config: &AppConfig) -> RenderRequest {
        let mut attributes = config.attributes.clone();
        attributes.merge(&self.attributes);

        RenderRequest {
            kind: self.kind.unwrap_or(config.default_kind),
            default: self.default,
            attributes,
            options: self.options,
        }
    }
}

/// Parse `key=value` (text) or a bare `key` (boolean attribute)
pub fn parse_attr(arg: &str) -> Result<(String, AttrValue)> {
    let (key, value) = match arg.split_once('=') {
        Some((key, value)) => (key.trim(), AttrValue::Text(value.to_string())),
        None => (arg.trim(), AttrValue::Flag(true)),
    };
    if key.is_empty() {
        anyhow::bail!("Attribute `{}` has no name", arg);
    }
    Ok((key.to_string(), value))
}

/// One `--default` is a single value, several form a set
pub fn selection_from_args(values: &[String]) -> Option<Selection> {
    match values {
        [] => None,
        [one] => Some(Selection::One(one.clone())),
        many => Some(Selection::Many(many.to_vec())),
    }
}
