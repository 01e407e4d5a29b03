//! Option list rendering
//!
//! A [`RenderRequest`] is rendered in three passes: the options are
//! normalized, the normalized list is walked with a fresh [`RenderState`]
//! (opening and closing groups as markers go by), and the result is wrapped
//! in the kind's outer markup.

pub mod kind;
pub mod selection;
pub mod state;

pub use kind::RenderKind;
pub use selection::{selection_attribute, Selection};
pub use state::{GroupState, RenderState, Step};

use crate::attributes::{AttrValue, Attributes};
use crate::options::{normalize, OptionEntry, RawOptions};

/// Keys that wrap a leaf instead of becoming attributes
const ENCLOSE_KEYS: [&str; 2] = ["option_before", "option_after"];

/// Top-level keys the renderer places itself and never copies onto inputs
const ENGINE_KEYS: [&str; 5] = ["label", "type", "value", "option_before", "option_after"];

/// Everything needed to render one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub kind: RenderKind,
    /// Selected/checked value(s)
    pub default: Selection,
    pub attributes: Attributes,
    pub options: RawOptions,
}

impl RenderRequest {
    pub fn new(kind: RenderKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default: impl Into<Selection>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_options(mut self, options: RawOptions) -> Self {
        self.options = options;
        self
    }
}

/// Render the full input: label, then the kind's outer markup around the options
pub fn render(request: &RenderRequest) -> String {
    let options = normalize(&request.options);
    let body = render_options(request.kind, &request.default, &request.attributes, &options);

    let mut html = render_label(&request.attributes);
    match request.kind {
        RenderKind::Select => {
            let attrs = request.attributes.without(&["label", "option_before", "option_after"]);
            html.push_str(&format!("<select{}>{}</select>", attrs.to_html(), body));
        }
        RenderKind::Multiselect => {
            let attrs = request
                .attributes
                .without(&["label", "option_before", "option_after", "multiple"]);
            html.push_str(&format!(
                "<select{} multiple=\"multiple\">{}</select>",
                attrs.to_html(),
                body
            ));
        }
        RenderKind::Radio | RenderKind::CheckboxList => html.push_str(&body),
    }

    tracing::debug!("Rendered {} with {} options", request.kind, options.len());
    html
}

/// Render a normalized option list without any outer wrapper
pub fn render_options(
    kind: RenderKind,
    default: &Selection,
    attributes: &Attributes,
    options: &[OptionEntry],
) -> String {
    let mut state = RenderState::default();
    let mut html = String::new();

    for entry in options {
        let (next, steps) = state.group.advance(entry);
        for step in steps {
            match step {
                Step::CloseGroup => html.push_str(kind.group_end()),
                Step::OpenGroup => html.push_str(&kind.group_start(entry)),
                Step::Leaf => html.push_str(&render_leaf(entry, &mut state, kind, default, attributes)),
            }
        }
        if next != state.group {
            tracing::trace!("group state {:?} -> {:?}", state.group, next);
        }
        state.group = next;
    }

    for _ in state.group.finish() {
        html.push_str(kind.group_end());
    }

    html
}

fn render_leaf(
    entry: &OptionEntry,
    state: &mut RenderState,
    kind: RenderKind,
    default: &Selection,
    attributes: &Attributes,
) -> String {
    let attrs = option_attributes(entry, state, kind, attributes, default);
    format!(
        "{}{}{}",
        enclose(entry, attributes, "option_before"),
        kind.single(entry, &attrs),
        enclose(entry, attributes, "option_after"),
    )
}

/// Raw text around a leaf: the option's own key wins over the top-level one
fn enclose(entry: &OptionEntry, attributes: &Attributes, key: &str) -> String {
    entry
        .attributes()
        .text(key)
        .or_else(|| attributes.text(key))
        .unwrap_or_default()
}

/// Derive the attributes of one leaf option.
///
/// Radio buttons and checkboxes start from the top-level attributes so each
/// input carries the field's `name`; selects do not. The option's own keys
/// and the selection attribute are layered on top. Checkbox names gain `[]`
/// and radio/checkbox ids gain the option ordinal so they stay unique.
/// `value` and `label` are dropped since the templates place them.
pub fn option_attributes(
    entry: &OptionEntry,
    state: &mut RenderState,
    kind: RenderKind,
    attributes: &Attributes,
    default: &Selection,
) -> Attributes {
    let ordinal = state.next_option();

    let mut attrs = if kind.inherits_attributes() {
        attributes.without(&ENGINE_KEYS)
    } else {
        Attributes::new()
    };
    attrs.merge(&entry.attributes().without(&ENCLOSE_KEYS));
    attrs.merge(&selection_attribute(entry, kind, default));

    for (key, value) in attrs.iter_mut() {
        if !value.is_truthy() {
            continue;
        }
        if kind == RenderKind::CheckboxList && key == "name" {
            *value = AttrValue::Text(format!("{}[]", value.to_text()));
        }
        if kind.inherits_attributes() && key == "id" {
            *value = AttrValue::Text(format!("{}_{}", value.to_text(), ordinal));
        }
    }

    attrs.without(&["value", "label"])
}

/// `<label for="id">text</label>` when the attributes carry a label
pub fn render_label(attributes: &Attributes) -> String {
    match attributes.get("label") {
        Some(label) if label.is_truthy() => {
            let for_attr = Attributes::new().with("for", attributes.text("id").unwrap_or_default());
            format!("<label{}>{}</label>", for_attr.to_html(), label.to_text())
        }
        _ => String::new(),
    }
}
