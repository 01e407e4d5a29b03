//! Render select, multiselect, radio and checkbox list markup from option data
//!
//! ```
//! use html_options::{render, RawOptions, RenderKind, RenderRequest};
//!
//! let request = RenderRequest::new(RenderKind::Select)
//!     .with_attribute("name", "color")
//!     .with_default("g")
//!     .with_options(RawOptions::associative([("r", "Red"), ("g", "Green")]));
//!
//! assert_eq!(
//!     render(&request),
//!     "<select name=\"color\"><option value=\"r\">Red</option>\
//!      <option value=\"g\" selected=\"selected\">Green</option></select>"
//! );
//! ```

pub mod attributes;
pub mod error;
pub mod options;
pub mod render;

pub use attributes::{AttrValue, Attributes};
pub use error::RenderError;
pub use options::{normalize, OptionEntry, RawOption, RawOptions};
pub use render::{render, render_options, RenderKind, RenderRequest, RenderState, Selection};
