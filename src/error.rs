use thiserror::Error;

/// Errors raised while rendering option lists.
///
/// Kind errors are programming errors rather than data errors: bad option
/// data is defaulted, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A kind name with no select/multiselect/radio/checkbox_list template
    #[error("no option templates exist for kind `{0}`")]
    UnsupportedKind(String),
}
