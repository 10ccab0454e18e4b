use std::fmt;

use crate::adapter::component::ComponentType;

#[derive(Debug)]
pub enum LocatorError {
    /// A playback selection target (option, index) could not be resolved.
    /// Fatal for the current step, equivalent to an assertion failure.
    ResolutionFailure {
        component_type: ComponentType,
        monkey_id: String,
        value: String,
    },

    /// The component a command refers to is not in the document
    ElementNotFound {
        component_type: ComponentType,
        monkey_id: String,
    },

    /// A decoded cross-boundary element was missing or had unreadable fields.
    /// Decoding substitutes empty values and reports this as a warning.
    MalformedDescriptor { index: usize, detail: String },

    /// File could not be read or written
    Io { path: String, source: std::io::Error },

    /// JSON parsing failed (snapshot or descriptor)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Page could not be fetched
    Fetch(String),

    /// Caller supplied something unusable (bad index, unknown event, ...)
    InvalidArgument(String),
}

impl LocatorError {
    /// Whether this error must stop the current script step.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LocatorError::MalformedDescriptor { .. })
    }
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::ResolutionFailure {
                component_type,
                monkey_id,
                value,
            } => {
                write!(
                    f,
                    "Unable to find '{}' in {} \"{}\"",
                    value, component_type, monkey_id
                )
            }
            LocatorError::ElementNotFound {
                component_type,
                monkey_id,
            } => {
                write!(f, "Unable to find {} \"{}\"", component_type, monkey_id)
            }
            LocatorError::MalformedDescriptor { index, detail } => {
                write!(f, "Malformed element descriptor #{}: {}", index, detail)
            }
            LocatorError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path, source)
            }
            LocatorError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            LocatorError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            LocatorError::Fetch(msg) => {
                write!(f, "Fetch failed: {}", msg)
            }
            LocatorError::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {}", msg)
            }
        }
    }
}

impl std::error::Error for LocatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocatorError::Io { source, .. } => Some(source),
            LocatorError::JsonParse { source, .. } => Some(source),
            LocatorError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}
