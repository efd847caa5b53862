//! Error types for loading, saving and strictly updating a settings tree.

use thiserror::Error;

/// Errors that can occur while reading, writing or strictly mutating settings.
///
/// Lookups never fail: a missing key is `None`, not an error.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The input was not valid JSON, or held a value outside the supported
    /// set (booleans, floats, null). Also raised when the serializer fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The sink or source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output could not be returned as a `String`.
    #[error("Serialized settings are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A loaded document's root was not an object.
    #[error("Settings document root must be an object, found {found}")]
    InvalidRoot { found: &'static str },

    /// A strict insert would have overwritten a non-map value on the way
    /// to the leaf.
    #[error("Cannot set '{key}': component '{component}' holds {found}, not a map")]
    TypeConflict {
        key: String,
        component: String,
        found: &'static str,
    },
}

/// Convenience alias used throughout settings-core.
pub type Result<T> = std::result::Result<T, SettingsError>;
