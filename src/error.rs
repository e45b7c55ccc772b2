//! Structured error types for vgrid.
//!
//! Runtime grid operations never fail: they clamp or no-op. Errors only
//! surface at construction time (invalid configuration, undersized pool) and
//! at the DOM boundary.

/// All errors that can occur while building or binding a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The element pool cannot hold the largest window the viewport needs.
    #[error("Element pool too small: {available} slots, window needs {required}")]
    PoolTooSmall { required: usize, available: usize },

    /// A cell coordinate outside the current row/column counts.
    #[error("Cell ({row}, {col}) is outside the grid")]
    CellOutOfRange { row: u32, col: u32 },

    /// DOM operation failed (element creation, listener registration).
    #[error("DOM error: {0}")]
    Dom(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GridError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn pool_too_small_message_names_both_sizes() {
        let err = GridError::PoolTooSmall {
            required: 42,
            available: 30,
        };
        assert_eq!(
            err.to_string(),
            "Element pool too small: 30 slots, window needs 42"
        );
    }

    #[test]
    fn string_conversions_become_other() {
        let err: GridError = "boom".into();
        assert!(matches!(err, GridError::Other(ref s) if s == "boom"));
    }
}
