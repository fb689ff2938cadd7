//! Render context for value formatting

use std::collections::HashMap;

/// Setting holding the date pattern used by the date renderer
pub const DATE_FORMAT: &str = "DATE_FORMAT";

/// Read-only settings threaded through recursive render calls
///
/// The context is owned by the caller; renderers only read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Console environment settings
    pub environment: HashMap<String, String>,
}

impl RenderContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a setting
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the date pattern
    pub fn with_date_format(self, pattern: impl Into<String>) -> Self {
        self.with_setting(DATE_FORMAT, pattern)
    }

    /// Set a setting value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.environment.insert(name.into(), value.into());
    }

    /// Get a setting value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.environment.get(name).map(String::as_str)
    }

    /// Date pattern, trimmed; `None` when absent or blank
    pub fn date_format(&self) -> Option<&str> {
        self.get(DATE_FORMAT)
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            environment: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
