//! Serde-backed formatting options

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INDENT_WIDTH;
use crate::error::{Error, Result};

/// Formatting options applied when a snapshot is rendered to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Spaces per nesting level
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl FormatOptions {
    /// Parse options from a JSON document; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the document is not valid JSON or names an
    /// unknown field.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .change_context(Error::invalid("format options", "could not parse JSON"))
            .attach(format!("Input: {json}"))
    }

    /// One level of indentation
    #[must_use]
    pub fn indent_unit(&self) -> String { " ".repeat(self.indent_width) }
}
