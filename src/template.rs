//! Path template interpolation
//!
//! Handles `{placeholder}` substitution in stream paths such as
//! `/contacts/{contactId}/activities`. Values come from a [`StreamContext`].

use crate::context::StreamContext;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for matching path placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("valid placeholder regex"));

/// Substitute every placeholder in `template` from `context`
///
/// Fails on the first placeholder that has no usable value. `stream` is only
/// used to label the error.
pub fn render(template: &str, context: &StreamContext, stream: &str) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let value = context
            .get_string(name.as_str())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::missing_context(stream, name.as_str()))?;

        result.push_str(&template[last..full.start()]);
        result.push_str(&value);
        last = full.end();
    }

    result.push_str(&template[last..]);
    Ok(result)
}

/// Extract all placeholder names from a path, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
