//! Localized text pack.
//!
//! Read-mostly; replaced wholesale on language change. Reads always go
//! through a snapshot (`Arc<TextPack>`), so a swap never tears a render.

use crate::api::ApiFailure;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPack {
    texts: HashMap<String, String>,
}

impl TextPack {
    pub fn new(texts: HashMap<String, String>) -> Self {
        TextPack { texts }
    }

    /// Get the value for a key, or the `"404 <key>"` sentinel. A missing
    /// text must be visible in the UI, not silently blank.
    pub fn gtv(&self, key: &str) -> String {
        match self.texts.get(key) {
            Some(value) => value.clone(),
            None => format!("404 {}", key),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.texts.contains_key(key)
    }

    /// Localized text for an API failure: `error_<code>` formatted with the
    /// failure's kwargs.
    pub fn error_text(&self, failure: &ApiFailure) -> String {
        format_kwargs(&self.gtv(&failure.text_key()), &failure.kwargs)
    }
}

/// Substitute `{name}` placeholders from a kwargs object. Unknown
/// placeholders stay as-is.
pub fn format_kwargs(template: &str, kwargs: &serde_json::Map<String, serde_json::Value>) -> String {
    let mut out = template.to_string();
    for (key, value) in kwargs {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out = out.replace(&format!("{{{}}}", key), &rendered);
    }
    out
}
