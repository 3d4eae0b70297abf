use std::collections::HashMap;

/// String-keyed settings handed to every [`TagHandler`][crate::TagHandler] call.
/// # Remarks
/// The meaning of each key is up to the handlers reading it. Unknown keys are carried along untouched, so
/// custom handlers can be configured through the same map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Settings with no keys at all.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Reads a setting as a boolean. Accepts `true`/`false`, `1`/`0`, `yes`/`no`, case-insensitively.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get(key)?.trim();

        if ["true", "1", "yes"].iter().any(|x| x.eq_ignore_ascii_case(value)) {
            Some(true)
        } else if ["false", "0", "no"].iter().any(|x| x.eq_ignore_ascii_case(value)) {
            Some(false)
        } else {
            None
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.trim().parse().ok()
    }

    /// Like [`Settings::get`], falling back to `default` when the key is missing.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn merge(&mut self, other: Settings) {
        self.values.extend(other.values);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::empty()
            .with("XHTML", "false")
            .with("FontSizeUnit", "px")
            .with("FontSizeMax", "48")
            .with("ColorAllowAdvFormats", "false")
            .with("QuoteTitleBackground", "#e4eaf2")
            .with("QuoteBorder", "1px solid gray")
            .with("QuoteBackground", "white")
            .with("QuoteCSSClassName", "quotebox-{by}")
            .with("CodeTitleBackground", "#ffc29c")
            .with("CodeBorder", "1px solid gray")
            .with("CodeBackground", "white")
            .with("CodeCSSClassName", "codebox-{lang}")
            .with("LinkUnderline", "true")
            .with("LinkColor", "blue")
    }
}
