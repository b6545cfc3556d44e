//! Escaping HTML fragment builder.
//!
//! DESIGN
//! ======
//! Every piece of text that did not originate in this crate (answers,
//! citations, echoed user input) goes through [`HtmlFragment::text`], which
//! escapes it. [`HtmlFragment::raw`] is reserved for markup written here as
//! string literals. Attribute values are quoted with `"` and escaped by
//! [`HtmlFragment::attr`].

use std::fmt;

/// An HTML fragment assembled from escaped text and trusted markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlFragment {
    buf: String,
}

impl HtmlFragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fragment holding a single escaped text run.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut fragment = Self::new();
        fragment.text(text);
        fragment
    }

    /// Append untrusted text, escaping markup-significant characters.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape(text));
        self
    }

    /// Append trusted markup verbatim.
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Append ` name="value"` with the value escaped.
    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape(value));
        self.buf.push('"');
        self
    }

    /// Append another fragment.
    pub fn append(&mut self, other: &HtmlFragment) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl fmt::Display for HtmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

/// Escape `& < > " '` for use in element content or quoted attributes.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
