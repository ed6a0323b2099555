//! Case-sensitive identifiers for columns and field references

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter used by quoted identifiers. Doubling it escapes one literal delimiter.
pub const QUOTE: char = '"';

/// A resolved, case-sensitive name.
///
/// Identifiers compare on their resolved text only; whether the text came from
/// a literal or a quoted token is not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Build an identifier from text taken verbatim.
    pub fn from_internal(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Build an identifier from the inner content of a quoted token,
    /// collapsing every doubled delimiter into one.
    pub fn from_quoted_inner(inner: &str) -> Self {
        Self(inner.replace("\"\"", "\""))
    }

    /// The raw text of the identifier.
    pub fn as_internal(&self) -> &str {
        &self.0
    }

    /// Render the identifier the way a CQL statement would need it.
    ///
    /// Plain lowercase names (`[a-z][a-z0-9_]*`) are left bare; anything else is
    /// double-quoted with embedded quotes doubled.
    pub fn as_cql(&self) -> String {
        if is_plain_cql(&self.0) {
            self.0.clone()
        } else {
            quote(&self.0)
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Self::from_internal(text)
    }
}

impl From<String> for Identifier {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrap text in delimiters, doubling any delimiter it contains.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(QUOTE);
    for c in text.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

fn is_plain_cql(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
