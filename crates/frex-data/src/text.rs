//! Text fields that may be stored either as a string or as a token list.

use serde::{Deserialize, Serialize};

/// A string, or a list of tokens that reads as one string when joined by spaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TextOrList {
    /// Plain text.
    Text(String),
    /// Pre-tokenized text.
    List(Vec<String>),
}

impl Default for TextOrList {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl TextOrList {
    /// The value as a single string, joining lists with spaces.
    pub fn joined(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(" "),
        }
    }

    /// The value as tokens, splitting plain text on whitespace.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Text(text) => text.split_whitespace().map(str::to_string).collect(),
            Self::List(items) => items.clone(),
        }
    }

    /// Returns true if there is no non-whitespace content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}
