// src/tokenize.rs
//! Word tokenizer and the shared, materialized token stream.
//!
//! Tokens are Unicode `\w+` runs, lowercased. The corpus is expected to be
//! lowercase already, so most tokens are borrowed straight from the input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

// \w covers letters, digits and `_`; (?u) keeps it Unicode-aware
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("tokenizer regex"));

/// Lazily yield lowercase word tokens from `text`.
pub fn words(text: &str) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    WORD_RE.find_iter(text).map(|m| lowercase(m.as_str()))
}

fn lowercase(tok: &str) -> Cow<'_, str> {
    // titlecase letters such as U+01C5 are not `is_uppercase` but still fold
    if tok.chars().any(|c| c.to_lowercase().ne([c])) {
        Cow::Owned(tok.to_lowercase())
    } else {
        Cow::Borrowed(tok)
    }
}

/// Immutable token sequence, tokenized once and shared by every consumer.
///
/// Cloning only bumps a reference count. Each consumer walks the slice with
/// its own iterator, so no cursor is ever shared between tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Arc<[String]>,
}

impl TokenStream {
    pub fn from_text(text: &str) -> Self {
        words(text).map(Cow::into_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl Deref for TokenStream {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.tokens
    }
}

impl FromIterator<String> for TokenStream {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect::<Vec<_>>().into(),
        }
    }
}
