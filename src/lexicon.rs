//! # Sentiment Lexicons
//! Immutable positive/negative word sets and occurrence matching.
//!
//! A lexicon file is a plain word list, one entry per line. Every line goes
//! through the same tokenizer as the corpus, so header or comment lines are
//! tolerated rather than parsed specially. Bytes that are not valid UTF-8 are
//! replaced before tokenizing.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CorpusError, Result};
use crate::tokenize::words;

/// Which sentiment a lexicon carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => f.write_str("positive"),
            Polarity::Negative => f.write_str("negative"),
        }
    }
}

/// Read-only word set shared across worker threads.
#[derive(Debug, Clone)]
pub struct Lexicon {
    polarity: Polarity,
    words: Arc<HashSet<String>>,
}

impl Lexicon {
    /// Load a lexicon from a word-list file.
    pub fn load<P: AsRef<Path>>(path: P, polarity: Polarity) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|e| CorpusError::from_read(path, e))?;
        let lexicon = Self::from_word_list(&String::from_utf8_lossy(&raw), polarity);
        tracing::info!(
            target: "lexicon",
            %polarity,
            path = %path.display(),
            words = lexicon.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Build from in-memory word-list text.
    pub fn from_word_list(text: &str, polarity: Polarity) -> Self {
        let entries = text
            .lines()
            .flat_map(words)
            .map(|w| w.into_owned())
            .collect::<HashSet<_>>();
        Self {
            polarity,
            words: Arc::new(entries),
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Count tokens that belong to this lexicon. Repeats count individually.
    pub fn count_matches<I, S>(&self, tokens: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|t| self.contains(t.as_ref()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(words: &str) -> Lexicon {
        Lexicon::from_word_list(words, Polarity::Positive)
    }

    #[test]
    fn counts_every_occurrence() {
        let l = lex("good\ngreat\n");
        assert_eq!(l.count_matches(["good", "bad", "great", "good"]), 3);
    }

    #[test]
    fn noise_lines_are_tokenized_like_content() {
        let l = lex(";;; Opinion Lexicon: positive\n;\nA+\nwell-known\n\nsuperb\n");
        assert!(l.contains("superb"));
        assert!(l.contains("a"));
        assert!(l.contains("well"));
        assert!(l.contains("known"));
        assert!(l.contains("opinion"));
        assert!(!l.contains("well-known"));
    }

    #[test]
    fn entries_are_lowercased() {
        let l = lex("Excellent\n");
        assert!(l.contains("excellent"));
        assert!(!l.contains("Excellent"));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let l = lex("");
        assert!(l.is_empty());
        assert_eq!(l.count_matches(vec!["good".to_string()]), 0);
    }

    #[test]
    fn clones_share_the_same_set() {
        let a = lex("good");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.words, &b.words));
        assert_eq!(b.polarity(), Polarity::Positive);
    }
}
