//! Final statistics record and its renderings.

use serde::Serialize;
use std::fmt::Write as _;

use crate::stats::TrigramCount;

/// Everything a run produces. Built once at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub token_count: usize,
    pub vocabulary_size: usize,
    pub top_trigrams: Vec<TrigramCount>,
    pub positive_word_total: usize,
    pub negative_word_total: usize,
    pub more_positive_documents: usize,
    pub more_negative_documents: usize,
}

impl AggregateStats {
    /// Plain-text report, one statistic per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "N: {}", self.token_count);
        let _ = writeln!(out, "V: {}", self.vocabulary_size);
        let _ = writeln!(out, "Top {} trigrams:", self.top_trigrams.len());
        for (rank, t) in self.top_trigrams.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {} ({})", rank + 1, t, t.count);
        }
        let _ = writeln!(out, "Positive words: {}", self.positive_word_total);
        let _ = writeln!(out, "Negative words: {}", self.negative_word_total);
        let _ = writeln!(
            out,
            "Stories with more positive than negative words: {}",
            self.more_positive_documents
        );
        let _ = writeln!(
            out,
            "Stories with more negative than positive words: {}",
            self.more_negative_documents
        );
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Short SHA-256 over the compact JSON form; equal stats give equal
    /// fingerprints.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        let mut out = String::with_capacity(16);
        for b in digest.iter().take(8) {
            let _ = write!(&mut out, "{:02x}", b);
        }
        Ok(out)
    }
}
