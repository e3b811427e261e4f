use serde::Serialize;
use std::collections::HashSet;

/// Token count (N) and vocabulary size (V).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrequencySummary {
    pub token_count: usize,
    pub vocabulary_size: usize,
}

/// Single pass over `tokens`: every token is visited once.
pub fn analyze<S: AsRef<str>>(tokens: &[S]) -> FrequencySummary {
    let mut vocabulary: HashSet<&str> = HashSet::new();
    let mut token_count = 0usize;
    for t in tokens {
        token_count += 1;
        vocabulary.insert(t.as_ref());
    }
    FrequencySummary {
        token_count,
        vocabulary_size: vocabulary.len(),
    }
}
