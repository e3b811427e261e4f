//! Trigram counting and ranking.
//!
//! Ranking order: count descending, then the position where the trigram was
//! first seen. The order is total, so repeated runs print identical lists.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Number of trigrams reported per run.
pub const TOP_TRIGRAMS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrigramCount {
    pub trigram: [String; 3],
    pub count: usize,
}

impl fmt::Display for TrigramCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.trigram;
        write!(f, "{a} {b} {c}")
    }
}

/// Count every overlapping trigram and return the `top_n` most frequent.
/// Fewer than three tokens yields an empty list.
pub fn rank<S: AsRef<str>>(tokens: &[S], top_n: usize) -> Vec<TrigramCount> {
    if tokens.len() < 3 || top_n == 0 {
        return Vec::new();
    }

    // value = (count, index of first occurrence)
    let mut counts: HashMap<[&str; 3], (usize, usize)> = HashMap::new();
    for (i, w) in tokens.windows(3).enumerate() {
        let key = [w[0].as_ref(), w[1].as_ref(), w[2].as_ref()];
        counts.entry(key).or_insert((0, i)).0 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|([a, b, c], (count, _))| TrigramCount {
            trigram: [a.to_owned(), b.to_owned(), c.to_owned()],
            count,
        })
        .collect()
}
