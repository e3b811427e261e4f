//! # Document Polarity
//! Per-story comparison of positive vs. negative lexicon hits.
//!
//! Each line of the corpus is one story. Stories are classified independently
//! on the worker pool; verdicts are collected first and then folded into a
//! [`PolarityTally`] on a single thread, so there are no shared counters.
//!
//! Policy: strict comparison. Equal counts (including 0/0 for empty lines)
//! are a tie and count toward neither side. A line that is not valid UTF-8 is
//! reported as a tie too, logged, and counted in `malformed`.

use metrics::counter;
use rayon::prelude::*;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::lexicon::Lexicon;
use crate::tokenize::words;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentVerdict {
    MorePositive,
    MoreNegative,
    Tied,
}

impl DocumentVerdict {
    pub fn from_counts(positive: usize, negative: usize) -> Self {
        use std::cmp::Ordering::*;
        match positive.cmp(&negative) {
            Greater => DocumentVerdict::MorePositive,
            Less => DocumentVerdict::MoreNegative,
            Equal => DocumentVerdict::Tied,
        }
    }
}

/// Lexicon hits for one story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentScore {
    pub positive: usize,
    pub negative: usize,
}

impl DocumentScore {
    pub fn of_text(text: &str, positive: &Lexicon, negative: &Lexicon) -> Self {
        let tokens: Vec<_> = words(text).collect();
        Self {
            positive: positive.count_matches(&tokens),
            negative: negative.count_matches(&tokens),
        }
    }

    pub fn verdict(&self) -> DocumentVerdict {
        DocumentVerdict::from_counts(self.positive, self.negative)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PolarityTally {
    pub more_positive: usize,
    pub more_negative: usize,
    /// Includes empty and malformed stories.
    pub tied: usize,
    pub malformed: usize,
}

impl PolarityTally {
    pub fn total(&self) -> usize {
        self.more_positive + self.more_negative + self.tied
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Scored(DocumentVerdict::MorePositive) => self.more_positive += 1,
            Outcome::Scored(DocumentVerdict::MoreNegative) => self.more_negative += 1,
            Outcome::Scored(DocumentVerdict::Tied) => self.tied += 1,
            Outcome::Malformed => {
                self.tied += 1;
                self.malformed += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Scored(DocumentVerdict),
    Malformed,
}

fn classify_one(line_no: usize, doc: &[u8], positive: &Lexicon, negative: &Lexicon) -> Outcome {
    match std::str::from_utf8(doc) {
        Ok(text) => Outcome::Scored(DocumentScore::of_text(text, positive, negative).verdict()),
        Err(e) => {
            tracing::warn!(
                target: "polarity",
                line = line_no + 1,
                error = %e,
                "malformed document counted as tie"
            );
            Outcome::Malformed
        }
    }
}

/// Classify every story in parallel and reduce the verdicts.
///
/// Runs on whichever rayon pool the caller is in; wrap it in
/// `WorkerPool::run` or `WorkerPool::install` to pick the pool.
pub fn classify_documents(corpus: &Corpus, positive: &Lexicon, negative: &Lexicon) -> PolarityTally {
    let docs: Vec<&[u8]> = corpus.documents().collect();

    let outcomes: Vec<Outcome> = docs
        .par_iter()
        .enumerate()
        .map(|(i, doc)| classify_one(i, doc, positive, negative))
        .collect();

    let mut tally = PolarityTally::default();
    for outcome in outcomes {
        tally.record(outcome);
    }

    counter!("corpus_documents_total").increment(tally.total() as u64);
    counter!("corpus_documents_malformed_total").increment(tally.malformed as u64);
    tracing::debug!(
        target: "polarity",
        documents = tally.total(),
        more_positive = tally.more_positive,
        more_negative = tally.more_negative,
        tied = tally.tied,
        malformed = tally.malformed,
        "documents classified"
    );
    tally
}
