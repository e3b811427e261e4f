//! Stage-1 statistics over the shared token stream.

pub mod frequency;
pub mod trigrams;

pub use frequency::FrequencySummary;
pub use trigrams::{TrigramCount, TOP_TRIGRAMS};
