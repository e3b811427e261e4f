// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod polarity;
pub mod pool;
pub mod report;
pub mod stats;
pub mod telemetry;
pub mod tokenize;

// ---- Re-exports for stable public API ----
pub use crate::config::{OutputFormat, StatsConfig};
pub use crate::corpus::Corpus;
pub use crate::error::{CorpusError, Result};
pub use crate::lexicon::{Lexicon, Polarity};
pub use crate::pipeline::{Pipeline, Stage1Task};
pub use crate::polarity::{DocumentVerdict, PolarityTally};
pub use crate::pool::WorkerPool;
pub use crate::report::AggregateStats;
pub use crate::tokenize::TokenStream;

/// Load every input named by `cfg` and run the full pipeline on `pool`.
///
/// Any missing input is fatal; nothing is computed until all three resources
/// are loaded.
pub async fn run_with_config(cfg: &StatsConfig, pool: WorkerPool) -> Result<AggregateStats> {
    let positive = Lexicon::load(cfg.positive_lexicon_path(), Polarity::Positive)?;
    let negative = Lexicon::load(cfg.negative_lexicon_path(), Polarity::Negative)?;
    let corpus = Corpus::load(cfg.corpus_path())?;

    Pipeline::new(pool).run(&corpus, &positive, &negative).await
}
