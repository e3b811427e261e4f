//! # Statistics Pipeline
//! Runs every statistic over one corpus on a shared [`WorkerPool`].
//!
//! Order:
//! 1) tokenize the corpus once into a shared [`TokenStream`]
//! 2) fan out frequency, trigrams and both lexicon matches; wait for all four
//! 3) classify stories by polarity (needs both lexicons, runs after the barrier)
//! 4) assemble [`AggregateStats`]
//!
//! Stage-1 results are slotted by task, never by arrival, so the order tasks
//! finish in has no effect on the output. Any task failure ends the run.

use metrics::{counter, histogram};
use std::time::Instant;
use tokio::task::JoinSet;

use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::lexicon::Lexicon;
use crate::polarity::{classify_documents, PolarityTally};
use crate::pool::WorkerPool;
use crate::report::AggregateStats;
use crate::stats::{frequency, trigrams, FrequencySummary, TrigramCount, TOP_TRIGRAMS};
use crate::telemetry::ensure_metrics_described;
use crate::tokenize::TokenStream;

/// The four independent statistics computed from the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage1Task {
    Frequency,
    Trigrams,
    PositiveMatches,
    NegativeMatches,
}

impl Stage1Task {
    pub const ALL: [Stage1Task; 4] = [
        Stage1Task::Frequency,
        Stage1Task::Trigrams,
        Stage1Task::PositiveMatches,
        Stage1Task::NegativeMatches,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage1Task::Frequency => "frequency",
            Stage1Task::Trigrams => "trigrams",
            Stage1Task::PositiveMatches => "positive_matches",
            Stage1Task::NegativeMatches => "negative_matches",
        }
    }
}

#[derive(Debug)]
enum Stage1Output {
    Frequency(FrequencySummary),
    Trigrams(Vec<TrigramCount>),
    PositiveMatches(usize),
    NegativeMatches(usize),
}

type Stage1Job = Box<dyn FnOnce() -> Stage1Output + Send>;

#[derive(Debug, Default)]
struct Stage1Results {
    frequency: Option<FrequencySummary>,
    trigrams: Option<Vec<TrigramCount>>,
    positive: Option<usize>,
    negative: Option<usize>,
}

impl Stage1Results {
    fn accept(&mut self, out: Stage1Output) {
        match out {
            Stage1Output::Frequency(v) => self.frequency = Some(v),
            Stage1Output::Trigrams(v) => self.trigrams = Some(v),
            Stage1Output::PositiveMatches(v) => self.positive = Some(v),
            Stage1Output::NegativeMatches(v) => self.negative = Some(v),
        }
    }

    fn missing(&self) -> Option<Stage1Task> {
        if self.frequency.is_none() {
            Some(Stage1Task::Frequency)
        } else if self.trigrams.is_none() {
            Some(Stage1Task::Trigrams)
        } else if self.positive.is_none() {
            Some(Stage1Task::PositiveMatches)
        } else if self.negative.is_none() {
            Some(Stage1Task::NegativeMatches)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pool: WorkerPool,
    dispatch_order: [Stage1Task; 4],
    #[cfg(test)]
    panic_on: Option<Stage1Task>,
}

impl Pipeline {
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            dispatch_order: Stage1Task::ALL,
            #[cfg(test)]
            panic_on: None,
        }
    }

    /// Queue Stage-1 tasks in this order. With a single worker this is also
    /// the order they complete in.
    pub fn with_dispatch_order(mut self, order: [Stage1Task; 4]) -> Self {
        self.dispatch_order = order;
        self
    }

    pub async fn run(
        &self,
        corpus: &Corpus,
        positive: &Lexicon,
        negative: &Lexicon,
    ) -> Result<AggregateStats> {
        ensure_metrics_described();
        let run_started = Instant::now();

        // 1) Tokenize once
        let started = Instant::now();
        let tokens = {
            let corpus = corpus.clone();
            self.pool
                .run("tokenize", move || TokenStream::from_text(&corpus.text()))
                .await?
        };
        counter!("corpus_tokens_total").increment(tokens.len() as u64);
        record_stage("tokenize", started);

        // 2) Fan-out / fan-in
        let started = Instant::now();
        let stage1 = self.run_stage_one(&tokens, positive, negative).await?;
        record_stage("stage1", started);

        // 3) Per-story polarity
        let started = Instant::now();
        let tally: PolarityTally = {
            let (corpus, positive, negative) = (corpus.clone(), positive.clone(), negative.clone());
            self.pool
                .run("polarity", move || {
                    classify_documents(&corpus, &positive, &negative)
                })
                .await?
        };
        record_stage("polarity", started);

        // 4) Assemble
        let Stage1Results {
            frequency: Some(freq),
            trigrams: Some(top_trigrams),
            positive: Some(positive_word_total),
            negative: Some(negative_word_total),
        } = stage1
        else {
            return Err(CorpusError::task_failure("stage1", "incomplete results"));
        };

        let stats = AggregateStats {
            token_count: freq.token_count,
            vocabulary_size: freq.vocabulary_size,
            top_trigrams,
            positive_word_total,
            negative_word_total,
            more_positive_documents: tally.more_positive,
            more_negative_documents: tally.more_negative,
        };

        counter!("pipeline_runs_total").increment(1);
        tracing::info!(
            target: "pipeline",
            workers = self.pool.size(),
            tokens = stats.token_count,
            vocabulary = stats.vocabulary_size,
            documents = tally.total(),
            tied = tally.tied,
            malformed = tally.malformed,
            elapsed_ms = run_started.elapsed().as_millis() as u64,
            "statistics run complete"
        );
        Ok(stats)
    }

    async fn run_stage_one(
        &self,
        tokens: &TokenStream,
        positive: &Lexicon,
        negative: &Lexicon,
    ) -> Result<Stage1Results> {
        let mut pending = JoinSet::new();
        for task in self.dispatch_order {
            let job = self.job_for(task, tokens, positive, negative);
            // queued on the pool here, in dispatch order
            pending.spawn(self.pool.submit(task.name(), job));
        }

        let mut results = Stage1Results::default();
        while let Some(joined) = pending.join_next().await {
            let output = joined.map_err(|e| CorpusError::task_failure("stage1", e.to_string()))??;
            tracing::debug!(target: "pipeline", ?output, "stage-1 task finished");
            results.accept(output);
        }

        match results.missing() {
            Some(task) => Err(CorpusError::task_failure(task.name(), "no result was produced")),
            None => Ok(results),
        }
    }

    fn job_for(
        &self,
        task: Stage1Task,
        tokens: &TokenStream,
        positive: &Lexicon,
        negative: &Lexicon,
    ) -> Stage1Job {
        #[cfg(test)]
        if self.panic_on == Some(task) {
            return Box::new(move || -> Stage1Output { panic!("{} exploded", task.name()) });
        }
        stage_one_job(task, tokens.clone(), positive.clone(), negative.clone())
    }
}

fn stage_one_job(
    task: Stage1Task,
    tokens: TokenStream,
    positive: Lexicon,
    negative: Lexicon,
) -> Stage1Job {
    match task {
        Stage1Task::Frequency => {
            Box::new(move || Stage1Output::Frequency(frequency::analyze(tokens.as_slice())))
        }
        Stage1Task::Trigrams => {
            Box::new(move || Stage1Output::Trigrams(trigrams::rank(tokens.as_slice(), TOP_TRIGRAMS)))
        }
        Stage1Task::PositiveMatches => {
            Box::new(move || Stage1Output::PositiveMatches(positive.count_matches(tokens.iter())))
        }
        Stage1Task::NegativeMatches => {
            Box::new(move || Stage1Output::NegativeMatches(negative.count_matches(tokens.iter())))
        }
    }
}

fn record_stage(stage: &'static str, started: Instant) {
    let ms = started.elapsed().as_secs_f64() * 1000.0;
    histogram!("pipeline_stage_ms", "stage" => stage).record(ms);
}
