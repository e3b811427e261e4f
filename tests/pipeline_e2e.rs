// tests/pipeline_e2e.rs
//
// Full pipeline runs: idempotence, Stage-1 order independence, empty input.

use news_corpus_stats::{
    AggregateStats, Corpus, Lexicon, Pipeline, Polarity, Stage1Task, WorkerPool,
};

const CORPUS: &str = "\
the market rally was a strong gain for investor and a good day for the fund
the bank report a loss and weak growth as the market fall
investor remain good and strong despite the loss
the fund say the outlook is stable

the market rally was a strong gain for investor
";

fn lexicons() -> (Lexicon, Lexicon) {
    (
        Lexicon::from_word_list("good\nstrong\ngain\nrally\nstable\n", Polarity::Positive),
        Lexicon::from_word_list("loss\nweak\nfall\n", Polarity::Negative),
    )
}

async fn run_with(pool: WorkerPool, order: [Stage1Task; 4]) -> AggregateStats {
    let (pos, neg) = lexicons();
    Pipeline::new(pool)
        .with_dispatch_order(order)
        .run(&Corpus::from_text(CORPUS), &pos, &neg)
        .await
        .expect("pipeline run")
}

fn permutations(items: [Stage1Task; 4]) -> Vec<[Stage1Task; 4]> {
    let mut out = Vec::new();
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let idx = [a, b, c, d];
                    let mut seen = [false; 4];
                    idx.iter().for_each(|&i| seen[i] = true);
                    if seen.iter().all(|s| *s) {
                        out.push(idx.map(|i| items[i]));
                    }
                }
            }
        }
    }
    out
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn expected_statistics_for_small_corpus() {
    let stats = run_with(WorkerPool::new(Some(4)).unwrap(), Stage1Task::ALL).await;

    assert_eq!(stats.token_count, 52);
    assert_eq!(stats.vocabulary_size, 26);
    assert_eq!(stats.positive_word_total, 10);
    assert_eq!(stats.negative_word_total, 4);
    // stories 1, 3 (2 pos / 1 neg), 4 and 6 lean positive; story 2 negative;
    // the blank line is a tie
    assert_eq!(stats.more_positive_documents, 4);
    assert_eq!(stats.more_negative_documents, 1);

    assert_eq!(stats.top_trigrams.len(), 25);
    let repeated: Vec<String> = stats
        .top_trigrams
        .iter()
        .take_while(|t| t.count == 2)
        .map(|t| t.to_string())
        .collect();
    assert_eq!(
        repeated,
        vec![
            "the market rally",
            "market rally was",
            "rally was a",
            "was a strong",
            "a strong gain",
            "strong gain for",
            "gain for investor",
        ]
    );
    assert_eq!(stats.top_trigrams[7].to_string(), "for investor and");
    assert_eq!(stats.top_trigrams[7].count, 1);
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let pool = WorkerPool::new(None).unwrap();
    let a = run_with(pool.clone(), Stage1Task::ALL).await;
    let b = run_with(pool, Stage1Task::ALL).await;
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    assert_eq!(a.render_text(), b.render_text());
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}

#[tokio::test]
async fn stage_one_completion_order_does_not_matter() {
    let orders = permutations(Stage1Task::ALL);
    assert_eq!(orders.len(), 24);

    let baseline = run_with(WorkerPool::new(Some(1)).unwrap(), Stage1Task::ALL).await;
    for order in orders {
        // one worker: tasks finish in exactly the order they were queued
        let serial = run_with(WorkerPool::new(Some(1)).unwrap(), order).await;
        assert_eq!(serial, baseline, "order {order:?}");

        let parallel = run_with(WorkerPool::new(Some(4)).unwrap(), order).await;
        assert_eq!(parallel, baseline, "order {order:?} on 4 workers");
    }
}

#[tokio::test]
async fn empty_corpus_is_all_zero() {
    let (pos, neg) = lexicons();
    let stats = Pipeline::new(WorkerPool::new(Some(2)).unwrap())
        .run(&Corpus::from_text(""), &pos, &neg)
        .await
        .unwrap();
    assert_eq!(
        stats,
        AggregateStats {
            token_count: 0,
            vocabulary_size: 0,
            top_trigrams: Vec::new(),
            positive_word_total: 0,
            negative_word_total: 0,
            more_positive_documents: 0,
            more_negative_documents: 0,
        }
    );
}

#[tokio::test]
async fn two_tokens_give_no_trigrams() {
    let (pos, neg) = lexicons();
    let stats = Pipeline::new(WorkerPool::new(Some(1)).unwrap())
        .run(&Corpus::from_text("good loss\n"), &pos, &neg)
        .await
        .unwrap();
    assert_eq!(stats.token_count, 2);
    assert!(stats.top_trigrams.is_empty());
    assert_eq!(stats.more_positive_documents, 0);
    assert_eq!(stats.more_negative_documents, 0);
}
