//! Logging and metrics setup.
//!
//! Logs go to stderr so the report on stdout stays clean. Metrics are plain
//! `metrics` macros; without an installed recorder they are no-ops, so the
//! library and its tests never need one.

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "CORPUS_STATS_LOG_FORMAT";
const DEFAULT_FILTER: &str = "pipeline=info,corpus=info,lexicon=info,polarity=info,config=info,warn";

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG` when set. `CORPUS_STATS_LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

/// One-time metric descriptions (so series carry help text when exported).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_runs_total", "Completed statistics runs.");
        describe_counter!("corpus_tokens_total", "Tokens produced from the corpus.");
        describe_counter!("corpus_documents_total", "Stories classified for polarity.");
        describe_counter!(
            "corpus_documents_malformed_total",
            "Stories that were not valid UTF-8 and counted as ties."
        );
        describe_histogram!(
            "pipeline_stage_ms",
            Unit::Milliseconds,
            "Wall time per pipeline stage."
        );
    });
}

/// Install the Prometheus recorder. Call at most once per process.
pub fn install_prometheus() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("prometheus: install recorder")?;
    ensure_metrics_described();
    Ok(handle)
}

/// Write the current Prometheus exposition text to `path`.
pub fn write_metrics(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, handle.render())
        .with_context(|| format!("writing metrics to {}", path.display()))?;
    tracing::info!(target: "pipeline", path = %path.display(), "metrics written");
    Ok(())
}
