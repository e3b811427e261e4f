//! Corpus statistics: binary entrypoint.
//! Loads config, builds the worker pool, runs the pipeline and prints the
//! report to stdout. Exits non-zero on any fatal error.
//!
//! An optional first argument overrides the config file path.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use news_corpus_stats::{run_with_config, telemetry, OutputFormat, StatsConfig, WorkerPool};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => {
            let mut cfg = StatsConfig::load_from(&PathBuf::from(path))?;
            cfg.apply_env_overrides();
            cfg
        }
        None => StatsConfig::load()?,
    };
    tracing::debug!(target: "config", ?cfg, "effective config");

    let metrics = match &cfg.output.metrics_path {
        Some(path) => Some((telemetry::install_prometheus()?, path.clone())),
        None => None,
    };

    let pool = WorkerPool::new(cfg.workers()).context("building worker pool")?;
    let stats = run_with_config(&cfg, pool)
        .await
        .context("statistics run failed")?;

    let rendered = match cfg.output.format {
        OutputFormat::Text => stats.render_text(),
        OutputFormat::Json => {
            let mut s = stats.to_json().context("serializing report")?;
            s.push('\n');
            s
        }
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("writing report")?;
    stdout.flush().context("writing report")?;

    let fingerprint = stats.fingerprint().context("fingerprinting report")?;
    tracing::info!(target: "pipeline", %fingerprint, "report written");

    if let Some((handle, path)) = metrics {
        telemetry::write_metrics(&handle, &path)?;
    }
    Ok(())
}
