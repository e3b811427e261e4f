// src/config.rs
//! Run configuration: TOML file plus environment overrides.
//!
//! Resolution:
//! 1) `$CORPUS_STATS_CONFIG_PATH` (must exist if set)
//! 2) `config/corpus_stats.toml`
//! 3) built-in defaults
//!
//! Then `CORPUS_STATS_RUNTIME_DIR`, `CORPUS_STATS_WORKERS`,
//! `CORPUS_STATS_FORMAT` and `CORPUS_STATS_METRICS_PATH` override single
//! values. Bad override values are ignored with a warning.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "config/corpus_stats.toml";

pub const ENV_CONFIG_PATH: &str = "CORPUS_STATS_CONFIG_PATH";
pub const ENV_RUNTIME_DIR: &str = "CORPUS_STATS_RUNTIME_DIR";
pub const ENV_WORKERS: &str = "CORPUS_STATS_WORKERS";
pub const ENV_FORMAT: &str = "CORPUS_STATS_FORMAT";
pub const ENV_METRICS_PATH: &str = "CORPUS_STATS_METRICS_PATH";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub input: InputConfig,
    pub pool: PoolConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Base directory for relative input paths.
    pub runtime_dir: PathBuf,
    pub corpus: PathBuf,
    pub positive_lexicon: PathBuf,
    pub negative_lexicon: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            runtime_dir: PathBuf::from("runtime"),
            corpus: PathBuf::from("processed_text_part_a.txt"),
            positive_lexicon: PathBuf::from("positive-words.txt"),
            negative_lexicon: PathBuf::from("negative-words.txt"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// 0 = one worker per available core.
    pub workers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Write Prometheus exposition text here after the run.
    pub metrics_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format `{other}`")),
        }
    }
}

impl StatsConfig {
    /// Resolve the config file, then apply env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                tracing::debug!(target: "config", "no config file, using defaults");
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!(target: "config", path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_RUNTIME_DIR) {
            if !dir.trim().is_empty() {
                self.input.runtime_dir = PathBuf::from(dir.trim());
            }
        }
        if let Some(n) = parse_workers_env(std::env::var(ENV_WORKERS).ok()) {
            self.pool.workers = n;
        }
        if let Some(f) = parse_format_env(std::env::var(ENV_FORMAT).ok()) {
            self.output.format = f;
        }
        if let Ok(p) = std::env::var(ENV_METRICS_PATH) {
            let p = p.trim();
            self.output.metrics_path = (!p.is_empty()).then(|| PathBuf::from(p));
        }
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.resolve(&self.input.corpus)
    }

    pub fn positive_lexicon_path(&self) -> PathBuf {
        self.resolve(&self.input.positive_lexicon)
    }

    pub fn negative_lexicon_path(&self) -> PathBuf {
        self.resolve(&self.input.negative_lexicon)
    }

    /// Worker count for `WorkerPool::new`; `None` means host parallelism.
    pub fn workers(&self) -> Option<usize> {
        (self.pool.workers > 0).then_some(self.pool.workers)
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.input.runtime_dir.join(p)
        }
    }
}

fn parse_workers_env(v: Option<String>) -> Option<usize> {
    let raw = v?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(target: "config", value = %raw, "ignoring invalid {ENV_WORKERS}");
            None
        }
    }
}

fn parse_format_env(v: Option<String>) -> Option<OutputFormat> {
    let raw = v?;
    match raw.parse() {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(target: "config", error = %e, "ignoring invalid {ENV_FORMAT}");
            None
        }
    }
}
