// tests/config_env.rs
use news_corpus_stats::config::{
    StatsConfig, ENV_CONFIG_PATH, ENV_FORMAT, ENV_METRICS_PATH, ENV_RUNTIME_DIR, ENV_WORKERS,
};
use news_corpus_stats::OutputFormat;
use std::path::PathBuf;
use std::{env, fs};

fn clear_env() {
    for k in [
        ENV_CONFIG_PATH,
        ENV_RUNTIME_DIR,
        ENV_WORKERS,
        ENV_FORMAT,
        ENV_METRICS_PATH,
    ] {
        env::remove_var(k);
    }
}

#[serial_test::serial]
#[test]
fn default_file_then_env_path_then_overrides() {
    // Isolate CWD so the repo's own config/ is not read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk -> defaults
    let cfg = StatsConfig::load().unwrap();
    assert_eq!(cfg, StatsConfig::default());

    // 2) Fallback to ./config/corpus_stats.toml
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/corpus_stats.toml"),
        "[pool]\nworkers = 2\n",
    )
    .unwrap();
    let cfg = StatsConfig::load().unwrap();
    assert_eq!(cfg.workers(), Some(2));

    // 3) Env path wins over the default file
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "[output]\nformat = \"json\"\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let cfg = StatsConfig::load().unwrap();
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert_eq!(cfg.workers(), None);

    // 4) Single-value overrides
    env::set_var(ENV_RUNTIME_DIR, "/srv/corpus");
    env::set_var(ENV_WORKERS, "6");
    env::set_var(ENV_FORMAT, "text");
    env::set_var(ENV_METRICS_PATH, "out/metrics.prom");
    let cfg = StatsConfig::load().unwrap();
    assert_eq!(cfg.corpus_path(), PathBuf::from("/srv/corpus/processed_text_part_a.txt"));
    assert_eq!(cfg.workers(), Some(6));
    assert_eq!(cfg.output.format, OutputFormat::Text);
    assert_eq!(cfg.output.metrics_path, Some(PathBuf::from("out/metrics.prom")));

    // 5) Invalid override values are ignored
    env::set_var(ENV_WORKERS, "lots");
    env::set_var(ENV_FORMAT, "yaml");
    let cfg = StatsConfig::load().unwrap();
    assert_eq!(cfg.workers(), None);
    assert_eq!(cfg.output.format, OutputFormat::Json);

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_path_to_missing_file_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
    let err = StatsConfig::load().unwrap_err();
    assert!(err.to_string().contains(ENV_CONFIG_PATH));
    clear_env();
}
