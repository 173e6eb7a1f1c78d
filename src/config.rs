use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BANK_DIR: &str = "questions";
pub const DEFAULT_LOG_FILE: &str = "quizer.log";
pub const DEFAULT_REVEAL_MS: u64 = 500;

/// Runtime settings, read from `QUIZER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bank_dir: PathBuf,
    pub log_file: PathBuf,
    pub reveal_delay: Duration,
    pub shuffle: bool,
    pub skips_end_round: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bank_dir: PathBuf::from(DEFAULT_BANK_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_MS),
            shuffle: true,
            skips_end_round: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            bank_dir: get("QUIZER_BANK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.bank_dir),
            log_file: get("QUIZER_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            reveal_delay: get("QUIZER_REVEAL_MS")
                .and_then(|ms| ms.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.reveal_delay),
            shuffle: get("QUIZER_SHUFFLE")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.shuffle),
            skips_end_round: get("QUIZER_SKIPS_END_ROUND")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.skips_end_round),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
