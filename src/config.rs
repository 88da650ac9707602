use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::chat::DEFAULT_REPLY_DELAY;
use crate::error::QuerySenseError;

const DEFAULT_STATE_FILE: &str = ".querysense/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub state_file: PathBuf,
    pub reply_delay: Duration,
    pub seed: Option<u64>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, QuerySenseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuerySenseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LoggingConfig::default();
        let reply_delay = match lookup("QUERYSENSE_REPLY_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_value("QUERYSENSE_REPLY_DELAY_MS", raw)?),
            None => DEFAULT_REPLY_DELAY,
        };
        let seed = match lookup("QUERYSENSE_SEED") {
            Some(raw) => Some(parse_value("QUERYSENSE_SEED", raw)?),
            None => None,
        };

        let format = lookup("QUERYSENSE_LOG_FORMAT").unwrap_or(defaults.format);
        if format != "pretty" && format != "json" {
            return Err(QuerySenseError::InvalidConfig {
                key: "QUERYSENSE_LOG_FORMAT",
                value: format,
            });
        }

        Ok(Self {
            state_file: lookup("QUERYSENSE_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            reply_delay,
            seed,
            logging: LoggingConfig {
                level: lookup("QUERYSENSE_LOG_LEVEL").unwrap_or(defaults.level),
                format,
            },
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: String) -> Result<T, QuerySenseError> {
    raw.trim()
        .parse()
        .map_err(|_| QuerySenseError::InvalidConfig { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.reply_delay, Duration::from_millis(1500));
        assert_eq!(config.seed, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("QUERYSENSE_STATE_FILE", "/tmp/qs.json"),
            ("QUERYSENSE_REPLY_DELAY_MS", "250"),
            ("QUERYSENSE_SEED", "42"),
            ("QUERYSENSE_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.state_file, PathBuf::from("/tmp/qs.json"));
        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn rejects_bad_numbers_and_formats() {
        let err = Config::from_lookup(lookup_from(&[("QUERYSENSE_REPLY_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            QuerySenseError::InvalidConfig { key: "QUERYSENSE_REPLY_DELAY_MS", .. }
        ));

        let err = Config::from_lookup(lookup_from(&[("QUERYSENSE_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("QUERYSENSE_LOG_FORMAT"));
    }
}
