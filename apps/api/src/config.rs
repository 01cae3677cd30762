use std::str::FromStr;

use anyhow::{Context, Result};

use crate::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::scoring::hard_match::DEFAULT_FUZZY_THRESHOLD;
use crate::scoring::{ScoreWeights, ScoringConfig};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or unparsable.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub embedding_api_url: String,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub port: u16,
    pub rust_log: String,
    pub fuzzy_match_threshold: f64,
    pub hard_match_weight: f64,
    pub semantic_match_weight: f64,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ScoreWeights::default();

        Ok(Config {
            database_url: require(&lookup, "DATABASE_URL")?,
            anthropic_api_key: require(&lookup, "ANTHROPIC_API_KEY")?,
            embedding_api_url: require(&lookup, "EMBEDDING_API_URL")?,
            embedding_api_key: lookup("EMBEDDING_API_KEY").filter(|k| !k.is_empty()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            fuzzy_match_threshold: parse_or(&lookup, "FUZZY_MATCH_THRESHOLD", DEFAULT_FUZZY_THRESHOLD)?,
            hard_match_weight: parse_or(&lookup, "HARD_MATCH_WEIGHT", defaults.hard_match)?,
            semantic_match_weight: parse_or(
                &lookup,
                "SEMANTIC_MATCH_WEIGHT",
                defaults.semantic_match,
            )?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            fuzzy_threshold: self.fuzzy_match_threshold,
            weights: ScoreWeights {
                hard_match: self.hard_match_weight,
                semantic_match: self.semantic_match_weight,
            },
        }
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/analyzer"),
        ("ANTHROPIC_API_KEY", "sk-test"),
        ("EMBEDDING_API_URL", "http://localhost:8081/v1"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert!(config.embedding_api_key.is_none());
        assert!(config.cors_allowed_origins.is_empty());

        let scoring = config.scoring_config();
        assert_eq!(scoring.fuzzy_threshold, 85.0);
        assert_eq!(scoring.weights.hard_match, 0.4);
        assert_eq!(scoring.weights.semantic_match, 0.6);
    }

    #[test]
    fn test_missing_required_var_fails() {
        let err = config_from(&REQUIRED[..2]).unwrap_err();
        assert!(err.to_string().contains("EMBEDDING_API_URL"));
    }

    #[test]
    fn test_overrides_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9000"),
            ("FUZZY_MATCH_THRESHOLD", "90"),
            ("HARD_MATCH_WEIGHT", "0.5"),
            ("SEMANTIC_MATCH_WEIGHT", "0.5"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://app.example.com,"),
            ("EMBEDDING_API_KEY", ""),
        ]);
        let config = config_from(&pairs).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.scoring_config().fuzzy_threshold, 90.0);
        assert_eq!(config.scoring_config().weights.hard_match, 0.5);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert!(config.embedding_api_key.is_none());
    }

    #[test]
    fn test_unparsable_value_fails() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("HARD_MATCH_WEIGHT", "heavy"));
        let err = config_from(&pairs).unwrap_err();
        assert!(err.to_string().contains("HARD_MATCH_WEIGHT"));
    }
}
