use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::NewsloomError;

/// Engine configuration loaded from environment variables.
///
/// Every knob carries the shipped default, so an empty environment is a
/// valid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the `score<TAB>host` agency-rating file.
    pub rating_path: String,
    /// Cosine-distance cut for English clustering.
    pub en_distance_threshold: f32,
    /// Cosine-distance cut for Russian clustering.
    pub ru_distance_threshold: f32,
    /// Percentile of corpus fetch times used as the iteration clock.
    pub iter_timestamp_percentile: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rating_path: "ratings/rating_merged.txt".to_string(),
            en_distance_threshold: 0.045,
            ru_distance_threshold: 0.045,
            iter_timestamp_percentile: 0.99,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, NewsloomError> {
        let defaults = Self::default();
        Ok(Self {
            rating_path: env::var("NEWSLOOM_RATING_PATH").unwrap_or(defaults.rating_path),
            en_distance_threshold: parse_env(
                "NEWSLOOM_EN_DISTANCE_THRESHOLD",
                defaults.en_distance_threshold,
            )?,
            ru_distance_threshold: parse_env(
                "NEWSLOOM_RU_DISTANCE_THRESHOLD",
                defaults.ru_distance_threshold,
            )?,
            iter_timestamp_percentile: parse_env(
                "NEWSLOOM_ITER_TIMESTAMP_PERCENTILE",
                defaults.iter_timestamp_percentile,
            )?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, NewsloomError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| NewsloomError::Config(format!("{key} must be a number: {e}"))),
        Err(_) => Ok(default),
    }
}
