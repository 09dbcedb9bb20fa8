//! Session configuration.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CRATEDIGGER_STORE_PATH` - SQLite file backing the store (default: in-memory)
//! - `CRATEDIGGER_BID_CEILING` - Highest accepted bid (default: 99999)
//! - `CRATEDIGGER_MIN_BID_INCREMENT` - Amount a bid must clear the current price by
//!   for the suggested minimum (default: 1)
//! - `CRATEDIGGER_DEFAULT_COVER_URL` - Cover image for listings published without one

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BID_CEILING: f64 = 99_999.0;
pub const DEFAULT_MIN_BID_INCREMENT: f64 = 1.0;
pub const DEFAULT_LISTING_RATING: u8 = 4;
pub const DEFAULT_COVER_URL: &str =
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop";

const ENV_STORE_PATH: &str = "CRATEDIGGER_STORE_PATH";
const ENV_BID_CEILING: &str = "CRATEDIGGER_BID_CEILING";
const ENV_MIN_BID_INCREMENT: &str = "CRATEDIGGER_MIN_BID_INCREMENT";
const ENV_DEFAULT_COVER_URL: &str = "CRATEDIGGER_DEFAULT_COVER_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// SQLite file for the store; `None` keeps everything in memory.
    pub store_path: Option<PathBuf>,
    pub bid_ceiling: f64,
    pub min_bid_increment: f64,
    pub default_rating: u8,
    pub default_cover_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            bid_ceiling: DEFAULT_BID_CEILING,
            min_bid_increment: DEFAULT_MIN_BID_INCREMENT,
            default_rating: DEFAULT_LISTING_RATING,
            default_cover_url: DEFAULT_COVER_URL.to_string(),
        }
    }
}

impl MarketConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_STORE_PATH) {
            config.store_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = get(ENV_BID_CEILING) {
            config.bid_ceiling = parse_positive(ENV_BID_CEILING, &raw)?;
        }
        if let Some(raw) = get(ENV_MIN_BID_INCREMENT) {
            config.min_bid_increment = parse_positive(ENV_MIN_BID_INCREMENT, &raw)?;
        }
        if let Some(url) = get(ENV_DEFAULT_COVER_URL) {
            config.default_cover_url = url;
        }
        Ok(config)
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(v) => Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("must be a positive number, got {v}"),
        )),
        Err(e) => Err(ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
    }
}
