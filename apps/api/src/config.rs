use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::conversation::pacing::Pacing;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file replacing the bundled content catalog.
    pub catalog_path: Option<PathBuf>,
    /// Fixed seed for phrase choice and typing jitter. Entropy when unset.
    pub rng_seed: Option<u64>,
    pub pacing: Pacing,
    /// Extra attempts at binding the listener before giving up.
    pub bind_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Pacing::default();
        let pacing = Pacing {
            processing: millis_env("COACH_PROCESSING_MS", defaults.processing)?,
            typing: millis_env("COACH_TYPING_MS", defaults.typing)?,
            typing_jitter: millis_env("COACH_TYPING_JITTER_MS", defaults.typing_jitter)?,
            phase_change: millis_env("COACH_PHASE_CHANGE_MS", defaults.phase_change)?,
            ..defaults
        };

        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: std::env::var_os("CATALOG_PATH").map(PathBuf::from),
            rng_seed: parse_env("COACH_RNG_SEED")?,
            pacing,
            bind_retries: parse_env("BIND_RETRIES")?.unwrap_or(10),
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => Ok(None),
    }
}

fn millis_env(key: &str, default: Duration) -> Result<Duration> {
    Ok(parse_env::<u64>(key)?
        .map(Duration::from_millis)
        .unwrap_or(default))
}
