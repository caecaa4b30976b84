//! Server configuration, read from the environment at startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use storyline_catalog::application::generator::GeneratorSettings;
use storyline_catalog::application::sources::{
    CatalogSource, FileCatalogSource, GeneratedCatalogSource,
};
use storyline_core::clock::Clock;
use storyline_player::domain::config::{DEFAULT_FPS, DEFAULT_STORY_DURATION, PlaybackConfig};

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROFILE_COUNT: usize = 10;

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Display time per post (`STORY_DURATION_MS`).
    pub story_duration: Duration,
    /// Ticker rate (`PLAYBACK_FPS`).
    pub fps: u32,
    /// Catalog document to load (`CATALOG_PATH`); generated when unset.
    pub catalog_path: Option<PathBuf>,
    /// Generator seed (`CATALOG_SEED`); OS entropy when unset.
    pub catalog_seed: Option<u64>,
    /// Number of generated profiles (`PROFILE_COUNT`).
    pub profile_count: usize,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let duration_ms = parse_or(
            &lookup,
            "STORY_DURATION_MS",
            u64::try_from(DEFAULT_STORY_DURATION.as_millis()).unwrap_or(u64::MAX),
        )?;
        let fps = parse_or(&lookup, "PLAYBACK_FPS", DEFAULT_FPS)?;
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let catalog_seed = parse_optional(&lookup, "CATALOG_SEED")?;
        let profile_count = parse_or(&lookup, "PROFILE_COUNT", DEFAULT_PROFILE_COUNT)?;

        Ok(Self {
            host,
            port,
            story_duration: Duration::from_millis(duration_ms),
            fps,
            catalog_path,
            catalog_seed,
            profile_count,
        })
    }

    /// `HOST:PORT`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Playback timing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the duration or rate is out of range.
    pub fn playback(&self) -> Result<PlaybackConfig, AppError> {
        PlaybackConfig::new(self.story_duration, self.fps)
            .map_err(|e| AppError::Config(format!("invalid playback settings: {e}")))
    }

    /// The catalog source selected by `CATALOG_PATH`.
    #[must_use]
    pub fn catalog_source(&self, clock: Arc<dyn Clock>) -> Box<dyn CatalogSource> {
        match &self.catalog_path {
            Some(path) => Box::new(FileCatalogSource::new(path.clone())),
            None => {
                let settings = GeneratorSettings {
                    profile_count: self.profile_count,
                    ..GeneratorSettings::default()
                };
                Box::new(GeneratedCatalogSource::new(settings, self.catalog_seed, clock))
            }
        }
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
        })
        .transpose()
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}
