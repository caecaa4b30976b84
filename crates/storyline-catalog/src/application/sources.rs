//! Catalog sources.
//!
//! A source produces a validated [`Catalog`] once at startup. The player and
//! the story line never care which source was used.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use storyline_core::rng::{DeterministicRng, SeededRng};
use tracing::{info, instrument};

use super::generator::{GeneratorSettings, generate_catalog};
use crate::domain::catalog::{Catalog, CatalogDocument};

/// Anything that can produce the session's catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads and validates the catalog.
    async fn load(&self) -> Result<Catalog, DomainError>;
}

/// Synthetic catalog backed by [`generate_catalog`].
pub struct GeneratedCatalogSource {
    settings: GeneratorSettings,
    seed: Option<u64>,
    clock: Arc<dyn Clock>,
}

impl GeneratedCatalogSource {
    /// Creates a generator source. `None` seeds from the operating system.
    #[must_use]
    pub fn new(settings: GeneratorSettings, seed: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            seed,
            clock,
        }
    }
}

#[async_trait]
impl CatalogSource for GeneratedCatalogSource {
    #[instrument(skip(self), fields(seed = ?self.seed))]
    async fn load(&self) -> Result<Catalog, DomainError> {
        let mut rng: Box<dyn DeterministicRng> = match self.seed {
            Some(seed) => Box::new(SeededRng::from_seed(seed)),
            None => Box::new(SeededRng::from_os()),
        };
        let catalog = generate_catalog(&self.settings, rng.as_mut(), self.clock.as_ref())?;
        info!(
            profiles = catalog.profiles().len(),
            collections = catalog.story_line().len(),
            "generated catalog"
        );
        Ok(catalog)
    }
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for missing or unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(DomainError::Validation(format!(
                "unsupported catalog file {}: expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Parses a catalog document and validates it.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the text does not parse and
/// `DomainError::InvariantViolation` if it parses but is inconsistent.
pub fn parse_catalog(text: &str, format: DocumentFormat) -> Result<Catalog, DomainError> {
    let document: CatalogDocument = match format {
        DocumentFormat::Json => serde_json::from_str(text)
            .map_err(|e| DomainError::Infrastructure(format!("catalog JSON parse failed: {e}")))?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| DomainError::Infrastructure(format!("catalog YAML parse failed: {e}")))?,
    };
    Catalog::try_from(document)
}

/// Catalog read from a JSON or YAML file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Catalog, DomainError> {
        let format = DocumentFormat::from_path(&self.path)?;
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to read catalog {}: {e}",
                self.path.display()
            ))
        })?;
        let catalog = parse_catalog(&text, format)?;
        info!(
            profiles = catalog.profiles().len(),
            collections = catalog.story_line().len(),
            "loaded catalog from file"
        );
        Ok(catalog)
    }
}
