//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration and the business catalog from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BusinessContext, SortedTiers, TimeWindow};

use super::types::{BusinessConfig, EngineConfig, EngineFile, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Engine metadata and pricing defaults
/// └── businesses/
///     ├── hotel-lumiere.yaml
///     └── bistro-marais.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use booking_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let tiers = loader.cancellation_tiers("hotel-lumiere").unwrap();
/// println!("{} cancellation tiers", tiers.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `engine.yaml` or the `businesses` directory is missing
    /// - Any file contains invalid YAML
    /// - Two files declare the same business id
    /// - A business has a tier with an out-of-range refund percentage
    ///
    /// An empty `businesses` directory is allowed.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let engine_file = Self::load_yaml::<EngineFile>(&engine_path)?;

        let businesses_dir = path.join("businesses");
        let businesses = Self::load_businesses(&businesses_dir)?;

        debug!(
            config_dir = %path.display(),
            businesses = businesses.len(),
            "Loaded booking engine configuration"
        );

        let config = EngineConfig::new(engine_file.engine, engine_file.pricing, businesses)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every business file from the businesses directory.
    fn load_businesses(dir: &Path) -> EngineResult<Vec<BusinessConfig>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut seen = HashSet::new();
        let mut businesses = Vec::with_capacity(paths.len());
        for path in paths {
            let business = Self::load_yaml::<BusinessConfig>(&path)?;
            if !seen.insert(business.id.clone()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate business id '{}'", business.id),
                });
            }
            businesses.push(business);
        }

        Ok(businesses)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Gets a business by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use booking_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let business = loader.get_business("bistro-marais")?;
    /// println!("{} ({})", business.name, business.vertical);
    /// # Ok::<(), booking_engine::error::EngineError>(())
    /// ```
    pub fn get_business(&self, id: &str) -> EngineResult<&BusinessConfig> {
        self.config
            .businesses()
            .get(id)
            .ok_or_else(|| EngineError::BusinessNotFound { id: id.to_string() })
    }

    /// Builds the explicit pricing context for a calculation.
    ///
    /// With no business id the engine-wide defaults apply.
    pub fn business_context(&self, business_id: Option<&str>) -> EngineResult<BusinessContext> {
        match business_id {
            Some(id) => {
                let business = self.get_business(id)?;
                Ok(self.config.context_for(business))
            }
            None => Ok(self.config.default_context()),
        }
    }

    /// Gets a business's cancellation tiers, largest threshold first.
    pub fn cancellation_tiers(&self, business_id: &str) -> EngineResult<&SortedTiers> {
        self.config
            .tiers(business_id)
            .ok_or_else(|| EngineError::BusinessNotFound {
                id: business_id.to_string(),
            })
    }

    /// Gets a business's priced opening-hour windows.
    pub fn time_windows(&self, business_id: &str) -> EngineResult<&[TimeWindow]> {
        self.get_business(business_id)
            .map(|business| business.opening_hours.as_slice())
    }
}
