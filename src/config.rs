//! # Configuration
//!
//! Database connection settings come from the environment; per-entity search
//! definitions can be kept in YAML and loaded into a [`SearchCatalog`].

use crate::error::{QueryError, Result};
use crate::query_builder::EntitySearchConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/booking_development".to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(max_connections) = std::env::var("BOOKING_DB_MAX_CONNECTIONS") {
            config.max_connections = max_connections.parse().map_err(|e| {
                QueryError::configuration(format!("Invalid max_connections: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("BOOKING_DB_ACQUIRE_TIMEOUT_SECONDS") {
            config.acquire_timeout_seconds = timeout.parse().map_err(|e| {
                QueryError::configuration(format!("Invalid acquire_timeout_seconds: {e}"))
            })?;
        }

        if config.max_connections == 0 {
            return Err(QueryError::configuration("max_connections must be at least 1"));
        }

        Ok(config)
    }
}

/// Named entity search definitions, validated on load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCatalog {
    entities: BTreeMap<String, EntitySearchConfig>,
}

impl SearchCatalog {
    /// Parse a YAML document mapping entity names to search definitions
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let catalog: SearchCatalog = serde_yaml::from_str(yaml)
            .map_err(|e| QueryError::configuration(format!("Invalid search catalog: {e}")))?;

        for (name, entity) in &catalog.entities {
            entity.validate().map_err(|e| {
                QueryError::configuration(format!("Entity '{name}' is invalid: {e}"))
            })?;
        }

        debug!(
            entities = ?catalog.entities.keys().collect::<Vec<_>>(),
            "Search catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            QueryError::configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn insert(&mut self, name: &str, entity: EntitySearchConfig) -> Result<()> {
        entity.validate()?;
        self.entities.insert(name.to_string(), entity);
        Ok(())
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySearchConfig> {
        self.entities.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}
