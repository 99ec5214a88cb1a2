use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POSITION_PRECISION;
use crate::error::{GraphError, Result};

/// Tunables for a [`Graph`](crate::Graph).
///
/// Loadable from TOML; every key is optional:
///
/// ```toml
/// position_precision = 0.001
/// allow_placeholders = true
/// expected_nodes = 10000
/// expected_edges = 80000
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Grid size positions are snapped to before deduplication. `0`, the
    /// default, compares positions bit for bit.
    pub position_precision: f32,
    /// Whether an edge may name an id that was never registered, creating
    /// placeholder slots at the origin for it and every id below it.
    pub allow_placeholders: bool,
    /// Capacity hint for the identity registry.
    pub expected_nodes: usize,
    /// Capacity hint for the write buffer.
    pub expected_edges: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            position_precision: DEFAULT_POSITION_PRECISION,
            allow_placeholders: true,
            expected_nodes: 0,
            expected_edges: 0,
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded graph config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.position_precision.is_finite() || self.position_precision < 0.0 {
            return Err(GraphError::Config(format!(
                "position_precision must be a finite non-negative number, got {}",
                self.position_precision
            )));
        }
        Ok(())
    }
}
