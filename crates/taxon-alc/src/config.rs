//! # Reasoner Configuration
//!
//! Tuning knobs for subsumption and classification

use crate::AlcError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reasoner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Maximum nesting of OR / NOT sub-queries. A branch that would go
    /// deeper counts as not subsumed. `None` means unbounded, in which case
    /// very deep OR / NOT nesting (thousands of levels) can overflow the
    /// thread stack.
    pub max_recursion_depth: Option<usize>,

    /// Drop parents already implied by a more specific listed parent
    pub reduce_redundant_parents: bool,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: None,
            reduce_redundant_parents: true,
        }
    }
}

impl ReasonerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AlcError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AlcError::ConfigError(format!("invalid reasoner config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AlcError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = Some(depth);
        self
    }

    pub fn validate(&self) -> Result<(), AlcError> {
        if self.max_recursion_depth == Some(0) {
            return Err(AlcError::ConfigError(
                "max_recursion_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
