/// Advancement settings, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::dice::{D20, FALLBACK_OUTCOME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid die: {0} sides (need at least 1)")]
    InvalidDieSides(u32),
}

/// Tunables for [`StoryAdvancer`](crate::core::advancer::StoryAdvancer).
///
/// Every field has a default, so a RON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancerConfig {
    /// Faces on the die rolled against outcome blocks.
    pub die_sides: u32,
    /// Text used when the roll lands outside every range.
    pub fallback_outcome: String,
    /// Inserted between the previous body and the new chapter text.
    pub chapter_separator: String,
    /// Require total positive score to reach the current chapter number.
    pub enforce_threshold: bool,
}

impl Default for AdvancerConfig {
    fn default() -> Self {
        Self {
            die_sides: D20,
            fallback_outcome: FALLBACK_OUTCOME.to_string(),
            chapter_separator: "\n\n".to_string(),
            enforce_threshold: true,
        }
    }
}

impl AdvancerConfig {
    /// Load and validate a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<AdvancerConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse and validate a config from a RON string.
    pub fn parse_ron(input: &str) -> Result<AdvancerConfig, ConfigError> {
        let config: AdvancerConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.die_sides == 0 {
            return Err(ConfigError::InvalidDieSides(self.die_sides));
        }
        Ok(())
    }
}
