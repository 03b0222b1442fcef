use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::candidate::Candidate;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// The current state of a story as handed over by the host platform:
/// the latest chapter's title and body plus the continuations submitted
/// against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl StorySnapshot {
    /// Load a snapshot from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<StorySnapshot, StoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a snapshot from a RON string.
    pub fn parse_ron(input: &str) -> Result<StorySnapshot, StoryError> {
        Ok(ron::from_str(input)?)
    }
}

/// What the host publishes as the next chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementResult {
    pub new_title: String,
    /// The previous body with the resolved continuation appended.
    pub new_chapter_text: String,
    /// Index of the winning candidate in the input order.
    pub winner: usize,
    /// The die roll, if the winning text carried an outcome block.
    pub roll: Option<u32>,
}
