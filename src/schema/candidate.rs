use serde::{Deserialize, Serialize};

/// One audience-submitted continuation competing to become the next chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    /// Popularity score. Only positive scores carry weight in the draw.
    pub score: i64,
}

impl Candidate {
    pub fn new(text: impl Into<String>, score: i64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    /// The weight this candidate contributes to a draw: its score when
    /// positive, zero otherwise.
    pub fn weight(&self) -> u64 {
        if self.score > 0 {
            self.score as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_ignores_non_positive_scores() {
        assert_eq!(Candidate::new("a", 5).weight(), 5);
        assert_eq!(Candidate::new("b", 0).weight(), 0);
        assert_eq!(Candidate::new("c", -3).weight(), 0);
    }
}
