use serde::{Deserialize, Serialize};

/// An inclusive die-face range mapped to the text it produces.
///
/// Always `low <= high`. Ranges keep the order they were written in and may
/// overlap or leave gaps; lookups take the first range that matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRange {
    pub low: u32,
    pub high: u32,
    pub outcome: String,
}

impl OutcomeRange {
    /// Build a range, swapping the bounds if they were written backwards.
    pub fn new(low: u32, high: u32, outcome: impl Into<String>) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            low,
            high,
            outcome: outcome.into(),
        }
    }

    pub fn contains(&self, roll: u32) -> bool {
        self.low <= roll && roll <= self.high
    }
}

/// Continuation text split into its lead-in and its branch outcomes.
///
/// An empty `outcomes` list means the text had no branch structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedBlock {
    pub intro: String,
    pub outcomes: Vec<OutcomeRange>,
}

impl ParsedBlock {
    pub fn has_branches(&self) -> bool {
        !self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_ordered() {
        let r = OutcomeRange::new(12, 3, "backwards");
        assert_eq!((r.low, r.high), (3, 12));
        assert!(r.contains(3));
        assert!(r.contains(12));
        assert!(!r.contains(13));
    }

    #[test]
    fn single_face_range() {
        let r = OutcomeRange::new(20, 20, "critical");
        assert!(r.contains(20));
        assert!(!r.contains(19));
    }

    #[test]
    fn default_block_has_no_branches() {
        assert!(!ParsedBlock::default().has_branches());
    }
}
