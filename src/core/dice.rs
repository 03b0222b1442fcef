//! Die rolls and outcome resolution.
//!
//! Outcome coverage is up to the author. A roll that lands in no range is
//! not an error; it resolves to a fixed fallback line.

use crate::core::outcome;
use crate::core::random::RandomSource;
use crate::schema::outcome::OutcomeRange;

/// Text used when a roll matches no outcome range.
pub const FALLBACK_OUTCOME: &str = "You won't believe what happened next!";

/// Faces on the die used for branching stories.
pub const D20: u32 = 20;

/// Roll a die with `sides` faces, uniformly in `1..=sides`.
///
/// A zero-sided die is treated as one-sided.
pub fn roll_die<R>(sides: u32, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    let sides = sides.max(1);
    rng.next_below(u64::from(sides)) as u32 + 1
}

/// First range containing `roll`, in source order.
pub fn find_outcome(roll: u32, outcomes: &[OutcomeRange]) -> Option<&OutcomeRange> {
    outcomes.iter().find(|range| range.contains(roll))
}

/// Outcome text for `roll`, or [`FALLBACK_OUTCOME`] when nothing matches.
pub fn resolve(roll: u32, outcomes: &[OutcomeRange]) -> &str {
    find_outcome(roll, outcomes)
        .map(|range| range.outcome.as_str())
        .unwrap_or(FALLBACK_OUTCOME)
}

/// Resolve continuation text with a d20 and the default fallback.
pub fn resolve_text<R>(raw: &str, rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    DiceResolver::default().resolve_text(raw, rng).text
}

/// Resolved continuation text plus the roll that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    /// `None` when the text had no outcome block and no die was rolled.
    pub roll: Option<u32>,
}

/// Rolls a configurable die against outcome blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceResolver {
    sides: u32,
    fallback: String,
}

impl Default for DiceResolver {
    fn default() -> Self {
        Self::new(D20, FALLBACK_OUTCOME)
    }
}

impl DiceResolver {
    pub fn new(sides: u32, fallback: impl Into<String>) -> Self {
        Self {
            sides: sides.max(1),
            fallback: fallback.into(),
        }
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        roll_die(self.sides, rng)
    }

    pub fn resolve<'a>(&'a self, roll: u32, outcomes: &'a [OutcomeRange]) -> &'a str {
        find_outcome(roll, outcomes)
            .map(|range| range.outcome.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Parse `raw`; if it has an outcome block, roll and join the intro with
    /// the chosen outcome by a single space, even when either side is empty.
    /// Plain text is returned untouched without rolling.
    pub fn resolve_text<R>(&self, raw: &str, rng: &mut R) -> Resolution
    where
        R: RandomSource + ?Sized,
    {
        let block = outcome::parse(raw);
        if !block.has_branches() {
            return Resolution {
                text: raw.to_string(),
                roll: None,
            };
        }

        let roll = self.roll(rng);
        let chosen = self.resolve(roll, &block.outcomes);
        if find_outcome(roll, &block.outcomes).is_none() {
            tracing::debug!(roll, sides = self.sides, "roll matched no outcome, using fallback");
        }

        Resolution {
            text: format!("{} {}", block.intro, chosen),
            roll: Some(roll),
        }
    }
}
