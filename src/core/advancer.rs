/// Story advancement: candidates → winning continuation → next chapter.
///
/// Wires together the weighted draw, outcome resolution and title
/// numbering. Nothing here touches storage; the host feeds in the current
/// title, body and candidates and publishes whatever comes back.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::chapter::{extract_chapter, increment_title};
use crate::core::config::{AdvancerConfig, ConfigError};
use crate::core::dice::DiceResolver;
use crate::core::random::RandomSource;
use crate::core::selector::{pick_weighted_index, total_weight};
use crate::schema::candidate::Candidate;
use crate::schema::story::{AdvancementResult, StorySnapshot};

#[derive(Debug, Error)]
pub enum AdvancerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Why an advancement attempt produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stall {
    /// Total positive score is below the current chapter number.
    BelowThreshold { total: u64, chapter: u64 },
    /// No candidate has a positive score.
    NoEligibleCandidate,
}

/// Drives a story forward one chapter at a time. Built via
/// `StoryAdvancer::builder()`.
#[derive(Debug, Clone)]
pub struct StoryAdvancer {
    config: AdvancerConfig,
    resolver: DiceResolver,
    rng: StdRng,
}

/// Builder for constructing a `StoryAdvancer`.
#[derive(Debug, Default)]
pub struct StoryAdvancerBuilder {
    seed: Option<u64>,
    config_path: Option<String>,
    /// Directly provided config (takes precedence over `config_path`).
    config: Option<AdvancerConfig>,
}

impl StoryAdvancer {
    pub fn builder() -> StoryAdvancerBuilder {
        StoryAdvancerBuilder::default()
    }

    pub fn config(&self) -> &AdvancerConfig {
        &self.config
    }

    /// Advance using the advancer's own random generator.
    pub fn advance(
        &mut self,
        title: &str,
        body: &str,
        candidates: &[Candidate],
    ) -> Option<AdvancementResult> {
        let Self {
            config,
            resolver,
            rng,
        } = self;
        log_stall(step(config, resolver, rng, title, body, candidates), title)
    }

    /// Advance a snapshot using the advancer's own random generator.
    pub fn advance_snapshot(&mut self, snapshot: &StorySnapshot) -> Option<AdvancementResult> {
        self.advance(&snapshot.title, &snapshot.body, &snapshot.candidates)
    }

    /// Advance with an injected random source.
    pub fn advance_with<R>(
        &self,
        rng: &mut R,
        title: &str,
        body: &str,
        candidates: &[Candidate],
    ) -> Option<AdvancementResult>
    where
        R: RandomSource + ?Sized,
    {
        log_stall(self.try_advance_with(rng, title, body, candidates), title)
    }

    /// Like [`advance_with`](Self::advance_with) but reports why nothing
    /// happened.
    pub fn try_advance_with<R>(
        &self,
        rng: &mut R,
        title: &str,
        body: &str,
        candidates: &[Candidate],
    ) -> Result<AdvancementResult, Stall>
    where
        R: RandomSource + ?Sized,
    {
        step(&self.config, &self.resolver, rng, title, body, candidates)
    }
}

fn log_stall(outcome: Result<AdvancementResult, Stall>, title: &str) -> Option<AdvancementResult> {
    match outcome {
        Ok(result) => Some(result),
        Err(stall) => {
            tracing::debug!(?stall, title, "story did not advance");
            None
        }
    }
}

/// One advancement attempt. Takes the advancer's parts separately so the
/// advancer's own generator can be borrowed mutably alongside them.
fn step<R>(
    config: &AdvancerConfig,
    resolver: &DiceResolver,
    rng: &mut R,
    title: &str,
    body: &str,
    candidates: &[Candidate],
) -> Result<AdvancementResult, Stall>
where
    R: RandomSource + ?Sized,
{
    let chapter = extract_chapter(title);
    let total = total_weight(candidates);

    if config.enforce_threshold && total < chapter {
        return Err(Stall::BelowThreshold { total, chapter });
    }

    let winner = pick_weighted_index(candidates, rng).ok_or(Stall::NoEligibleCandidate)?;
    let resolution = resolver.resolve_text(&candidates[winner].text, rng);
    tracing::debug!(
        winner,
        score = candidates[winner].score,
        roll = ?resolution.roll,
        "continuation chosen"
    );

    let new_title = increment_title(title);
    let new_chapter_text = format!("{}{}{}", body, config.chapter_separator, resolution.text);
    tracing::info!(chapter, total, new_title = %new_title, "story advanced");

    Ok(AdvancementResult {
        new_title,
        new_chapter_text,
        winner,
        roll: resolution.roll,
    })
}

/// Advance with default settings and an injected random source.
pub fn advance<R>(
    title: &str,
    body: &str,
    candidates: &[Candidate],
    rng: &mut R,
) -> Option<AdvancementResult>
where
    R: RandomSource + ?Sized,
{
    StoryAdvancer::builder()
        .seed(0)
        .build_with_config(AdvancerConfig::default())
        .advance_with(rng, title, body, candidates)
}

impl StoryAdvancerBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config_file(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    /// Provide a config directly (for testing without files).
    pub fn with_config(mut self, config: AdvancerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<StoryAdvancer, AdvancerError> {
        let config = match (self.config.clone(), &self.config_path) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(path)) => AdvancerConfig::load_from_ron(Path::new(path))?,
            (None, None) => AdvancerConfig::default(),
        };
        Ok(self.build_with_config(config))
    }

    fn build_with_config(self, config: AdvancerConfig) -> StoryAdvancer {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        StoryAdvancer {
            resolver: DiceResolver::new(config.die_sides, config.fallback_outcome.clone()),
            config,
            rng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedSource;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("The bridge collapses behind you.", 2),
            Candidate::new("You open the door. 1-9: It's locked. 10-20: It opens.", 3),
            Candidate::new("Spam spam spam.", -5),
        ]
    }

    #[test]
    fn advance_plain_winner() {
        let mut src = ScriptedSource::new([0]);
        let result = advance("Chapter 3: The Ravine", "Once upon a time.", &candidates(), &mut src)
            .unwrap();
        assert_eq!(result.new_title, "Chapter 4: The Ravine");
        assert_eq!(
            result.new_chapter_text,
            "Once upon a time.\n\nThe bridge collapses behind you."
        );
        assert_eq!(result.winner, 0);
        assert_eq!(result.roll, None);
    }

    #[test]
    fn advance_branching_winner_rolls() {
        // Draw 2 lands on the second candidate; 14 + 1 = 15 opens the door.
        let mut src = ScriptedSource::new([2, 14]);
        let result = advance("Chapter 1", "Start.", &candidates(), &mut src).unwrap();
        assert_eq!(result.new_title, "Chapter 2");
        assert_eq!(result.new_chapter_text, "Start.\n\nYou open the door. It opens.");
        assert_eq!(result.winner, 1);
        assert_eq!(result.roll, Some(15));
    }

    #[test]
    fn threshold_blocks_small_engagement() {
        let advancer = StoryAdvancer::builder().seed(1).build().unwrap();
        let mut src = ScriptedSource::new([0]);
        // Total weight 5 < chapter 6.
        let stall = advancer
            .try_advance_with(&mut src, "Chapter 6", "", &candidates())
            .unwrap_err();
        assert_eq!(stall, Stall::BelowThreshold { total: 5, chapter: 6 });
        assert_eq!(src.remaining(), 1);
    }

    #[test]
    fn threshold_met_exactly_advances() {
        let mut src = ScriptedSource::new([0]);
        assert!(advance("Chapter 5", "", &candidates(), &mut src).is_some());
    }

    #[test]
    fn threshold_can_be_disabled() {
        let config = AdvancerConfig {
            enforce_threshold: false,
            ..AdvancerConfig::default()
        };
        let advancer = StoryAdvancer::builder().with_config(config).build().unwrap();
        let mut src = ScriptedSource::new([0]);
        let result = advancer.advance_with(&mut src, "Chapter 50", "", &candidates());
        assert_eq!(result.unwrap().new_title, "Chapter 51");
    }

    #[test]
    fn no_positive_candidates_stalls() {
        let config = AdvancerConfig {
            enforce_threshold: false,
            ..AdvancerConfig::default()
        };
        let advancer = StoryAdvancer::builder().with_config(config).build().unwrap();
        let mut src = ScriptedSource::new([]);
        let stall = advancer
            .try_advance_with(&mut src, "Chapter 1", "", &[Candidate::new("meh", 0)])
            .unwrap_err();
        assert_eq!(stall, Stall::NoEligibleCandidate);
    }

    #[test]
    fn empty_candidates_never_advance() {
        let mut src = ScriptedSource::new([]);
        assert!(advance("Chapter 0", "", &[], &mut src).is_none());
    }

    #[test]
    fn untitled_story_gets_prefix() {
        let mut src = ScriptedSource::new([0]);
        let result = advance("The Beginning", "", &candidates(), &mut src).unwrap();
        assert_eq!(result.new_title, "Chapter 2: The Beginning");
    }

    #[test]
    fn custom_separator_and_die() {
        let config = AdvancerConfig {
            die_sides: 6,
            chapter_separator: "\n---\n".to_string(),
            fallback_outcome: "Silence.".to_string(),
            enforce_threshold: true,
        };
        let advancer = StoryAdvancer::builder().with_config(config).build().unwrap();
        let mut src = ScriptedSource::new([2, 5]);
        let result = advancer
            .advance_with(&mut src, "Chapter 1", "Before.", &candidates())
            .unwrap();
        // Roll 6 is inside 1-9 on a d6.
        assert_eq!(result.roll, Some(6));
        assert_eq!(result.new_chapter_text, "Before.\n---\nYou open the door. It's locked.");
    }

    #[test]
    fn same_seed_same_result() {
        let mut a = StoryAdvancer::builder().seed(42).build().unwrap();
        let mut b = StoryAdvancer::builder().seed(42).build().unwrap();
        for _ in 0..5 {
            assert_eq!(
                a.advance("Chapter 1", "x", &candidates()),
                b.advance("Chapter 1", "x", &candidates())
            );
        }
    }

    #[test]
    fn own_generator_matches_external_seeded_rng() {
        let mut advancer = StoryAdvancer::builder().seed(17).build().unwrap();
        let reference = StoryAdvancer::builder().seed(0).build().unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10 {
            // The advancer's generator carries its state across calls.
            assert_eq!(
                advancer.advance("Chapter 1", "x", &candidates()),
                reference.advance_with(&mut rng, "Chapter 1", "x", &candidates())
            );
        }
    }

    #[test]
    fn builder_rejects_zero_sided_die() {
        let config = AdvancerConfig {
            die_sides: 0,
            ..AdvancerConfig::default()
        };
        assert!(matches!(
            StoryAdvancer::builder().with_config(config).build(),
            Err(AdvancerError::Config(ConfigError::InvalidDieSides(0)))
        ));
    }

    #[test]
    fn builder_loads_config_file() {
        let advancer = StoryAdvancer::builder()
            .config_file("tests/fixtures/d12_config.ron")
            .build()
            .unwrap();
        assert_eq!(advancer.config().die_sides, 12);
    }

    #[test]
    fn advance_snapshot_uses_fields() {
        let snapshot = StorySnapshot {
            title: "Chapter 1: Dawn".to_string(),
            body: "Light.".to_string(),
            candidates: vec![Candidate::new("Birds sing.", 1)],
        };
        let mut advancer = StoryAdvancer::builder().seed(9).build().unwrap();
        let result = advancer.advance_snapshot(&snapshot).unwrap();
        assert_eq!(result.new_title, "Chapter 2: Dawn");
        assert_eq!(result.new_chapter_text, "Light.\n\nBirds sing.");
    }
}
