/// Outcome block integration tests — parsing, resolution and coverage.

use story_engine::core::dice::{resolve, DiceResolver, FALLBACK_OUTCOME};
use story_engine::core::lint::coverage;
use story_engine::core::outcome::parse;
use story_engine::{OutcomeRange, ScriptedSource, StorySnapshot};

#[test]
fn door_block_resolves_each_face() {
    let block = parse("You open the door. 1-9: It's locked. 10-20: It opens.");
    assert_eq!(block.intro, "You open the door.");
    assert_eq!(
        block.outcomes,
        vec![
            OutcomeRange::new(1, 9, "It's locked."),
            OutcomeRange::new(10, 20, "It opens."),
        ]
    );
    for roll in 1..=20 {
        let expected = if roll <= 9 { "It's locked." } else { "It opens." };
        assert_eq!(resolve(roll, &block.outcomes), expected);
    }
    assert_eq!(resolve(5, &[]), FALLBACK_OUTCOME);
}

#[test]
fn every_face_of_resolver_stays_in_block() {
    let resolver = DiceResolver::default();
    let raw = "The vault hums. 1: Alarm! 2-19: Silence. 20: Jackpot.";
    for draw in 0..20u64 {
        let mut src = ScriptedSource::new([draw]);
        let resolution = resolver.resolve_text(raw, &mut src);
        let roll = resolution.roll.unwrap();
        assert_eq!(roll as u64, draw + 1);
        let expected = match roll {
            1 => "The vault hums. Alarm!",
            20 => "The vault hums. Jackpot.",
            _ => "The vault hums. Silence.",
        };
        assert_eq!(resolution.text, expected);
    }
}

#[test]
fn fixture_candidates_coverage() {
    let story =
        StorySnapshot::load_from_ron(std::path::Path::new("tests/fixtures/cave_story.ron"))
            .unwrap();
    let growl = parse(&story.candidates[0].text);
    assert!(coverage(&growl.outcomes, 20).is_clean());

    let torches = parse(&story.candidates[3].text);
    let report = coverage(&torches.outcomes, 20);
    assert_eq!(report.gaps, vec![(6, 20)]);
    assert_eq!(report.uncovered_faces(), 15);

    let plain = parse(&story.candidates[1].text);
    assert!(plain.outcomes.is_empty());
    assert_eq!(plain.intro, story.candidates[1].text);
}

#[test]
fn malformed_markers_are_plain_text() {
    for raw in ["a-b: c", "Note: the end", "Ratio 3:", "1-: broken"] {
        assert!(parse(raw).outcomes.is_empty(), "{}", raw);
        let mut src = ScriptedSource::new([0]);
        assert_eq!(story_engine::core::dice::resolve_text(raw, &mut src), raw);
        assert_eq!(src.remaining(), 1);
    }
}

#[test]
fn clock_times_read_as_markers() {
    // The marker grammar has no escape, so "12:30" opens a branch.
    let block = parse("Meet at 12:30 sharp");
    assert_eq!(block.intro, "Meet at");
    assert_eq!(block.outcomes, vec![OutcomeRange::new(12, 12, "30 sharp")]);
}
