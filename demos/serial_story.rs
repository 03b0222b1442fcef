/// Serial Story example — a few rounds of a crowd-sourced story.
///
/// Each round the "audience" submits continuations with scores; one is drawn
/// by weight, its outcome block (if any) is settled with a d20, and the title
/// moves to the next chapter.
///
/// Run with: cargo run --example serial_story

use story_engine::core::dice::D20;
use story_engine::core::lint::coverage;
use story_engine::core::outcome::parse;
use story_engine::{AdvancerConfig, Candidate, StoryAdvancer};

fn main() {
    let mut advancer = StoryAdvancer::builder()
        .seed(2026)
        .with_config(AdvancerConfig::default())
        .build()
        .expect("Failed to build advancer");

    let mut title = "Chapter 1: The Lighthouse".to_string();
    let mut body =
        "The keeper had not lit the lamp in three nights, and the ships were getting closer."
            .to_string();

    let rounds: Vec<Vec<Candidate>> = vec![
        vec![
            Candidate::new("A knock at the door. 1-10: It's the harbourmaster, furious. 11-20: Nobody is there.", 5),
            Candidate::new("The keeper climbs the stairs at last.", 3),
            Candidate::new("lol", -2),
        ],
        vec![
            Candidate::new("The lamp sputters. 1-5: It dies for good. 6-18: It catches. 19-20: It blazes brighter than ever.", 4),
            Candidate::new("A gull crashes through the window.", 2),
        ],
        vec![
            Candidate::new("Out at sea, a horn answers.", 1),
            Candidate::new("Fog rolls in.", 1),
        ],
        vec![
            Candidate::new("The keeper finds a letter. 1-12: It is unsigned. 13-20: It bears the captain's seal.", 6),
        ],
    ];

    println!("=== {} ===\n{}\n", title, body);

    for (round, candidates) in rounds.iter().enumerate() {
        println!("--- Round {} ({} candidates) ---", round + 1, candidates.len());
        for c in candidates {
            let block = parse(&c.text);
            if block.has_branches() {
                let report = coverage(&block.outcomes, D20);
                if !report.is_complete() {
                    println!("  note: some d20 faces fall through to the fallback in {:?}", c.text);
                }
            }
        }

        match advancer.advance(&title, &body, candidates) {
            Some(result) => {
                print!("  winner #{}", result.winner);
                if let Some(roll) = result.roll {
                    print!(", rolled {}", roll);
                }
                println!();
                title = result.new_title;
                body = result.new_chapter_text;
                println!("\n=== {} ===\n{}\n", title, body);
            }
            None => {
                println!("  not enough engagement to continue past {}\n", title);
            }
        }
    }
}
