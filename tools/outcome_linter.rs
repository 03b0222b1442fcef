/// Outcome Linter — reports die faces an outcome block leaves uncovered.
///
/// Usage: outcome_linter <file> [--sides <n>] [--strict]
///
/// `.ron` files are read as story snapshots and every candidate is checked;
/// anything else is read as a single continuation.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

use story_engine::core::dice::D20;
use story_engine::core::lint::{coverage, CoverageReport};
use story_engine::core::outcome::parse;
use story_engine::StorySnapshot;

#[derive(Parser)]
#[command(
    name = "outcome_linter",
    about = "Check outcome blocks for uncovered, shadowed and impossible ranges",
    version
)]
struct Cli {
    /// Continuation text file, or a story snapshot (.ron)
    path: PathBuf,

    /// Faces on the die the story rolls
    #[arg(short, long, default_value_t = D20)]
    sides: u32,

    /// Exit with status 1 when any block has gaps
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();

    let texts = match load_texts(&cli.path) {
        Ok(texts) => texts,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("Checking {} continuation(s) against a d{}", texts.len(), cli.sides);
    println!("\n=== Outcome Lint Report ===\n");

    let mut with_gaps = 0usize;
    let mut warnings = 0usize;
    for (label, text) in &texts {
        let block = parse(text);
        if !block.has_branches() {
            println!("{}: plain text, no outcome block", label);
            continue;
        }
        let report = coverage(&block.outcomes, cli.sides);
        if !report.is_complete() {
            with_gaps += 1;
        }
        warnings += print_report(label, &block.outcomes, &report);
    }

    println!(
        "\nSummary: {} block(s) with gaps, {} warnings",
        with_gaps, warnings
    );

    if cli.strict && with_gaps > 0 {
        process::exit(1);
    }
}

fn load_texts(path: &Path) -> Result<Vec<(String, String)>, String> {
    if path.extension().and_then(|s| s.to_str()) == Some("ron") {
        let snapshot = StorySnapshot::load_from_ron(path)
            .map_err(|e| format!("failed to load snapshot '{}': {}", path.display(), e))?;
        Ok(snapshot
            .candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("candidate #{} (score {})", i, c.score), c.text))
            .collect())
    } else {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        Ok(vec![(path.display().to_string(), text)])
    }
}

fn print_report(
    label: &str,
    outcomes: &[story_engine::OutcomeRange],
    report: &CoverageReport,
) -> usize {
    if report.is_clean() {
        println!("{}: {} ranges, all faces covered", label, outcomes.len());
        return 0;
    }

    let mut count = 0;
    for (low, high) in &report.gaps {
        if low == high {
            println!("WARNING: {}: face {} falls through to the fallback", label, low);
        } else {
            println!(
                "WARNING: {}: faces {}-{} fall through to the fallback",
                label, low, high
            );
        }
        count += 1;
    }
    for &i in &report.shadowed {
        let range = &outcomes[i];
        println!(
            "WARNING: {}: range {}-{} ('{}') can never win, earlier ranges cover it",
            label, range.low, range.high, range.outcome
        );
        count += 1;
    }
    for &i in &report.out_of_range {
        let range = &outcomes[i];
        println!(
            "WARNING: {}: range {}-{} ('{}') is outside a d{}",
            label, range.low, range.high, range.outcome, report.sides
        );
        count += 1;
    }
    count
}
