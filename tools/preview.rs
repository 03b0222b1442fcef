/// Preview — interactive shell for trying continuations and advancing a story.
///
/// Usage: preview [--story <file.ron>] [--config <file.ron>] [--seed <n>] [--no-threshold] [--verbose]
///
/// Commands:
///   title <text>        — set the story title
///   body <text>         — set the story body
///   add <score> <text>  — add a candidate continuation
///   list                — show the story and its candidates
///   clear               — drop all candidates
///   parse <text>        — show how a continuation splits into outcomes
///   roll                — roll the configured die
///   advance             — draw a winner and move to the next chapter
///   seed <n>            — reseed the generator
///   load <file.ron>     — load a story snapshot
///   help                — list commands
///   quit                — exit

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use story_engine::core::advancer::{Stall, StoryAdvancer};
use story_engine::core::chapter::extract_chapter;
use story_engine::core::dice::roll_die;
use story_engine::core::lint::coverage;
use story_engine::core::outcome::parse;
use story_engine::core::selector::total_weight;
use story_engine::{AdvancerConfig, Candidate, StorySnapshot};

#[derive(Parser)]
#[command(name = "preview", about = "Interactive story advancement shell", version)]
struct Cli {
    /// Story snapshot to start from
    #[arg(long)]
    story: Option<PathBuf>,

    /// Advancer settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Advance regardless of total score versus chapter number
    #[arg(long)]
    no_threshold: bool,

    /// Log advancement decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => match AdvancerConfig::load_from_ron(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: failed to load config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => AdvancerConfig::default(),
    };
    if cli.no_threshold {
        config.enforce_threshold = false;
    }

    let mut story = StorySnapshot {
        title: "Chapter 1".to_string(),
        body: String::new(),
        candidates: Vec::new(),
    };
    if let Some(ref path) = cli.story {
        match load_story(path) {
            Some(loaded) => story = loaded,
            None => std::process::exit(1),
        }
    }

    let mut current_seed = cli.seed;
    let mut rng = StdRng::seed_from_u64(current_seed);
    // All draws go through `rng`, which the `seed` command replaces.
    let advancer = match StoryAdvancer::builder()
        .with_config(config.clone())
        .build()
    {
        Ok(advancer) => advancer,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Story: {}", story.title);
    println!("Seed: {}, die: d{}", current_seed, config.die_sides);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "title" => {
                if rest.is_empty() {
                    println!("Usage: title <text>");
                    continue;
                }
                story.title = rest.to_string();
                println!("Title set. Chapter {}.", extract_chapter(&story.title));
            }
            "body" => {
                story.body = rest.to_string();
                println!("Body set ({} chars).", story.body.len());
            }
            "add" => {
                let Some((score, text)) = rest.split_once(char::is_whitespace) else {
                    println!("Usage: add <score> <text>");
                    continue;
                };
                let score: i64 = match score.parse() {
                    Ok(s) => s,
                    Err(_) => {
                        println!("Invalid score: {}", score);
                        continue;
                    }
                };
                story.candidates.push(Candidate::new(text.trim(), score));
                println!(
                    "Candidate #{} added. Total weight {}, chapter {}.",
                    story.candidates.len() - 1,
                    total_weight(&story.candidates),
                    extract_chapter(&story.title)
                );
            }
            "list" => print_story(&story),
            "clear" => {
                story.candidates.clear();
                println!("Candidates cleared.");
            }
            "parse" => {
                if rest.is_empty() {
                    println!("Usage: parse <text>");
                    continue;
                }
                print_parse(rest, config.die_sides);
            }
            "roll" => {
                println!("d{} → {}", config.die_sides, roll_die(config.die_sides, &mut rng));
            }
            "advance" => {
                match advancer.try_advance_with(&mut rng, &story.title, &story.body, &story.candidates) {
                    Ok(result) => {
                        let winner = &story.candidates[result.winner];
                        println!("\nWinner: #{} (score {})", result.winner, winner.score);
                        if let Some(roll) = result.roll {
                            println!("Rolled d{}: {}", config.die_sides, roll);
                        }
                        println!("\n--- {} ---", result.new_title);
                        println!("{}", result.new_chapter_text);
                        println!("--- End ---\n");
                        story.title = result.new_title;
                        story.body = result.new_chapter_text;
                        story.candidates.clear();
                    }
                    Err(Stall::BelowThreshold { total, chapter }) => {
                        println!(
                            "Not enough engagement: total weight {} is below chapter {}.",
                            total, chapter
                        );
                    }
                    Err(Stall::NoEligibleCandidate) => {
                        println!("No candidate has a positive score.");
                    }
                }
            }
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", current_seed);
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(s) => {
                        current_seed = s;
                        rng = StdRng::seed_from_u64(current_seed);
                        println!("Seed set to {}", current_seed);
                    }
                    Err(_) => println!("Invalid seed: {}", rest),
                }
            }
            "load" => {
                if rest.is_empty() {
                    println!("Usage: load <file.ron>");
                    continue;
                }
                if let Some(loaded) = load_story(Path::new(rest)) {
                    story = loaded;
                    println!(
                        "Loaded '{}' with {} candidates.",
                        story.title,
                        story.candidates.len()
                    );
                }
            }
            other => {
                println!("Unknown command: {}. Type 'help' for commands.", other);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "story_engine=debug"
    } else {
        "story_engine=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_story(path: &Path) -> Option<StorySnapshot> {
    match StorySnapshot::load_from_ron(path) {
        Ok(story) => Some(story),
        Err(e) => {
            eprintln!("ERROR: failed to load story '{}': {}", path.display(), e);
            None
        }
    }
}

fn print_story(story: &StorySnapshot) {
    println!("\n{}", story.title);
    if !story.body.is_empty() {
        println!("{}", story.body);
    }
    println!(
        "\nCandidates (total weight {}, chapter {}):",
        total_weight(&story.candidates),
        extract_chapter(&story.title)
    );
    if story.candidates.is_empty() {
        println!("  (none)");
    }
    for (i, c) in story.candidates.iter().enumerate() {
        println!("  #{} [{:>3}] {}", i, c.score, c.text);
    }
    println!();
}

fn print_parse(text: &str, sides: u32) {
    let block = parse(text);
    println!("Intro: {:?}", block.intro);
    if !block.has_branches() {
        println!("No outcome block; the text is used as-is.");
        return;
    }
    for range in &block.outcomes {
        println!("  {:>2}-{:<2} {}", range.low, range.high, range.outcome);
    }
    let report = coverage(&block.outcomes, sides);
    for (low, high) in &report.gaps {
        println!("  gap: {}-{} uses the fallback", low, high);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  title <text>        Set the story title");
    println!("  body <text>         Set the story body");
    println!("  add <score> <text>  Add a candidate continuation");
    println!("  list                Show the story and its candidates");
    println!("  clear               Drop all candidates");
    println!("  parse <text>        Show how a continuation splits into outcomes");
    println!("  roll                Roll the configured die");
    println!("  advance             Draw a winner and move to the next chapter");
    println!("  seed <n>            Reseed the generator");
    println!("  load <file.ron>     Load a story snapshot");
    println!("  help                Show this help");
    println!("  quit                Exit");
}
