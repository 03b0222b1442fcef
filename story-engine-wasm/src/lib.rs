//! WASM bindings for story-engine — lets a JavaScript host that owns the
//! posts and comments run the advancement core.

use wasm_bindgen::prelude::*;

use story_engine::core::chapter;
use story_engine::core::lint::coverage;
use story_engine::core::outcome::parse;
use story_engine::{AdvancementResult, AdvancerConfig, StoryAdvancer, StorySnapshot};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize, Debug, PartialEq)]
struct AdvanceOutput {
    advanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_chapter_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roll: Option<u32>,
}

impl From<Option<AdvancementResult>> for AdvanceOutput {
    fn from(result: Option<AdvancementResult>) -> Self {
        match result {
            Some(r) => AdvanceOutput {
                advanced: true,
                new_title: Some(r.new_title),
                new_chapter_text: Some(r.new_chapter_text),
                winner: Some(r.winner),
                roll: r.roll,
            },
            None => AdvanceOutput {
                advanced: false,
                new_title: None,
                new_chapter_text: None,
                winner: None,
                roll: None,
            },
        }
    }
}

#[derive(serde::Serialize)]
struct CoverageOutput {
    sides: u32,
    gaps: Vec<(u32, u32)>,
    shadowed: Vec<usize>,
    out_of_range: Vec<usize>,
    complete: bool,
}

// ---------------------------------------------------------------------------
// Plain Rust core of each binding, testable off-wasm
// ---------------------------------------------------------------------------
fn advance_json(advancer: &mut StoryAdvancer, snapshot_json: &str) -> Result<String, String> {
    let snapshot: StorySnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| format!("Invalid snapshot JSON: {e}"))?;
    let output = AdvanceOutput::from(advancer.advance_snapshot(&snapshot));
    serde_json::to_string(&output).map_err(|e| format!("Serialization error: {e}"))
}

fn parse_json(text: &str) -> Result<String, String> {
    serde_json::to_string(&parse(text)).map_err(|e| format!("Serialization error: {e}"))
}

fn coverage_json(text: &str, sides: u32) -> Result<String, String> {
    let block = parse(text);
    let report = coverage(&block.outcomes, sides);
    let output = CoverageOutput {
        sides: report.sides,
        complete: report.is_complete(),
        gaps: report.gaps,
        shadowed: report.shadowed,
        out_of_range: report.out_of_range,
    };
    serde_json::to_string(&output).map_err(|e| format!("Serialization error: {e}"))
}

fn build_advancer(seed: u64, config_ron: Option<String>) -> Result<StoryAdvancer, String> {
    let config = match config_ron {
        Some(src) => {
            AdvancerConfig::parse_ron(&src).map_err(|e| format!("Config error: {e}"))?
        }
        None => AdvancerConfig::default(),
    };
    StoryAdvancer::builder()
        .seed(seed)
        .with_config(config)
        .build()
        .map_err(|e| format!("Advancer build error: {e}"))
}

// ---------------------------------------------------------------------------
// StoryDemo — a seeded advancer kept alive across calls
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryDemo {
    advancer: StoryAdvancer,
}

#[wasm_bindgen]
impl StoryDemo {
    /// Create an advancer with the given seed and optional RON config.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, config_ron: Option<String>) -> Result<StoryDemo, JsError> {
        let advancer = build_advancer(seed, config_ron).map_err(|e| JsError::new(&e))?;
        Ok(StoryDemo { advancer })
    }

    /// Advance a story snapshot given as JSON.
    ///
    /// Expected JSON shape:
    /// ```json
    /// {
    ///   "title": "Chapter 3: The Cave",
    ///   "body": "...",
    ///   "candidates": [{ "text": "...", "score": 4 }]
    /// }
    /// ```
    /// Returns `{"advanced": false}` or the new title, text, winner and roll.
    pub fn advance(&mut self, snapshot_json: &str) -> Result<String, JsError> {
        advance_json(&mut self.advancer, snapshot_json).map_err(|e| JsError::new(&e))
    }

    /// Reseed, keeping the current config.
    pub fn reset(&mut self, seed: u64) {
        let config = self.advancer.config().clone();
        if let Ok(advancer) = StoryAdvancer::builder().seed(seed).with_config(config).build() {
            self.advancer = advancer;
        }
    }
}

/// One-shot advancement with default settings.
#[wasm_bindgen]
pub fn advance_story(snapshot_json: &str, seed: u64) -> Result<String, JsError> {
    let mut advancer = build_advancer(seed, None).map_err(|e| JsError::new(&e))?;
    advance_json(&mut advancer, snapshot_json).map_err(|e| JsError::new(&e))
}

/// Split continuation text into intro and outcomes. Returns JSON.
#[wasm_bindgen]
pub fn parse_outcomes(text: &str) -> Result<String, JsError> {
    parse_json(text).map_err(|e| JsError::new(&e))
}

/// Coverage report of the text's outcome block on a die. Returns JSON.
#[wasm_bindgen]
pub fn outcome_coverage(text: &str, sides: u32) -> Result<String, JsError> {
    coverage_json(text, sides).map_err(|e| JsError::new(&e))
}

#[wasm_bindgen]
pub fn increment_title(title: &str) -> String {
    chapter::increment_title(title)
}

#[wasm_bindgen]
pub fn extract_chapter(title: &str) -> u64 {
    chapter::extract_chapter(title)
}
